//! # gainwalk
//!
//! Walks a music library and runs a loudness-analysis tool (`rsgain` in
//! custom mode) once per directory that directly contains audio files.
//!
//! Every directory is enumerated by its own task and every analysis job runs
//! on its own task. The number of concurrently running tool invocations is
//! bounded by an [`AdmissionGate`]; a [`CompletionTracker`] lets the caller
//! wait until the whole tree has been processed.

pub mod cli;
pub mod filter;
pub mod gate;
pub mod job;
pub mod runner;
pub mod stats;
pub mod tracker;
pub mod traverser;
pub mod walk;

pub use gate::{AdmissionGate, GatePermit};
pub use job::AnalysisJob;
pub use runner::{JobRunner, ProcessExecutor, ToolExecutor};
pub use stats::{RunStatistics, WalkSummary};
pub use tracker::{CompletionTracker, TaskGuard};
pub use traverser::Traverser;
pub use walk::walk_library;
