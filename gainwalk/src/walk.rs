//! Top-level library walk
//!
//! Wires the admission gate, completion tracker and statistics together,
//! walks the library root in place and waits for every spawned task.

use crate::gate::AdmissionGate;
use crate::runner::{JobRunner, ToolExecutor};
use crate::stats::{RunStatistics, WalkSummary};
use crate::tracker::CompletionTracker;
use crate::traverser::Traverser;
use gainwalk_common::{CommandConfig, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Analyse every audio directory under `root` and wait for all work to finish
///
/// The root directory is enumerated by the calling task itself; only
/// directories discovered beneath it get their own traversal tasks.
///
/// Failures inside the tree are logged and counted in the returned summary.
/// The only error returned is `Error::DirectoryRead` when `root` itself could
/// not be enumerated (or `Error::Config` for an invalid `config`).
pub async fn walk_library(
    root: &Path,
    config: &CommandConfig,
    executor: Arc<dyn ToolExecutor>,
) -> Result<WalkSummary> {
    config.validate()?;

    let gate = AdmissionGate::new(config.concurrency_limit)?;
    let stats = Arc::new(RunStatistics::new());
    let tracker = CompletionTracker::new();
    let runner = Arc::new(JobRunner::new(executor, gate.clone(), Arc::clone(&stats)));
    let traverser = Arc::new(Traverser::new(
        tracker.clone(),
        runner,
        config.command_template().into(),
        Arc::clone(&stats),
    ));

    info!(
        root = %root.display(),
        concurrency_limit = gate.capacity(),
        "Walking library"
    );

    let root_guard = tracker.register();
    let root_result = traverser.scan_directory(root).await;
    drop(root_guard);

    tracker.wait_all().await;

    let summary = stats.summary(gate.peak_in_flight());
    root_result.map(|()| summary)
}
