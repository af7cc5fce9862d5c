//! External analysis job runner
//!
//! Runs one [`AnalysisJob`] through the analysis tool while holding an
//! admission gate permit. Failures are logged and counted, never propagated:
//! one directory's failed invocation does not affect any other task.
//!
//! The tool itself sits behind [`ToolExecutor`] so tests can substitute a
//! stand-in for the real process.

use crate::gate::AdmissionGate;
use crate::job::AnalysisJob;
use crate::stats::RunStatistics;
use crate::tracker::TaskGuard;
use async_trait::async_trait;
use gainwalk_common::{Error, InvocationFailure, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Something that can run the analysis tool with an argument list
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Program name shown in reports
    fn program(&self) -> &Path;

    /// Run to completion; `Ok` only if the tool launched and exited successfully
    async fn execute(&self, args: &[OsString]) -> std::result::Result<(), InvocationFailure>;
}

/// Runs the analysis tool as a child process
///
/// Only the exit status is observed; the child's standard streams are
/// connected to the null device.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    program: PathBuf,
}

impl ProcessExecutor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ToolExecutor for ProcessExecutor {
    fn program(&self) -> &Path {
        &self.program
    }

    async fn execute(&self, args: &[OsString]) -> std::result::Result<(), InvocationFailure> {
        let status = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(InvocationFailure::Launch)?;

        if status.success() {
            Ok(())
        } else {
            Err(InvocationFailure::ExitStatus(status))
        }
    }
}

/// Dispatches analysis jobs under the admission gate
pub struct JobRunner {
    executor: Arc<dyn ToolExecutor>,
    gate: AdmissionGate,
    stats: Arc<RunStatistics>,
}

impl JobRunner {
    pub fn new(
        executor: Arc<dyn ToolExecutor>,
        gate: AdmissionGate,
        stats: Arc<RunStatistics>,
    ) -> Self {
        Self {
            executor,
            gate,
            stats,
        }
    }

    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    /// Run `job` on a new task; `guard` is released when the job finishes
    pub fn spawn(self: &Arc<Self>, job: AnalysisJob, guard: TaskGuard) -> JoinHandle<()> {
        let runner = Arc::clone(self);
        tokio::spawn(async move { runner.run(job, guard).await })
    }

    /// Run `job` to completion, reporting any failure
    ///
    /// The gate permit is released before `guard` deregisters the job.
    pub async fn run(&self, job: AnalysisJob, guard: TaskGuard) {
        let _guard = guard;

        if let Err(e) = self.invoke(&job).await {
            self.stats.record_job_failed();
            error!(
                directory = %job.directory().display(),
                files = ?job.files(),
                "Error calling analysis tool: {}",
                e
            );
        }
    }

    async fn invoke(&self, job: &AnalysisJob) -> Result<()> {
        let _permit = self.gate.acquire().await?;

        debug!(
            directory = %job.directory().display(),
            files = job.files().len(),
            in_flight = self.gate.in_flight(),
            "Running analysis"
        );

        self.executor
            .execute(&job.arguments())
            .await
            .map_err(|source| Error::Invocation {
                directory: job.directory().to_path_buf(),
                command: job.render(self.executor.program()),
                source,
            })
    }
}
