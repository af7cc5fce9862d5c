//! Directory traversal by delegation
//!
//! Each traversal task enumerates exactly one directory level. Subdirectories
//! are never descended inline: each one is registered with the completion
//! tracker and handed to a fresh traversal task. Audio files found directly in
//! the directory become at most one [`AnalysisJob`], dispatched on its own task.
//!
//! A traversal task never waits for the tasks it spawns. Call depth therefore
//! stays constant no matter how deep the library tree is.

use crate::filter;
use crate::job::AnalysisJob;
use crate::runner::JobRunner;
use crate::stats::RunStatistics;
use crate::tracker::{CompletionTracker, TaskGuard};
use futures::future::{BoxFuture, FutureExt};
use gainwalk_common::{Error, Result};
use std::fs::FileType;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

/// Shared state every traversal task works with
pub struct Traverser {
    tracker: CompletionTracker,
    runner: Arc<JobRunner>,
    command: Arc<[String]>,
    stats: Arc<RunStatistics>,
}

impl Traverser {
    pub fn new(
        tracker: CompletionTracker,
        runner: Arc<JobRunner>,
        command: Arc<[String]>,
        stats: Arc<RunStatistics>,
    ) -> Self {
        Self {
            tracker,
            runner,
            command,
            stats,
        }
    }

    /// Walk `path` on a new task
    ///
    /// `guard` must have been registered by the caller before this call.
    pub fn spawn(self: &Arc<Self>, path: PathBuf, guard: TaskGuard) -> JoinHandle<()> {
        tokio::spawn(Arc::clone(self).traverse(path, guard))
    }

    /// Task body for a delegated directory; errors are reported, not returned
    ///
    /// Boxed so the recursively spawned future has a nameable `Send` type.
    pub fn traverse(self: Arc<Self>, path: PathBuf, guard: TaskGuard) -> BoxFuture<'static, ()> {
        async move {
            let _guard = guard;
            if let Err(e) = self.scan_directory(&path).await {
                error!(directory = %path.display(), "{}", e);
            }
        }
        .boxed()
    }

    /// Enumerate the immediate entries of `path`
    ///
    /// Delegates every subdirectory and dispatches one job for the audio files
    /// directly inside `path`. Returns `Error::DirectoryRead` if the directory
    /// cannot be enumerated; in that case no job is dispatched for it.
    pub async fn scan_directory(self: &Arc<Self>, path: &Path) -> Result<()> {
        let mut entries = match fs::read_dir(path).await {
            Ok(entries) => entries,
            Err(source) => return Err(self.read_failed(path, source)),
        };

        let mut eligible_files = Vec::new();

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(source) => return Err(self.read_failed(path, source)),
            };

            let entry_path = entry.path();
            let file_type = match entry.file_type().await {
                Ok(file_type) => file_type,
                Err(e) => {
                    warn!("Cannot determine type of {}: {}", entry_path.display(), e);
                    continue;
                }
            };

            if file_type.is_dir() {
                let guard = self.tracker.register();
                self.spawn(entry_path, guard);
            } else if filter::is_eligible(entry.file_name())
                && is_regular_file(&entry_path, file_type).await
            {
                eligible_files.push(entry_path);
            } else {
                trace!("Skipping {}", entry_path.display());
            }
        }

        self.stats.record_directory_scanned();

        if eligible_files.is_empty() {
            return Ok(());
        }

        let job = AnalysisJob::new(path.to_path_buf(), eligible_files, Arc::clone(&self.command));
        debug!(
            directory = %path.display(),
            files = job.files().len(),
            "Dispatching analysis job"
        );

        let guard = self.tracker.register();
        self.stats.record_job_dispatched(job.files().len());
        self.runner.spawn(job, guard);

        Ok(())
    }

    fn read_failed(&self, path: &Path, source: std::io::Error) -> Error {
        self.stats.record_directory_error();
        Error::DirectoryRead {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Regular files qualify directly; symlinks qualify when they point at one
async fn is_regular_file(path: &Path, file_type: FileType) -> bool {
    if file_type.is_file() {
        return true;
    }
    if file_type.is_symlink() {
        return fs::metadata(path).await.is_ok_and(|m| m.is_file());
    }
    false
}
