//! Run statistics shared by all traversal and job tasks

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lock-free counters updated concurrently during a walk
#[derive(Debug, Default)]
pub struct RunStatistics {
    directories_scanned: AtomicUsize,
    directory_errors: AtomicUsize,
    jobs_dispatched: AtomicUsize,
    jobs_failed: AtomicUsize,
    files_submitted: AtomicUsize,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_directory_scanned(&self) {
        self.directories_scanned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_directory_error(&self) {
        self.directory_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// A job covering `files` audio files was handed to a runner
    pub fn record_job_dispatched(&self, files: usize) {
        self.jobs_dispatched.fetch_add(1, Ordering::Relaxed);
        self.files_submitted.fetch_add(files, Ordering::Relaxed);
    }

    pub fn record_job_failed(&self) {
        self.jobs_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the counters; `peak_in_flight` comes from the admission gate
    pub fn summary(&self, peak_in_flight: usize) -> WalkSummary {
        WalkSummary {
            directories_scanned: self.directories_scanned.load(Ordering::Relaxed),
            directory_errors: self.directory_errors.load(Ordering::Relaxed),
            jobs_dispatched: self.jobs_dispatched.load(Ordering::Relaxed),
            jobs_failed: self.jobs_failed.load(Ordering::Relaxed),
            files_submitted: self.files_submitted.load(Ordering::Relaxed),
            peak_in_flight,
        }
    }
}

/// Totals for a completed walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Directories successfully enumerated
    pub directories_scanned: usize,
    /// Directories that could not be enumerated
    pub directory_errors: usize,
    pub jobs_dispatched: usize,
    pub jobs_failed: usize,
    /// Audio files handed to the analysis tool across all jobs
    pub files_submitted: usize,
    /// Most analysis invocations observed running at once
    pub peak_in_flight: usize,
}

impl fmt::Display for WalkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} directories scanned ({} unreadable), {} jobs dispatched ({} failed), {} files submitted, peak {} concurrent",
            self.directories_scanned,
            self.directory_errors,
            self.jobs_dispatched,
            self.jobs_failed,
            self.files_submitted,
            self.peak_in_flight
        )
    }
}
