//! Tree-wide completion barrier
//!
//! Every traversal and job task holds a [`TaskGuard`] obtained from
//! [`CompletionTracker::register`] before the task is spawned. Dropping the
//! guard deregisters the task. A parent registers its children before its own
//! guard drops, so the count cannot touch zero while descendant work is still
//! pending, however many tasks the tree eventually fans out to.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Counter of outstanding tasks; clones share the same count
#[derive(Debug, Clone, Default)]
pub struct CompletionTracker {
    inner: Arc<TrackerInner>,
}

#[derive(Debug, Default)]
struct TrackerInner {
    outstanding: AtomicUsize,
    drained: Notify,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more outstanding task
    ///
    /// Call before spawning the task the guard is handed to.
    pub fn register(&self) -> TaskGuard {
        self.inner.outstanding.fetch_add(1, Ordering::SeqCst);
        TaskGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of registered tasks that have not finished yet
    pub fn outstanding(&self) -> usize {
        self.inner.outstanding.load(Ordering::SeqCst)
    }

    /// Wait until every registered task has finished
    ///
    /// Returns immediately when nothing is outstanding.
    pub async fn wait_all(&self) {
        loop {
            // Created before the check so a wakeup between check and await is not lost
            let drained = self.inner.drained.notified();
            if self.outstanding() == 0 {
                return;
            }
            drained.await;
        }
    }
}

/// Registration of one task; deregisters exactly once when dropped
#[derive(Debug)]
#[must_use = "dropping the guard immediately deregisters the task"]
pub struct TaskGuard {
    inner: Arc<TrackerInner>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if self.inner.outstanding.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.drained.notify_waiters();
        }
    }
}
