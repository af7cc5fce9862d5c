//! Stand-in for the analysis tool
//!
//! Records every invocation and the highest number of invocations observed
//! running at once. Can be told to fail for selected invocations.

use async_trait::async_trait;
use gainwalk::ToolExecutor;
use gainwalk_common::InvocationFailure;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

type FailPredicate = Box<dyn Fn(&[OsString]) -> bool + Send + Sync>;

pub struct MockTool {
    program: PathBuf,
    delay: Duration,
    fail_when: FailPredicate,
    calls: Mutex<Vec<Vec<OsString>>>,
    running: AtomicUsize,
    peak: AtomicUsize,
}

impl MockTool {
    /// Tool that succeeds immediately
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("mock-rsgain"),
            delay: Duration::ZERO,
            fail_when: Box::new(|_| false),
            calls: Mutex::new(Vec::new()),
            running: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Keep every invocation running for `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail invocations whose argument list satisfies `predicate`
    pub fn failing_when(
        mut self,
        predicate: impl Fn(&[OsString]) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.fail_when = Box::new(predicate);
        self
    }

    /// Fail every invocation
    pub fn always_failing(self) -> Self {
        self.failing_when(|_| true)
    }

    /// Argument lists of completed invocations, in completion order
    pub fn calls(&self) -> Vec<Vec<OsString>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn peak_running(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolExecutor for MockTool {
    fn program(&self) -> &Path {
        &self.program
    }

    async fn execute(&self, args: &[OsString]) -> Result<(), InvocationFailure> {
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.running.fetch_sub(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(args.to_vec());

        if (self.fail_when)(args) {
            Err(InvocationFailure::Launch(std::io::Error::new(
                std::io::ErrorKind::Other,
                "mock tool failure",
            )))
        } else {
            Ok(())
        }
    }
}
