//! Admission gate bounding concurrent analysis invocations
//!
//! A counting semaphore with a capacity fixed at construction. Permits are
//! released when the [`GatePermit`] is dropped, so every exit path of a job
//! (including a failed invocation) gives its permit back.

use gainwalk_common::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Shared admission gate; clones refer to the same permits
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    inner: Arc<GateInner>,
}

#[derive(Debug)]
struct GateInner {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl AdmissionGate {
    /// Create a gate admitting at most `capacity` holders at once
    ///
    /// Returns `Error::Config` if `capacity` is zero or larger than the
    /// semaphore supports.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 || capacity > Semaphore::MAX_PERMITS {
            return Err(Error::Config(format!(
                "Admission gate capacity out of range: {}",
                capacity
            )));
        }

        Ok(Self {
            inner: Arc::new(GateInner {
                semaphore: Arc::new(Semaphore::new(capacity)),
                capacity,
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }),
        })
    }

    /// Wait until a permit is free, then hold it until the returned guard drops
    pub async fn acquire(&self) -> Result<GatePermit> {
        let permit = Arc::clone(&self.inner.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| Error::GateClosed)?;

        let held = self.inner.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.peak.fetch_max(held, Ordering::SeqCst);

        Ok(GatePermit {
            _permit: permit,
            gate: Arc::clone(&self.inner),
        })
    }

    /// Fixed number of permits
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Permits currently held
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of permits ever held at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.inner.peak.load(Ordering::SeqCst)
    }
}

/// One held admission permit
#[derive(Debug)]
pub struct GatePermit {
    gate: Arc<GateInner>,
    _permit: OwnedSemaphorePermit,
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.gate.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
