//! Concurrency ceiling for in-flight requests.

use std::sync::Arc;
use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Bounds the number of requests executing at once.
///
/// Backed by a Tokio semaphore, which hands out permits in FIFO order. A permit
/// is released when the returned guard is dropped, so every exit path of the
/// holder (including early returns and panics) gives the slot back.
#[derive(Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl ConcurrencyGate {
    /// Creates a gate with `capacity` permits (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        ConcurrencyGate {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits for a free permit.
    ///
    /// # Errors
    ///
    /// Returns `AcquireError` only if the gate was closed.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, AcquireError> {
        Arc::clone(&self.semaphore).acquire_owned().await
    }

    /// Permits not currently held.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Rejects current and future waiters.
    pub fn close(&self) {
        self.semaphore.close();
    }
}
