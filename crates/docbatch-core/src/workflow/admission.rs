//! Counting admission gate for generation units

use crate::error::{DocBatchError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Semaphore that also tracks how many slots are held and the peak seen
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    in_use: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

/// A held slot. Dropping it releases the slot, on every exit path.
#[derive(Debug)]
pub struct AdmissionSlot {
    in_use: Arc<AtomicUsize>,
    _permit: OwnedSemaphorePermit,
}

impl Drop for AdmissionSlot {
    fn drop(&mut self) {
        // Runs before the permit field is dropped, so `in_use` never exceeds capacity
        self.in_use.fetch_sub(1, Ordering::SeqCst);
    }
}

impl AdmissionGate {
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            in_use: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wait until a slot is free and take it
    pub async fn acquire(&self) -> Result<AdmissionSlot> {
        let permit = self.semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| DocBatchError::Processing("Admission gate closed".to_string()))?;

        let held = self.in_use.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(held, Ordering::SeqCst);

        Ok(AdmissionSlot {
            in_use: self.in_use.clone(),
            _permit: permit,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn in_use(&self) -> usize {
        self.in_use.load(Ordering::SeqCst)
    }

    /// Highest number of slots held at once since creation
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}
