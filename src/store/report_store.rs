use super::backend::StorageBackend;
use crate::error::{ReportError, Result};
use crate::report::Report;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// Collection key used when none is configured
pub const DEFAULT_COLLECTION: &str = "interview_reports";

/// Degradation counters for a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreHealth {
    /// Saves or clears that did not reach the backend
    pub dropped_writes: u64,

    /// Reads that fell back to an empty collection
    pub failed_reads: u64,
}

/// Persisted, append-only collection of reports ordered by insertion
///
/// Every operation holds the store lock for its full read-modify-write, so
/// concurrent saves are never lost and readers never observe a half-written
/// collection.
pub struct ReportStore {
    backend: Arc<dyn StorageBackend>,
    collection: String,
    lock: Mutex<()>,
    dropped_writes: AtomicU64,
    failed_reads: AtomicU64,
}

impl ReportStore {
    pub fn new(backend: Arc<dyn StorageBackend>, collection: impl Into<String>) -> Self {
        Self {
            backend,
            collection: collection.into(),
            lock: Mutex::new(()),
            dropped_writes: AtomicU64::new(0),
            failed_reads: AtomicU64::new(0),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Append a report
    pub fn save(&self, report: &Report) {
        let _guard = self.guard();

        let result = self.read().and_then(|mut reports| {
            reports.push(report.clone());
            self.write(&reports).map(|_| reports.len())
        });

        match result {
            Ok(count) => debug!("Saved report #{} to {}", count, self.collection),
            Err(e) => {
                self.dropped_writes.fetch_add(1, Ordering::Relaxed);
                warn!("Error saving report to {}: {}", self.collection, e);
            }
        }
    }

    /// All reports, oldest first
    pub fn list(&self) -> Vec<Report> {
        let _guard = self.guard();
        self.read_or_empty()
    }

    /// The most recently saved report
    pub fn latest(&self) -> Option<Report> {
        let _guard = self.guard();
        self.read_or_empty().pop()
    }

    /// Remove every report in the collection
    pub fn clear(&self) {
        let _guard = self.guard();

        if let Err(e) = self.backend.remove(&self.collection) {
            self.dropped_writes.fetch_add(1, Ordering::Relaxed);
            warn!("Error clearing reports in {}: {}", self.collection, e);
        }
    }

    pub fn health(&self) -> StoreHealth {
        StoreHealth {
            dropped_writes: self.dropped_writes.load(Ordering::Relaxed),
            failed_reads: self.failed_reads.load(Ordering::Relaxed),
        }
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The guarded data is (), so a poisoned lock carries no broken state
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_or_empty(&self) -> Vec<Report> {
        match self.read() {
            Ok(reports) => reports,
            Err(e) => {
                self.failed_reads.fetch_add(1, Ordering::Relaxed);
                warn!("Error getting reports from {}: {}", self.collection, e);
                Vec::new()
            }
        }
    }

    fn read(&self) -> Result<Vec<Report>> {
        match self.backend.get(&self.collection)? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ReportError::StorageDegraded(format!("corrupt collection: {}", e))),
            None => Ok(Vec::new()),
        }
    }

    fn write(&self, reports: &[Report]) -> Result<()> {
        let bytes = serde_json::to_vec(reports)
            .map_err(|e| ReportError::StorageDegraded(format!("encode failed: {}", e)))?;
        self.backend.set(&self.collection, &bytes)
    }
}
