//! Append-only report persistence
//!
//! `ReportStore` keeps one named collection of reports in a key-value backend.
//! Storage failures never reach the caller: they are logged, counted and
//! treated as "no report found".

mod backend;
mod report_store;

pub use backend::{MemoryBackend, SledBackend, StorageBackend, StorageBackendFactory};
pub use report_store::{ReportStore, StoreHealth, DEFAULT_COLLECTION};
