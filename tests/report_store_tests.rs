// Integration tests for report persistence
//
// These tests verify append-only semantics, reuse of the latest report,
// durability across reopen, and degradation when the backend fails.

mod common;

use anyhow::Result;
use common::valid_payload;
use practice_report::error::Result as StoreResult;
use practice_report::{
    validate_report, MemoryBackend, Report, ReportError, ReportStore, SledBackend, StorageBackend,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn report(score: u32, timestamp: &str) -> Report {
    let draft = validate_report(&valid_payload(score)).expect("fixture payload is valid");
    Report::new(draft, timestamp.to_string(), 12)
}

fn memory_store() -> ReportStore {
    ReportStore::new(Arc::new(MemoryBackend::new()), "interview_reports")
}

/// Backend whose reads and writes can be switched off
#[derive(Default)]
struct FlakyBackend {
    inner: MemoryBackend,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl StorageBackend for FlakyBackend {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ReportError::StorageDegraded("read failed".into()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ReportError::StorageDegraded("quota exceeded".into()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ReportError::StorageDegraded("quota exceeded".into()));
        }
        self.inner.remove(key)
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

#[test]
fn test_empty_store() {
    let store = memory_store();
    assert!(store.latest().is_none());
    assert!(store.list().is_empty());
}

#[test]
fn test_save_then_latest_roundtrip() {
    let store = memory_store();
    let r = report(72, "2025-10-27T14:30:00.000Z");

    store.save(&r);

    assert_eq!(store.latest(), Some(r));
}

#[test]
fn test_list_grows_by_one_per_save_in_insertion_order() {
    let store = memory_store();
    let reports: Vec<Report> = (0..3)
        .map(|i| report(60 + i, &format!("2025-10-27T14:3{}:00.000Z", i)))
        .collect();

    for (i, r) in reports.iter().enumerate() {
        store.save(r);
        assert_eq!(store.list().len(), i + 1);
    }

    assert_eq!(store.list(), reports);
    assert_eq!(store.latest().as_ref(), reports.last());
}

#[test]
fn test_clear_empties_collection() {
    let store = memory_store();
    store.save(&report(50, "2025-10-27T14:30:00.000Z"));
    store.clear();
    assert!(store.latest().is_none());
    assert_eq!(store.health().dropped_writes, 0);
}

#[test]
fn test_collections_are_independent() {
    let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
    let a = ReportStore::new(backend.clone(), "reports:a");
    let b = ReportStore::new(backend, "reports:b");

    a.save(&report(50, "2025-10-27T14:30:00.000Z"));

    assert_eq!(a.list().len(), 1);
    assert!(b.latest().is_none());
}

#[test]
fn test_stored_json_uses_wire_field_names() -> Result<()> {
    let backend = Arc::new(MemoryBackend::new());
    let store = ReportStore::new(backend.clone(), "interview_reports");
    store.save(&report(72, "2025-10-27T14:30:00.000Z"));

    let raw = backend.get("interview_reports")?.expect("collection written");
    let json: serde_json::Value = serde_json::from_slice(&raw)?;
    let first = &json[0];
    assert_eq!(first["score"], 72.0);
    assert_eq!(first["tone"], "encouraging");
    assert_eq!(first["duration"], 12);
    assert!(first["feedback"]["practiceTips"].is_array());
    assert_eq!(first["timestamp"], "2025-10-27T14:30:00.000Z");
    Ok(())
}

#[test]
fn test_sled_store_survives_reopen() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let r = report(81, "2025-10-27T14:30:00.000Z");

    {
        let store = ReportStore::new(Arc::new(SledBackend::open(dir.path())?), "interview_reports");
        store.save(&r);
    }

    let store = ReportStore::new(Arc::new(SledBackend::open(dir.path())?), "interview_reports");
    assert_eq!(store.latest(), Some(r));
    Ok(())
}

#[test]
fn test_failed_write_is_absorbed_and_counted() {
    let backend = Arc::new(FlakyBackend::default());
    let store = ReportStore::new(backend.clone(), "interview_reports");
    let kept = report(70, "2025-10-27T14:30:00.000Z");
    store.save(&kept);

    backend.fail_writes.store(true, Ordering::SeqCst);
    store.save(&report(90, "2025-10-27T14:40:00.000Z"));
    store.clear();

    assert_eq!(store.health().dropped_writes, 2);
    assert_eq!(store.list(), vec![kept]);
}

#[test]
fn test_failed_read_degrades_to_empty() {
    let backend = Arc::new(FlakyBackend::default());
    let store = ReportStore::new(backend.clone(), "interview_reports");
    store.save(&report(70, "2025-10-27T14:30:00.000Z"));

    backend.fail_reads.store(true, Ordering::SeqCst);

    assert!(store.latest().is_none());
    assert!(store.list().is_empty());
    assert_eq!(store.health().failed_reads, 2);
}

#[test]
fn test_save_during_read_outage_does_not_clobber_collection() {
    let backend = Arc::new(FlakyBackend::default());
    let store = ReportStore::new(backend.clone(), "interview_reports");
    let first = report(70, "2025-10-27T14:30:00.000Z");
    store.save(&first);

    backend.fail_reads.store(true, Ordering::SeqCst);
    store.save(&report(90, "2025-10-27T14:40:00.000Z"));
    backend.fail_reads.store(false, Ordering::SeqCst);

    assert_eq!(store.list(), vec![first]);
    assert_eq!(store.health().dropped_writes, 1);
}

#[test]
fn test_corrupt_collection_reads_as_empty() -> Result<()> {
    let backend = Arc::new(MemoryBackend::new());
    backend.set("interview_reports", b"{not json")?;
    let store = ReportStore::new(backend, "interview_reports");

    assert!(store.latest().is_none());
    assert_eq!(store.health().failed_reads, 1);
    Ok(())
}

#[test]
fn test_concurrent_saves_are_not_lost() {
    let store = Arc::new(memory_store());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for j in 0..10 {
                    store.save(&report(i * 10 + j, "2025-10-27T14:30:00.000Z"));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.list().len(), 80);
}
