use crate::config::{StorageBackendKind, StorageConfig};
use crate::error::{ReportError, Result};
use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Key-value storage underneath a report store
///
/// Implementations:
/// - Memory: process-local map (tests, ephemeral sessions)
/// - Sled: embedded durable database
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Storage backend factory
pub struct StorageBackendFactory;

impl StorageBackendFactory {
    /// Create the backend selected by the storage configuration
    pub fn create(config: &StorageConfig) -> anyhow::Result<Arc<dyn StorageBackend>> {
        let backend: Arc<dyn StorageBackend> = match config.backend {
            StorageBackendKind::Memory => Arc::new(MemoryBackend::new()),
            StorageBackendKind::Sled => Arc::new(
                SledBackend::open(&config.path).with_context(|| {
                    format!("Failed to open report database at {}", config.path.display())
                })?,
            ),
        };
        info!("Report storage: {}", backend.name());
        Ok(backend)
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries
            .lock()
            .map_err(|_| ReportError::StorageDegraded("memory backend lock poisoned".to_string()))
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

pub struct SledBackend {
    db: sled::Db,
}

impl SledBackend {
    /// Opens or creates a sled database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path.as_ref())?;
        info!("Opened report database at {}", path.as_ref().display());
        Ok(Self { db })
    }
}

impl StorageBackend for SledBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.db.get(key.as_bytes())?.map(|v| v.to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.db.insert(key.as_bytes(), value)?;
        self.db.flush()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db.remove(key.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "sled"
    }
}
