use crate::store::DEFAULT_COLLECTION;
use serde::{Deserialize, Serialize};

/// Configuration for a practice session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "session-2025-10-28-interview")
    pub session_id: String,

    /// Storage key of this session's report collection
    pub collection: String,
}

impl SessionConfig {
    /// Session whose reports live under `<base_collection>:<session_id>`
    pub fn new(session_id: impl Into<String>, base_collection: &str) -> Self {
        let session_id = session_id.into();
        Self {
            collection: format!("{}:{}", base_collection, session_id),
            session_id,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(format!("session-{}", uuid::Uuid::new_v4()), DEFAULT_COLLECTION)
    }
}
