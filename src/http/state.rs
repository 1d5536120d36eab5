use crate::generation::ReportGenerator;
use crate::session::{PracticeSession, SessionConfig};
use crate::store::StorageBackend;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Open practice sessions (session_id → session), removed by DELETE /sessions/:id
    pub sessions: Arc<RwLock<HashMap<String, Arc<PracticeSession>>>>,

    /// Generator shared by every session
    pub generator: ReportGenerator,

    /// Storage shared by every session's report collection
    pub backend: Arc<dyn StorageBackend>,

    /// Base key of the per-session report collections
    pub collection: String,
}

impl AppState {
    pub fn new(
        generator: ReportGenerator,
        backend: Arc<dyn StorageBackend>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            generator,
            backend,
            collection: collection.into(),
        }
    }

    pub fn session_config(&self, session_id: String) -> SessionConfig {
        SessionConfig::new(session_id, &self.collection)
    }

    pub async fn session(&self, session_id: &str) -> Option<Arc<PracticeSession>> {
        self.sessions.read().await.get(session_id).cloned()
    }
}
