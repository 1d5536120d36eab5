use crate::store::StoreHealth;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics about a practice session
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    pub session_id: String,

    /// When the session was opened
    pub created_at: DateTime<Utc>,

    /// Messages in the transcript snapshot
    pub message_count: usize,

    /// Messages spoken by the learner
    pub self_message_count: usize,

    /// Duration inferred from message timestamps, in minutes
    pub duration_minutes: u32,

    /// Reports currently stored for the session
    pub report_count: usize,

    /// Model calls made by this session
    pub generations: usize,

    pub storage: StoreHealth,
}

/// Where a session report came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSource {
    /// Reused from the report store, no model call
    Stored,
    /// Produced by a model call during this request
    Generated,
}
