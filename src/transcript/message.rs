use serde::{Deserialize, Serialize};

/// Label used for messages spoken by the learner
pub const SELF_LABEL: &str = "You";

/// Fallback label when the counterpart has no display name
const COUNTERPART_FALLBACK: &str = "Interviewer";

/// A single utterance captured during a practice session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptMessage {
    /// Spoken text
    pub message: String,

    /// Display name of the speaker
    pub name: String,

    /// Whether the learner said this (as opposed to the counterpart)
    pub is_self: bool,

    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl TranscriptMessage {
    pub fn from_self(message: impl Into<String>, timestamp: i64) -> Self {
        Self {
            message: message.into(),
            name: SELF_LABEL.to_string(),
            is_self: true,
            timestamp,
        }
    }

    pub fn from_counterpart(
        name: impl Into<String>,
        message: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            message: message.into(),
            name: name.into(),
            is_self: false,
            timestamp,
        }
    }

    /// Speaker label as it appears in the serialized transcript
    pub fn speaker_label(&self) -> &str {
        if self.is_self {
            SELF_LABEL
        } else if self.name.trim().is_empty() {
            COUNTERPART_FALLBACK
        } else {
            self.name.trim()
        }
    }
}
