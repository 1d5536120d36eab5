use super::message::TranscriptMessage;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Inputs for one generation attempt
///
/// `timestamp` and `duration` are trusted caller inputs and are attached to the
/// finished report verbatim; the model never supplies them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Chronologically ordered transcript snapshot
    pub transcript: Vec<TranscriptMessage>,

    /// Session length in minutes
    pub duration: u32,

    /// ISO-8601 creation time of the request
    pub timestamp: String,
}

impl ReportOptions {
    pub fn new(transcript: Vec<TranscriptMessage>, duration: u32, timestamp: String) -> Self {
        Self {
            transcript,
            duration,
            timestamp,
        }
    }

    /// Build options stamped with the current time and a duration inferred from
    /// the transcript's first and last message.
    pub fn from_transcript(transcript: Vec<TranscriptMessage>) -> Self {
        let duration = infer_duration_minutes(&transcript);
        Self::new(transcript, duration, iso_timestamp())
    }
}

/// Current UTC time with millisecond precision, e.g. `2025-01-31T09:15:02.123Z`
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Span between the first and last message, rounded up to whole minutes
pub fn infer_duration_minutes(transcript: &[TranscriptMessage]) -> u32 {
    let (Some(first), Some(last)) = (transcript.first(), transcript.last()) else {
        return 0;
    };

    let span_ms = last.timestamp.saturating_sub(first.timestamp).max(0);
    let minutes = span_ms / 60_000 + i64::from(span_ms % 60_000 != 0);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
