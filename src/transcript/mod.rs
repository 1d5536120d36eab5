//! Transcript snapshot handed over by the real-time media layer
//!
//! The media layer delivers messages through callbacks while the session is
//! live; the report pipeline only ever sees the finished, ordered snapshot.

mod message;
mod options;

pub use message::{TranscriptMessage, SELF_LABEL};
pub use options::{infer_duration_minutes, iso_timestamp, ReportOptions};
