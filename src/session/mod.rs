//! Practice session management
//!
//! This module provides the `PracticeSession` abstraction that manages:
//! - The transcript snapshot handed over by the media layer
//! - The session's report collection
//! - At-most-once report generation per session
//! - Generation status for pollers

mod config;
mod session;
mod stats;

pub use config::SessionConfig;
pub use session::PracticeSession;
pub use stats::{ReportSource, SessionStats};
