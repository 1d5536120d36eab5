//! HTTP API server for the practice UI
//!
//! This module provides a REST API around report generation:
//! - POST /api/report - Generate a report from a transcript (no storage)
//! - POST /sessions - Open a practice session
//! - DELETE /sessions/:id - Close a session (stored reports are kept)
//! - POST /sessions/:id/transcript - Append transcript messages
//! - GET /sessions/:id/transcript - Get the transcript snapshot
//! - POST /sessions/:id/report - Get the session report, generating it once
//! - GET /sessions/:id/report - Latest stored report
//! - GET /sessions/:id/reports - All stored reports
//! - DELETE /sessions/:id/reports - Clear stored reports
//! - GET /sessions/:id/status - Generation status
//! - GET /sessions/:id/stats - Session statistics
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
