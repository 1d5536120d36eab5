use super::state::AppState;
use crate::error::ReportError;
use crate::report::Report;
use crate::session::{PracticeSession, ReportSource};
use crate::transcript::{ReportOptions, TranscriptMessage};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    /// Optional session ID (if not provided, generate UUID)
    pub session_id: Option<String>,

    /// Optional transcript captured so far
    #[serde(default)]
    pub transcript: Vec<TranscriptMessage>,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AppendTranscriptResponse {
    pub session_id: String,
    pub message_count: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionReportRequest {
    /// ISO-8601 request time (defaults to now)
    pub timestamp: Option<String>,

    /// Session length in minutes (defaults to the transcript span)
    pub duration: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SessionReportResponse {
    pub session_id: String,
    pub source: ReportSource,
    pub report: Report,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message,
            kind: None,
        }),
    )
        .into_response()
}

fn generation_error(e: &ReportError) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: e.to_string(),
            kind: Some(e.kind()),
        }),
    )
        .into_response()
}

fn session_not_found(session_id: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        format!("Session {} not found", session_id),
    )
}

/// Parse an optional JSON body: empty means defaults, anything else must parse
fn optional_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        let status = if e.is_data() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::BAD_REQUEST
        };
        warn!("Rejected request body: {}", e);
        error_response(status, format!("Invalid request body: {}", e))
    })
}

async fn find_session(state: &AppState, session_id: &str) -> Result<Arc<PracticeSession>, Response> {
    state
        .session(session_id)
        .await
        .ok_or_else(|| session_not_found(session_id))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/report
/// Generate a report from a full transcript without touching any store
pub async fn generate_report(
    State(state): State<AppState>,
    Json(options): Json<ReportOptions>,
) -> impl IntoResponse {
    info!(
        "Generating report for {} messages ({} min)",
        options.transcript.len(),
        options.duration
    );

    match state.generator.generate(&options, None).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!("Error generating report: {}", e);
            generation_error(&e)
        }
    }
}

/// POST /sessions
/// Open a new practice session
pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> impl IntoResponse {
    let req: CreateSessionRequest = match optional_body(&body) {
        Ok(req) => req,
        Err(resp) => return resp,
    };
    let session_id = req
        .session_id
        .unwrap_or_else(|| format!("session-{}", uuid::Uuid::new_v4()));
    let config = state.session_config(session_id.clone());

    let mut sessions = state.sessions.write().await;
    if sessions.contains_key(&session_id) {
        return error_response(
            StatusCode::CONFLICT,
            format!("Session {} already exists", session_id),
        );
    }

    let session = Arc::new(PracticeSession::new(config, Arc::clone(&state.backend)));
    let count = session.record_all(req.transcript).await;
    sessions.insert(session_id.clone(), session);

    info!("Session {} opened with {} messages", session_id, count);

    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: session_id.clone(),
            status: "open".to_string(),
            message: format!("Session {} opened", session_id),
        }),
    )
        .into_response()
}

/// DELETE /sessions/:session_id
/// Close a session and drop its transcript; stored reports stay in the store
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.sessions.write().await.remove(&session_id) {
        Some(_) => {
            info!("Session {} closed", session_id);
            StatusCode::NO_CONTENT.into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// POST /sessions/:session_id/transcript
/// Append messages delivered by the media layer
pub async fn append_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(messages): Json<Vec<TranscriptMessage>>,
) -> impl IntoResponse {
    let session = match find_session(&state, &session_id).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let message_count = session.record_all(messages).await;

    (
        StatusCode::OK,
        Json(AppendTranscriptResponse {
            session_id,
            message_count,
        }),
    )
        .into_response()
}

/// GET /sessions/:session_id/transcript
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Ok(session) => (StatusCode::OK, Json(session.transcript().await)).into_response(),
        Err(resp) => resp,
    }
}

/// POST /sessions/:session_id/report
/// Return the stored report, or generate and store one
pub async fn obtain_report(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    let session = match find_session(&state, &session_id).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let req: SessionReportRequest = match optional_body(&body) {
        Ok(req) => req,
        Err(resp) => return resp,
    };

    if session.store().latest().is_none() && session.transcript().await.is_empty() {
        warn!("Report requested for session {} with no transcript", session_id);
        return error_response(
            StatusCode::BAD_REQUEST,
            "No transcript found".to_string(),
        );
    }

    match session
        .report(&state.generator, req.timestamp, req.duration, None)
        .await
    {
        Ok((report, source)) => (
            StatusCode::OK,
            Json(SessionReportResponse {
                session_id,
                source,
                report,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Error generating report for session {}: {}", session_id, e);
            generation_error(&e)
        }
    }
}

/// GET /sessions/:session_id/report
/// Latest stored report
pub async fn latest_report(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let session = match find_session(&state, &session_id).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    match session.store().latest() {
        Some(report) => (StatusCode::OK, Json(report)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("No report for session {}", session_id),
        ),
    }
}

/// GET /sessions/:session_id/reports
pub async fn list_reports(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Ok(session) => (StatusCode::OK, Json(session.store().list())).into_response(),
        Err(resp) => resp,
    }
}

/// DELETE /sessions/:session_id/reports
pub async fn clear_reports(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Ok(session) => {
            session.clear_reports();
            StatusCode::NO_CONTENT.into_response()
        }
        Err(resp) => resp,
    }
}

/// GET /sessions/:session_id/status
/// Latest generation status
pub async fn get_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Ok(session) => (StatusCode::OK, Json(session.status())).into_response(),
        Err(resp) => resp,
    }
}

/// GET /sessions/:session_id/stats
pub async fn get_stats(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Ok(session) => (StatusCode::OK, Json(session.stats().await)).into_response(),
        Err(resp) => resp,
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
