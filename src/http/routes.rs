use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    // The practice UI is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Stateless generation
        .route("/api/report", post(handlers::generate_report))
        // Sessions
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/:session_id", delete(handlers::close_session))
        .route(
            "/sessions/:session_id/transcript",
            get(handlers::get_transcript).post(handlers::append_transcript),
        )
        .route(
            "/sessions/:session_id/report",
            get(handlers::latest_report).post(handlers::obtain_report),
        )
        .route(
            "/sessions/:session_id/reports",
            get(handlers::list_reports).delete(handlers::clear_reports),
        )
        .route("/sessions/:session_id/status", get(handlers::get_status))
        .route("/sessions/:session_id/stats", get(handlers::get_stats))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
