pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub use rest::{
    discard_interview_handler, end_interview_handler, get_interview_handler, health_handler,
    send_turn_handler, start_interview_handler, upload_resume_handler,
};
pub use state::{AppState, SessionStore};

/// Builds the API router. CORS and Swagger UI are layered on by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/interviews", post(start_interview_handler))
        .route("/interviews/upload", post(upload_resume_handler))
        .route(
            "/interviews/{id}",
            get(get_interview_handler).delete(discard_interview_handler),
        )
        .route("/interviews/{id}/turns", post(send_turn_handler))
        .route("/interviews/{id}/end", post(end_interview_handler))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(app_state)
}
