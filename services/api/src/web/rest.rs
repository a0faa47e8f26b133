//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::interview_error_response;
use crate::web::{
    protocol::{
        FeedbackReportView, HealthResponse, InsightsView, ScoreView, SendTurnRequest,
        SendTurnResponse, SessionView, StartInterviewRequest, StartInterviewResponse, TurnRole,
        TurnView,
    },
    state::{AppState, SessionHandle},
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use interview_coach_core::GREETING;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        start_interview_handler,
        upload_resume_handler,
        get_interview_handler,
        send_turn_handler,
        end_interview_handler,
        discard_interview_handler,
    ),
    components(
        schemas(
            HealthResponse,
            StartInterviewRequest,
            StartInterviewResponse,
            InsightsView,
            SessionView,
            TurnView,
            TurnRole,
            SendTurnRequest,
            SendTurnResponse,
            FeedbackReportView,
            ScoreView,
        )
    ),
    tags(
        (name = "Interview Coach API", description = "API endpoints for résumé-driven mock interviews.")
    )
)]
pub struct ApiDoc;

type HandlerError = (StatusCode, String);

/// Looks up a session handle or answers 404.
async fn find_session(
    app_state: &AppState,
    session_id: Uuid,
) -> Result<SessionHandle, HandlerError> {
    app_state.sessions.get(session_id).await.ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("Interview session {} was not found", session_id),
        )
    })
}

/// Creates the session, stores it, and builds the creation response.
async fn start_interview(
    app_state: &AppState,
    resume: String,
) -> Result<(StatusCode, Json<StartInterviewResponse>), HandlerError> {
    let session = app_state
        .orchestrator
        .submit_resume(resume)
        .map_err(interview_error_response)?;
    let insights = InsightsView::from(session.insights());
    let session_id = app_state.sessions.insert(session).await;
    info!("Interview session {} created.", session_id);

    Ok((
        StatusCode::CREATED,
        Json(StartInterviewResponse {
            session_id,
            insights,
            greeting: GREETING.to_string(),
        }),
    ))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Liveness check.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "The service is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Start an interview from pasted résumé text.
#[utoipa::path(
    post,
    path = "/interviews",
    request_body = StartInterviewRequest,
    responses(
        (status = 201, description = "Interview created", body = StartInterviewResponse),
        (status = 400, description = "The résumé is empty")
    )
)]
pub async fn start_interview_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<StartInterviewRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    start_interview(&app_state, payload.resume).await
}

/// Start an interview by uploading a résumé file.
///
/// Accepts a multipart/form-data request with a single UTF-8 text file part.
#[utoipa::path(
    post,
    path = "/interviews/upload",
    request_body(content_type = "multipart/form-data", description = "The résumé as a text file."),
    responses(
        (status = 201, description = "Interview created", body = StartInterviewResponse),
        (status = 400, description = "Bad request (e.g., missing file, non-UTF-8 or empty résumé)"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn upload_resume_handler(
    State(app_state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HandlerError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read multipart data: {}", e),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "Multipart form must include a file".to_string(),
            )
        })?;

    let file_name = field.file_name().unwrap_or("resume.txt").to_string();
    let data = field.bytes().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to read file bytes: {}", e),
        )
    })?;
    let resume = String::from_utf8(data.to_vec()).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Uploaded file is not valid UTF-8 text: {}", e),
        )
    })?;
    info!("Received résumé upload '{}' ({} characters).", file_name, resume.chars().count());

    start_interview(&app_state, resume).await
}

/// Fetch the transcript, insights and status of an interview.
#[utoipa::path(
    get,
    path = "/interviews/{id}",
    params(("id" = Uuid, Path, description = "The interview session id.")),
    responses(
        (status = 200, description = "The interview", body = SessionView),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn get_interview_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    let handle = find_session(&app_state, session_id).await?;
    let session = handle.lock().await;
    Ok(Json(SessionView::from(&*session)))
}

/// Send the candidate's answer and receive the interviewer's next question.
#[utoipa::path(
    post,
    path = "/interviews/{id}/turns",
    params(("id" = Uuid, Path, description = "The interview session id.")),
    request_body = SendTurnRequest,
    responses(
        (status = 200, description = "The interviewer's reply", body = SendTurnResponse),
        (status = 400, description = "The answer is empty"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "The interview has already ended")
    )
)]
pub async fn send_turn_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<SendTurnRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let handle = find_session(&app_state, session_id).await?;
    let mut session = handle.lock().await;

    let reply = app_state
        .orchestrator
        .send_turn(&mut session, &payload.message)
        .await
        .map_err(interview_error_response)?;

    Ok(Json(SendTurnResponse { reply }))
}

/// End the interview and receive the feedback report.
///
/// Calling this again returns the same report.
#[utoipa::path(
    post,
    path = "/interviews/{id}/end",
    params(("id" = Uuid, Path, description = "The interview session id.")),
    responses(
        (status = 200, description = "The feedback report", body = FeedbackReportView),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn end_interview_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    let handle = find_session(&app_state, session_id).await?;
    let mut session = handle.lock().await;

    match app_state.orchestrator.end_session(&mut session).await {
        Ok(report) => Ok(Json(FeedbackReportView::from(&report))),
        Err(e) => {
            error!("Failed to end interview {}: {:?}", session_id, e);
            Err(interview_error_response(e))
        }
    }
}

/// Discard an interview so the candidate can start over.
#[utoipa::path(
    delete,
    path = "/interviews/{id}",
    params(("id" = Uuid, Path, description = "The interview session id.")),
    responses(
        (status = 204, description = "Interview discarded"),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn discard_interview_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, HandlerError> {
    if app_state.sessions.discard(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((
            StatusCode::NOT_FOUND,
            format!("Interview session {} was not found", session_id),
        ))
    }
}
