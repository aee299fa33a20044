//! # Interview Session API
//!
//! Drives the session state machine over HTTP. Every mutating endpoint returns
//! the freshly rendered [`View`].
//!
//! ## Endpoints
//!
//! - `POST /api/sessions` - Create a session
//! - `GET /api/sessions/{id}` - Render the current view
//! - `POST /api/sessions/{id}/preferences` - Submit the preference form
//! - `POST /api/sessions/{id}/begin` - Ask for the opening question
//! - `POST /api/sessions/{id}/messages` - Send one user message
//! - `DELETE /api/sessions/{id}` - End a session

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use interviewbot_core::{Preferences, SessionError, SessionEvent, View};
use interviewbot_logging::LogEvent;

use super::store::SharedSession;
use super::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesRequest {
    #[serde(default)]
    pub user_name: String,
    pub interviewer: String,
    pub role: String,
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

// ============================================================================
// Handlers
// ============================================================================

pub async fn create_session(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let session_id = state.store.create();
    debug!(%session_id, active_sessions = state.store.len(), "Session created");
    state.logger.log(&LogEvent::SessionCreated {
        session_id: session_id.clone(),
    });

    Json(CreateSessionResponse { session_id })
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<View>, ApiError> {
    let session = lookup(&state, &id)?;
    let session = session.lock().await;
    Ok(Json(state.controller.render(&session)))
}

pub async fn submit_preferences(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PreferencesRequest>,
) -> Result<Json<View>, ApiError> {
    let session = lookup(&state, &id)?;
    let preferences = Preferences::parse(
        &request.user_name,
        &request.interviewer,
        &request.role,
        &request.topic,
    )
    .map_err(session_error)?;

    dispatch(&state, session, SessionEvent::SubmitPreferences(preferences)).await
}

pub async fn begin_interview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<View>, ApiError> {
    let session = lookup(&state, &id)?;
    dispatch(&state, session, SessionEvent::BeginInterview).await
}

pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<View>, ApiError> {
    let session = lookup(&state, &id)?;
    dispatch(&state, session, SessionEvent::UserMessage(request.content)).await
}

/// End a session. Called by the page when it is closed.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.store.remove(&id) {
        return Err(not_found(&id));
    }
    state.logger.log(&LogEvent::SessionClosed { session_id: id });
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Helpers
// ============================================================================

fn lookup(state: &AppState, id: &str) -> Result<SharedSession, ApiError> {
    state.store.get(id).ok_or_else(|| not_found(id))
}

fn not_found(id: &str) -> ApiError {
    error_response(StatusCode::NOT_FOUND, format!("Session not found: {}", id))
}

/// Apply an event while holding the session lock for the whole turn
async fn dispatch(
    state: &AppState,
    session: SharedSession,
    event: SessionEvent,
) -> Result<Json<View>, ApiError> {
    let mut session = session.lock().await;

    state
        .controller
        .handle(&mut session, event)
        .await
        .map(Json)
        .map_err(session_error)
}

fn session_error(error: SessionError) -> ApiError {
    let status = match &error {
        SessionError::InvalidPreference { .. } => StatusCode::BAD_REQUEST,
        SessionError::AlreadySubmitted | SessionError::NotSubmitted | SessionError::NotStarted => {
            StatusCode::CONFLICT
        }
        SessionError::Completion(_) => StatusCode::BAD_GATEWAY,
    };
    error_response(status, error.to_string())
}

fn error_response(status: StatusCode, message: String) -> ApiError {
    (status, Json(ErrorResponse { error: message }))
}
