//! Handlers for registration sessions and step submissions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use udyam_core::session_id::is_well_formed_session_id;
use udyam_core::types::DbId;
use udyam_db::models::form_submission::SubmitStepData;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject path segments that cannot be a session ID before touching the store.
fn ensure_session_id(session_id: &str) -> AppResult<()> {
    if !is_well_formed_session_id(session_id) {
        return Err(AppError::BadRequest(format!(
            "Malformed session id '{session_id}'"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// POST /registrations
// ---------------------------------------------------------------------------

/// Start a new registration session.
pub async fn start_session(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let user = state.registration.start_session().await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

// ---------------------------------------------------------------------------
// GET /registrations/{session_id}
// ---------------------------------------------------------------------------

/// Get a session with all of its submissions.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    ensure_session_id(&session_id)?;
    let snapshot = state.registration.snapshot(&session_id).await?;
    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// POST /registrations/{session_id}/abandon
// ---------------------------------------------------------------------------

/// Abandon an in-progress session.
pub async fn abandon_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    ensure_session_id(&session_id)?;
    let user = state.registration.abandon_session(&session_id).await?;
    Ok(Json(DataResponse { data: user }))
}

// ---------------------------------------------------------------------------
// POST /registrations/{session_id}/steps/{step}
// ---------------------------------------------------------------------------

/// Submit the form data for one step.
///
/// Returns 201 with the per-field results even when validation fails; the
/// submission is stored with status `failed` in that case.
pub async fn submit_step(
    State(state): State<AppState>,
    Path((session_id, step)): Path<(String, i32)>,
    Json(body): Json<SubmitStepData>,
) -> AppResult<impl IntoResponse> {
    ensure_session_id(&session_id)?;
    let outcome = state
        .registration
        .submit_step(&session_id, step, body.form_data)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

// ---------------------------------------------------------------------------
// GET /registrations/{session_id}/steps/{step}
// ---------------------------------------------------------------------------

/// Get the latest submission for one step.
pub async fn get_latest_step(
    State(state): State<AppState>,
    Path((session_id, step)): Path<(String, i32)>,
) -> AppResult<impl IntoResponse> {
    ensure_session_id(&session_id)?;
    let submission = state
        .registration
        .latest_submission(&session_id, step)
        .await?;
    Ok(Json(DataResponse { data: submission }))
}

// ---------------------------------------------------------------------------
// PUT /registrations/{session_id}/submissions/{id}
// ---------------------------------------------------------------------------

/// Replace the form data of an earlier submission and re-run its checks.
pub async fn revise_submission(
    State(state): State<AppState>,
    Path((session_id, id)): Path<(String, DbId)>,
    Json(body): Json<SubmitStepData>,
) -> AppResult<impl IntoResponse> {
    ensure_session_id(&session_id)?;
    let outcome = state
        .registration
        .revise_submission(&session_id, id, body.form_data)
        .await?;
    Ok(Json(DataResponse { data: outcome }))
}
