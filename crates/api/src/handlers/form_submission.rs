//! Reporting queries over form submissions.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use udyam_core::types::Timestamp;
use udyam_db::repositories::FormSubmissionRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Default page size for submission listings.
const DEFAULT_LIMIT: i64 = 50;

/// Upper bound on page size.
const MAX_LIMIT: i64 = 500;

/// Query parameters for `GET /form-submissions`.
#[derive(Debug, Deserialize)]
pub struct SubmittedRangeParams {
    pub from: Timestamp,
    pub to: Timestamp,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /form-submissions?from=&to= -- submissions in `[from, to)`.
pub async fn list_submitted_between(
    State(state): State<AppState>,
    Query(params): Query<SubmittedRangeParams>,
) -> AppResult<impl IntoResponse> {
    if params.from >= params.to {
        return Err(AppError::BadRequest(
            "'from' must be earlier than 'to'".to_string(),
        ));
    }

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let submissions =
        FormSubmissionRepo::list_submitted_between(&state.pool, params.from, params.to, limit, offset)
            .await?;
    Ok(Json(DataResponse { data: submissions }))
}
