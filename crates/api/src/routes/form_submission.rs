use axum::routing::get;
use axum::Router;

use crate::handlers::form_submission;
use crate::state::AppState;

/// Submission reporting routes -- mounted at `/form-submissions`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(form_submission::list_submitted_between))
}
