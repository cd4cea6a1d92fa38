//! Route definitions for registration sessions.
//!
//! Mounted at `/registrations` by `api_routes()`.
//!
//! ```text
//! POST   /                                   start_session
//! GET    /{session_id}                       get_session
//! POST   /{session_id}/abandon               abandon_session
//! POST   /{session_id}/steps/{step}          submit_step
//! GET    /{session_id}/steps/{step}          get_latest_step
//! PUT    /{session_id}/submissions/{id}      revise_submission
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::registration;
use crate::state::AppState;

/// Registration routes -- mounted at `/registrations`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(registration::start_session))
        .route("/{session_id}", get(registration::get_session))
        .route("/{session_id}/abandon", post(registration::abandon_session))
        .route(
            "/{session_id}/steps/{step}",
            get(registration::get_latest_step).post(registration::submit_step),
        )
        .route(
            "/{session_id}/submissions/{id}",
            put(registration::revise_submission),
        )
}
