//! Route definitions for form schemas.
//!
//! Mounted at `/form-schemas` by `api_routes()`.
//!
//! ```text
//! GET    /                                   list_schemas
//! POST   /                                   create_schema
//! GET    /step/{step}                        get_active_for_step
//! POST   /{id}/deactivate                    deactivate_schema
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::form_schema;
use crate::state::AppState;

/// Form schema routes -- mounted at `/form-schemas`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(form_schema::list_schemas).post(form_schema::create_schema),
        )
        .route("/step/{step}", get(form_schema::get_active_for_step))
        .route("/{id}/deactivate", post(form_schema::deactivate_schema))
}
