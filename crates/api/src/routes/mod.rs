pub mod form_schema;
pub mod form_submission;
pub mod health;
pub mod registration;
pub mod validation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /validate-field                                  validate one field (POST)
/// /verify/aadhaar-otp                              mock OTP check (POST)
/// /verify/pan                                      mock PAN check (POST)
///
/// /registrations                                   start session (POST)
/// /registrations/{session_id}                      session + submissions
/// /registrations/{session_id}/abandon              abandon (POST)
/// /registrations/{session_id}/steps/{step}         submit (POST), latest (GET)
/// /registrations/{session_id}/submissions/{id}     revise (PUT)
///
/// /form-schemas                                    list, create
/// /form-schemas/step/{step}                        active schema for step
/// /form-schemas/{id}/deactivate                    deactivate (POST)
///
/// /form-submissions                                submitted_at range (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(validation::router())
        .nest("/registrations", registration::router())
        .nest("/form-schemas", form_schema::router())
        .nest("/form-submissions", form_submission::router())
}
