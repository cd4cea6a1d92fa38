//! Field validation and mock verification routes.
//!
//! ```text
//! POST   /validate-field                     validate_single_field
//! POST   /verify/aadhaar-otp                 verify_aadhaar_otp
//! POST   /verify/pan                         verify_pan
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::validation;
use crate::state::AppState;

/// Validation routes -- merged at the `/api/v1` root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/validate-field", post(validation::validate_single_field))
        .route("/verify/aadhaar-otp", post(validation::verify_aadhaar_otp))
        .route("/verify/pan", post(validation::verify_pan))
}
