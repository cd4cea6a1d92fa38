//! Handlers exposing field validation and the mock identity checks.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use udyam_core::field_validation::validate_field;
use udyam_core::verification::{VerificationKind, VerificationOutcome};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /validate-field`.
#[derive(Debug, Deserialize)]
pub struct ValidateFieldRequest {
    pub field: String,
    pub value: String,
}

/// Request body for `POST /verify/aadhaar-otp`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAadhaarOtpRequest {
    pub aadhaar_number: String,
    pub otp: String,
}

/// Request body for `POST /verify/pan`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPanRequest {
    pub pan_number: String,
}

/// POST /validate-field -- check one value against its field rule.
///
/// An unknown field name is a 400 `INVALID_FIELD_NAME`; a malformed value
/// is a 200 with `isValid: false`.
pub async fn validate_single_field(
    Json(body): Json<ValidateFieldRequest>,
) -> AppResult<impl IntoResponse> {
    let result = validate_field(&body.field, &body.value)?;
    tracing::debug!(field = %result.field, is_valid = result.is_valid, "Field validated");
    Ok(Json(DataResponse { data: result }))
}

/// POST /verify/aadhaar-otp
pub async fn verify_aadhaar_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyAadhaarOtpRequest>,
) -> AppResult<impl IntoResponse> {
    let verified = state
        .verifier
        .verify_aadhaar_otp(&body.aadhaar_number, &body.otp)
        .await;
    Ok(Json(DataResponse {
        data: VerificationOutcome {
            kind: VerificationKind::AadhaarOtp,
            verified,
        },
    }))
}

/// POST /verify/pan
pub async fn verify_pan(
    State(state): State<AppState>,
    Json(body): Json<VerifyPanRequest>,
) -> AppResult<impl IntoResponse> {
    let verified = state.verifier.verify_pan(&body.pan_number).await;
    Ok(Json(DataResponse {
        data: VerificationOutcome {
            kind: VerificationKind::Pan,
            verified,
        },
    }))
}
