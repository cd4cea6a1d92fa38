//! Service-level tests with a non-default identity verifier.

use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;

use udyam_api::error::AppError;
use udyam_api::registration::RegistrationService;
use udyam_core::error::CoreError;
use udyam_core::verification::IdentityVerifier;

/// Rejects every identity check.
struct DenyAll;

#[async_trait]
impl IdentityVerifier for DenyAll {
    async fn verify_aadhaar_otp(&self, _aadhaar_number: &str, _otp: &str) -> bool {
        false
    }

    async fn verify_pan(&self, _pan: &str) -> bool {
        false
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_rejected_verification_fails_valid_step(pool: PgPool) {
    let service = RegistrationService::new(pool, Arc::new(DenyAll));
    let user = service.start_session().await.unwrap();

    let outcome = service
        .submit_step(&user.session_id, 2, json!({"panNumber": "ABCDE1234F"}))
        .await
        .unwrap();

    assert!(outcome.fields.iter().all(|f| f.is_valid));
    assert_eq!(outcome.verification.map(|v| v.verified), Some(false));
    assert_eq!(outcome.submission.validation_status, "failed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_string_validated_field_is_rejected(pool: PgPool) {
    let service = RegistrationService::new(pool, Arc::new(DenyAll));
    let user = service.start_session().await.unwrap();

    let result = service
        .submit_step(&user.session_id, 4, json!({"pincode": 110001}))
        .await;
    assert_matches!(result, Err(AppError::Core(CoreError::Validation(_))));

    let snapshot = service.snapshot(&user.session_id).await.unwrap();
    assert!(snapshot.submissions.is_empty());
}
