//! Step submission lifecycle.

use std::sync::Arc;

use serde::Serialize;
use sqlx::PgPool;
use udyam_core::error::CoreError;
use udyam_core::field_validation::FieldValidation;
use udyam_core::form_schema::{missing_required_fields, validate_schema_document};
use udyam_core::registration::{
    combine_status, evaluate_step, RegistrationStep, UserStatus, VerificationRequest,
};
use udyam_core::session_id::generate_session_id;
use udyam_core::types::DbId;
use udyam_core::verification::{IdentityVerifier, VerificationKind, VerificationOutcome};
use udyam_db::models::form_submission::{CreateFormSubmission, FormSubmission};
use udyam_db::models::user::User;
use udyam_db::repositories::{FormSchemaRepo, FormSubmissionRepo, UserRepo};

use crate::error::{AppError, AppResult};

/// Everything the client needs to render a step result.
#[derive(Debug, Serialize)]
pub struct StepOutcome {
    pub submission: FormSubmission,
    pub fields: Vec<FieldValidation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerificationOutcome>,
    /// Required fields from the active schema that were left blank.
    pub missing_fields: Vec<String>,
    pub user_status: String,
}

/// A registration session with all of its submissions.
#[derive(Debug, Serialize)]
pub struct RegistrationSnapshot {
    pub user: User,
    pub submissions: Vec<FormSubmission>,
}

/// Orchestrates registration sessions and step submissions.
///
/// For each step write:
/// 1. Resolve the session's user and check it is still in progress.
/// 2. Validate every field of the step (unknown fields abort here).
/// 3. Run the step's identity verification if all fields passed.
/// 4. Persist the submission with the combined status, promoting the user
///    when the last outstanding step completes. One transaction holding the
///    user row lock; a session closed in the meantime yields a conflict.
pub struct RegistrationService {
    pool: PgPool,
    verifier: Arc<dyn IdentityVerifier>,
}

impl RegistrationService {
    pub fn new(pool: PgPool, verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self { pool, verifier }
    }

    /// Open a new registration session.
    pub async fn start_session(&self) -> AppResult<User> {
        let session_id = generate_session_id();
        let user = UserRepo::create(&self.pool, &session_id).await?;

        tracing::info!(user_id = user.id, session_id = %user.session_id, "Registration session started");

        Ok(user)
    }

    /// Load a session and every submission made under it.
    pub async fn snapshot(&self, session_id: &str) -> AppResult<RegistrationSnapshot> {
        let user = self.find_user(session_id).await?;
        let submissions = FormSubmissionRepo::list_by_user(&self.pool, user.id).await?;
        Ok(RegistrationSnapshot { user, submissions })
    }

    /// The most recent submission for a step, if any.
    pub async fn latest_submission(
        &self,
        session_id: &str,
        step_number: i32,
    ) -> AppResult<FormSubmission> {
        let step = RegistrationStep::from_number(step_number)?;
        let user = self.find_user(session_id).await?;

        FormSubmissionRepo::find_latest_for_step(&self.pool, user.id, step.to_number())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No submission for step {step_number} in session {session_id}"
                ))
            })
    }

    /// Validate, verify and persist one step of a session.
    ///
    /// Failed validation or verification is recorded as a `failed`
    /// submission, not returned as an error.
    pub async fn submit_step(
        &self,
        session_id: &str,
        step_number: i32,
        form_data: serde_json::Value,
    ) -> AppResult<StepOutcome> {
        let step = RegistrationStep::from_number(step_number)?;
        let user = self.find_user(session_id).await?;
        ensure_in_progress(&user)?;

        let checked = self.check_step(step, &form_data).await?;

        let Some((submission, user)) = FormSubmissionRepo::create_with_progress(
            &self.pool,
            &CreateFormSubmission {
                user_id: user.id,
                step_number: step.to_number(),
                form_data,
                validation_status: Some(checked.status.to_string()),
            },
        )
        .await?
        else {
            let fallback = AppError::InternalError(format!(
                "Submission to session {session_id} was refused"
            ));
            return Err(self.closed_session(session_id, fallback).await);
        };

        tracing::info!(
            user_id = user.id,
            submission_id = submission.id,
            step = step.to_number(),
            status = %submission.validation_status,
            "Registration step submitted"
        );

        Ok(checked.into_outcome(submission, user))
    }

    /// Re-check and overwrite an existing submission of this session.
    pub async fn revise_submission(
        &self,
        session_id: &str,
        submission_id: DbId,
        form_data: serde_json::Value,
    ) -> AppResult<StepOutcome> {
        let user = self.find_user(session_id).await?;
        ensure_in_progress(&user)?;

        let existing = FormSubmissionRepo::find_by_id(&self.pool, submission_id)
            .await?
            .filter(|s| s.user_id == user.id)
            .ok_or(CoreError::NotFound {
                entity: "FormSubmission",
                id: submission_id,
            })?;

        let step = RegistrationStep::from_number(existing.step_number)?;
        let checked = self.check_step(step, &form_data).await?;

        let Some((submission, user)) = FormSubmissionRepo::revise_with_progress(
            &self.pool,
            submission_id,
            &form_data,
            checked.status,
        )
        .await?
        else {
            let fallback: AppError = CoreError::NotFound {
                entity: "FormSubmission",
                id: submission_id,
            }
            .into();
            return Err(self.closed_session(session_id, fallback).await);
        };

        tracing::info!(
            user_id = user.id,
            submission_id,
            step = step.to_number(),
            status = %submission.validation_status,
            "Registration step revised"
        );

        Ok(checked.into_outcome(submission, user))
    }

    /// Mark an in-progress session as abandoned.
    pub async fn abandon_session(&self, session_id: &str) -> AppResult<User> {
        let user = self.find_user(session_id).await?;
        ensure_in_progress(&user)?;

        let Some(updated) = UserRepo::transition_status(
            &self.pool,
            user.id,
            UserStatus::InProgress,
            UserStatus::Abandoned,
        )
        .await?
        else {
            let fallback: AppError = CoreError::NotFound {
                entity: "User",
                id: user.id,
            }
            .into();
            return Err(self.closed_session(session_id, fallback).await);
        };

        tracing::info!(user_id = user.id, session_id, "Registration session abandoned");

        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn find_user(&self, session_id: &str) -> AppResult<User> {
        UserRepo::find_by_session_id(&self.pool, session_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Registration session {session_id} not found")))
    }

    /// Error for a write the store refused. A session that left
    /// `in_progress` after it was first read yields a conflict; otherwise
    /// `fallback` is returned.
    async fn closed_session(&self, session_id: &str, fallback: AppError) -> AppError {
        match self.find_user(session_id).await {
            Ok(user) => match ensure_in_progress(&user) {
                Err(e) => e.into(),
                Ok(()) => fallback,
            },
            Err(e) => e,
        }
    }

    /// Field validation, verification and schema completeness for one step.
    async fn check_step(
        &self,
        step: RegistrationStep,
        form_data: &serde_json::Value,
    ) -> AppResult<CheckedStep> {
        let evaluation = evaluate_step(step, form_data)?;

        let verification = match &evaluation.verification {
            Some(request) => Some(self.verify(request).await),
            None => None,
        };
        let status = combine_status(evaluation.all_valid(), verification.map(|v| v.verified));

        let missing_fields = self.missing_schema_fields(step, form_data).await?;

        Ok(CheckedStep {
            fields: evaluation.fields,
            verification,
            missing_fields,
            status: status.as_str(),
        })
    }

    async fn verify(&self, request: &VerificationRequest) -> VerificationOutcome {
        let outcome = match request {
            VerificationRequest::AadhaarOtp {
                aadhaar_number,
                otp,
            } => VerificationOutcome {
                kind: VerificationKind::AadhaarOtp,
                verified: self.verifier.verify_aadhaar_otp(aadhaar_number, otp).await,
            },
            VerificationRequest::Pan { pan } => VerificationOutcome {
                kind: VerificationKind::Pan,
                verified: self.verifier.verify_pan(pan).await,
            },
        };

        tracing::debug!(kind = ?outcome.kind, verified = outcome.verified, "Identity verification ran");

        outcome
    }

    async fn missing_schema_fields(
        &self,
        step: RegistrationStep,
        form_data: &serde_json::Value,
    ) -> AppResult<Vec<String>> {
        let Some(schema) = FormSchemaRepo::find_active_for_step(&self.pool, step.to_number()).await?
        else {
            return Ok(Vec::new());
        };

        match validate_schema_document(&schema.schema) {
            Ok(doc) => Ok(missing_required_fields(&doc, form_data)),
            Err(e) => {
                tracing::warn!(schema_id = schema.id, error = %e, "Skipping malformed form schema");
                Ok(Vec::new())
            }
        }
    }
}

/// Intermediate result of [`RegistrationService::check_step`].
struct CheckedStep {
    fields: Vec<FieldValidation>,
    verification: Option<VerificationOutcome>,
    missing_fields: Vec<String>,
    status: &'static str,
}

impl CheckedStep {
    fn into_outcome(self, submission: FormSubmission, user: User) -> StepOutcome {
        StepOutcome {
            submission,
            fields: self.fields,
            verification: self.verification,
            missing_fields: self.missing_fields,
            user_status: user.status,
        }
    }
}

fn ensure_in_progress(user: &User) -> Result<(), CoreError> {
    if user.status != UserStatus::InProgress.as_str() {
        return Err(CoreError::Conflict(format!(
            "Registration session {} is {} and no longer accepts submissions",
            user.session_id, user.status
        )));
    }
    Ok(())
}
