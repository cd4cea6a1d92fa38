//! Form submission entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use udyam_core::types::{DbId, Timestamp};

/// A row from the `form_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FormSubmission {
    pub id: DbId,
    pub user_id: DbId,
    pub step_number: i32,
    pub form_data: serde_json::Value,
    pub validation_status: String,
    pub submitted_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a form submission.
#[derive(Debug, Clone)]
pub struct CreateFormSubmission {
    pub user_id: DbId,
    pub step_number: i32,
    pub form_data: serde_json::Value,
    /// Defaults to `pending` when `None`.
    pub validation_status: Option<String>,
}

/// Request body for submitting or revising a step.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitStepData {
    pub form_data: serde_json::Value,
}
