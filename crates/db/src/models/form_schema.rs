//! Form schema entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use udyam_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `form_schemas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FormSchema {
    pub id: DbId,
    pub step_number: i32,
    pub version: i32,
    pub schema: serde_json::Value,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new schema version.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFormSchema {
    #[validate(range(min = 1, max = 4))]
    pub step_number: i32,
    #[validate(range(min = 1))]
    pub version: i32,
    pub schema: serde_json::Value,
    pub is_active: Option<bool>,
}
