//! Registration user model.

use serde::Serialize;
use sqlx::FromRow;
use udyam_core::types::{DbId, Timestamp};

/// A row from the `users` table. One per registration session.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub session_id: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
