//! Repository for the `users` table.

use sqlx::PgPool;
use udyam_core::registration::{all_steps_completed, UserStatus, ValidationStatus};
use udyam_core::types::DbId;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, session_id, status, created_at, updated_at";

/// Provides CRUD operations for registration users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user for `session_id` with status `in_progress`.
    ///
    /// A duplicate session ID violates `uq_users_session_id`.
    pub async fn create(pool: &PgPool, session_id: &str) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (session_id) \
             VALUES ($1) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(session_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by session ID.
    pub async fn find_by_session_id(
        pool: &PgPool,
        session_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE session_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(session_id)
            .fetch_optional(pool)
            .await
    }

    /// Update the status of a user.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET status = $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Move a user from `from` to `to` only if it is still in `from`.
    /// Returns `None` if the user is missing or in another status.
    pub async fn transition_status(
        pool: &PgPool,
        id: DbId,
        from: UserStatus,
        to: UserStatus,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET status = $2 \
             WHERE id = $1 AND status = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(to.as_str())
            .bind(from.as_str())
            .fetch_optional(pool)
            .await
    }

    /// List users with a given status, most recent first.
    pub async fn list_by_status(
        pool: &PgPool,
        status: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users \
             WHERE status = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Hard-delete a user. Submissions go with it (`ON DELETE CASCADE`).
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lock the user row for the rest of the transaction and report whether
    /// it is still `in_progress`. Concurrent status changes wait on the lock.
    pub(crate) async fn lock_in_progress(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let status: Option<String> =
            sqlx::query_scalar("SELECT status FROM users WHERE id = $1 FOR UPDATE")
                .bind(user_id)
                .fetch_optional(&mut **tx)
                .await?;
        Ok(status.as_deref() == Some(UserStatus::InProgress.as_str()))
    }

    /// Promote an `in_progress` user to `completed` once every step has a
    /// completed submission. Returns the user row as it stands afterwards.
    pub(crate) async fn sync_progress_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
    ) -> Result<User, sqlx::Error> {
        let completed_steps: Vec<i32> = sqlx::query_scalar(
            "SELECT DISTINCT step_number FROM form_submissions \
             WHERE user_id = $1 AND validation_status = $2",
        )
        .bind(user_id)
        .bind(ValidationStatus::Completed.as_str())
        .fetch_all(&mut **tx)
        .await?;

        if all_steps_completed(&completed_steps) {
            let query = format!(
                "UPDATE users SET status = $2 \
                 WHERE id = $1 AND status = $3 \
                 RETURNING {COLUMNS}"
            );
            let promoted = sqlx::query_as::<_, User>(&query)
                .bind(user_id)
                .bind(UserStatus::Completed.as_str())
                .bind(UserStatus::InProgress.as_str())
                .fetch_optional(&mut **tx)
                .await?;
            if let Some(user) = promoted {
                tracing::debug!(user_id, "All registration steps completed");
                return Ok(user);
            }
        }

        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_one(&mut **tx)
            .await
    }
}
