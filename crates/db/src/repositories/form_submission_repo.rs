//! Repository for the `form_submissions` table.

use sqlx::PgPool;
use udyam_core::registration::ValidationStatus;
use udyam_core::types::{DbId, Timestamp};

use crate::models::form_submission::{CreateFormSubmission, FormSubmission};
use crate::models::user::User;
use crate::repositories::UserRepo;

/// Column list for `form_submissions` queries.
const COLUMNS: &str = "id, user_id, step_number, form_data, validation_status, \
     submitted_at, updated_at";

/// Provides CRUD operations for form submissions.
pub struct FormSubmissionRepo;

impl FormSubmissionRepo {
    /// Insert a new submission.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFormSubmission,
    ) -> Result<FormSubmission, sqlx::Error> {
        Self::insert(pool, input).await
    }

    /// Insert a submission and, in the same transaction, promote the owning
    /// user to `completed` if this was the last outstanding step.
    ///
    /// The user row is locked first. Returns `None` (and writes nothing) if
    /// the user is missing or no longer `in_progress`.
    pub async fn create_with_progress(
        pool: &PgPool,
        input: &CreateFormSubmission,
    ) -> Result<Option<(FormSubmission, User)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !UserRepo::lock_in_progress(&mut tx, input.user_id).await? {
            return Ok(None);
        }

        let submission = Self::insert(&mut *tx, input).await?;
        let user = UserRepo::sync_progress_inner(&mut tx, input.user_id).await?;

        tx.commit().await?;
        Ok(Some((submission, user)))
    }

    /// Replace form data and status of a submission and re-check user
    /// progress, atomically.
    ///
    /// Returns `None` if the submission does not exist or its user is no
    /// longer `in_progress`.
    pub async fn revise_with_progress(
        pool: &PgPool,
        id: DbId,
        form_data: &serde_json::Value,
        validation_status: &str,
    ) -> Result<Option<(FormSubmission, User)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owner: Option<DbId> =
            sqlx::query_scalar("SELECT user_id FROM form_submissions WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(user_id) = owner else {
            return Ok(None);
        };
        if !UserRepo::lock_in_progress(&mut tx, user_id).await? {
            return Ok(None);
        }

        let query = format!(
            "UPDATE form_submissions SET form_data = $2, validation_status = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let submission = sqlx::query_as::<_, FormSubmission>(&query)
            .bind(id)
            .bind(form_data)
            .bind(validation_status)
            .fetch_one(&mut *tx)
            .await?;

        let user = UserRepo::sync_progress_inner(&mut tx, user_id).await?;

        tx.commit().await?;
        Ok(Some((submission, user)))
    }

    /// Find a submission by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FormSubmission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM form_submissions WHERE id = $1");
        sqlx::query_as::<_, FormSubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All submissions for a user, oldest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FormSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM form_submissions \
             WHERE user_id = $1 \
             ORDER BY submitted_at ASC, id ASC"
        );
        sqlx::query_as::<_, FormSubmission>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All submissions for one step of a user, newest first.
    pub async fn list_by_user_and_step(
        pool: &PgPool,
        user_id: DbId,
        step_number: i32,
    ) -> Result<Vec<FormSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM form_submissions \
             WHERE user_id = $1 AND step_number = $2 \
             ORDER BY submitted_at DESC, id DESC"
        );
        sqlx::query_as::<_, FormSubmission>(&query)
            .bind(user_id)
            .bind(step_number)
            .fetch_all(pool)
            .await
    }

    /// The most recent submission for one step of a user.
    pub async fn find_latest_for_step(
        pool: &PgPool,
        user_id: DbId,
        step_number: i32,
    ) -> Result<Option<FormSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM form_submissions \
             WHERE user_id = $1 AND step_number = $2 \
             ORDER BY submitted_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, FormSubmission>(&query)
            .bind(user_id)
            .bind(step_number)
            .fetch_optional(pool)
            .await
    }

    /// Submissions whose `submitted_at` falls in `[from, to)`.
    pub async fn list_submitted_between(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FormSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM form_submissions \
             WHERE submitted_at >= $1 AND submitted_at < $2 \
             ORDER BY submitted_at ASC, id ASC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, FormSubmission>(&query)
            .bind(from)
            .bind(to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update the validation status of a submission.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: ValidationStatus,
    ) -> Result<Option<FormSubmission>, sqlx::Error> {
        let query = format!(
            "UPDATE form_submissions SET validation_status = $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormSubmission>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Replace the form data of a submission.
    pub async fn update_form_data(
        pool: &PgPool,
        id: DbId,
        form_data: &serde_json::Value,
    ) -> Result<Option<FormSubmission>, sqlx::Error> {
        let query = format!(
            "UPDATE form_submissions SET form_data = $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormSubmission>(&query)
            .bind(id)
            .bind(form_data)
            .fetch_optional(pool)
            .await
    }

    /// Delete every submission of a user. Returns the number of rows removed.
    pub async fn delete_by_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM form_submissions WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Shared INSERT for pool and transaction callers.
    async fn insert<'e, E>(
        executor: E,
        input: &CreateFormSubmission,
    ) -> Result<FormSubmission, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO form_submissions (user_id, step_number, form_data, validation_status) \
             VALUES ($1, $2, $3, COALESCE($4, 'pending')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormSubmission>(&query)
            .bind(input.user_id)
            .bind(input.step_number)
            .bind(&input.form_data)
            .bind(&input.validation_status)
            .fetch_one(executor)
            .await
    }
}
