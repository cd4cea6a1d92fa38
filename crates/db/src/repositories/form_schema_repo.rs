//! Repository for the `form_schemas` table.

use sqlx::PgPool;
use udyam_core::types::DbId;

use crate::models::form_schema::{CreateFormSchema, FormSchema};

/// Column list for `form_schemas` queries.
const COLUMNS: &str = "id, step_number, version, schema, is_active, created_at, updated_at";

/// Provides read-mostly access to versioned step schemas.
pub struct FormSchemaRepo;

impl FormSchemaRepo {
    /// Insert a new schema version.
    ///
    /// A repeated `(step_number, version)` violates
    /// `uq_form_schemas_step_version`.
    pub async fn create(pool: &PgPool, input: &CreateFormSchema) -> Result<FormSchema, sqlx::Error> {
        let query = format!(
            "INSERT INTO form_schemas (step_number, version, schema, is_active) \
             VALUES ($1, $2, $3, COALESCE($4, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormSchema>(&query)
            .bind(input.step_number)
            .bind(input.version)
            .bind(&input.schema)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a schema by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FormSchema>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM form_schemas WHERE id = $1");
        sqlx::query_as::<_, FormSchema>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The highest active version for a step.
    pub async fn find_active_for_step(
        pool: &PgPool,
        step_number: i32,
    ) -> Result<Option<FormSchema>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM form_schemas \
             WHERE step_number = $1 AND is_active = true \
             ORDER BY version DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, FormSchema>(&query)
            .bind(step_number)
            .fetch_optional(pool)
            .await
    }

    /// List every schema version, ordered by step then version.
    pub async fn list(pool: &PgPool) -> Result<Vec<FormSchema>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM form_schemas \
             ORDER BY step_number ASC, version ASC"
        );
        sqlx::query_as::<_, FormSchema>(&query).fetch_all(pool).await
    }

    /// Mark a schema version inactive. Returns `None` if it does not exist.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<Option<FormSchema>, sqlx::Error> {
        let query = format!(
            "UPDATE form_schemas SET is_active = false \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormSchema>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
