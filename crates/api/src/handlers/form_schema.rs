//! Handlers for versioned form schemas.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use udyam_core::error::CoreError;
use udyam_core::form_schema::validate_schema_document;
use udyam_core::registration::RegistrationStep;
use udyam_core::types::DbId;
use udyam_db::models::form_schema::CreateFormSchema;
use udyam_db::repositories::FormSchemaRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /form-schemas -- every schema version.
pub async fn list_schemas(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let schemas = FormSchemaRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: schemas }))
}

/// GET /form-schemas/step/{step} -- the active schema for a step.
pub async fn get_active_for_step(
    State(state): State<AppState>,
    Path(step): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let step = RegistrationStep::from_number(step)?;
    let schema = FormSchemaRepo::find_active_for_step(&state.pool, step.to_number())
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No active schema for step {} ({})",
                step.to_number(),
                step.label()
            ))
        })?;
    Ok(Json(DataResponse { data: schema }))
}

/// POST /form-schemas -- register a new schema version.
pub async fn create_schema(
    State(state): State<AppState>,
    Json(body): Json<CreateFormSchema>,
) -> AppResult<impl IntoResponse> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let step = RegistrationStep::from_number(body.step_number)?;
    let doc = validate_schema_document(&body.schema)?;
    if let Some(field) = doc.fields.iter().find(|f| !step.accepts_field(&f.name)) {
        return Err(CoreError::InvalidFieldName(field.name.clone()).into());
    }

    let schema = FormSchemaRepo::create(&state.pool, &body).await?;

    tracing::info!(
        schema_id = schema.id,
        step = schema.step_number,
        version = schema.version,
        "Form schema created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: schema })))
}

/// POST /form-schemas/{id}/deactivate
pub async fn deactivate_schema(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let schema = FormSchemaRepo::deactivate(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "FormSchema",
            id,
        })?;

    tracing::info!(schema_id = id, "Form schema deactivated");

    Ok(Json(DataResponse { data: schema }))
}
