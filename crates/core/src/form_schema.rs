//! Form schema document checks.
//!
//! A schema document describes the fields a step expects:
//!
//! ```json
//! { "title": "PAN Verification",
//!   "fields": [{ "name": "panNumber", "label": "PAN", "required": true }] }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// One field entry in a schema document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

/// Typed view of a schema document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub title: String,
    pub fields: Vec<SchemaField>,
}

/// Parse and check a schema document.
///
/// Requires a string `title` and a non-empty `fields` array of uniquely
/// named entries.
pub fn validate_schema_document(schema: &Value) -> Result<SchemaDocument, CoreError> {
    if !schema.is_object() {
        return Err(CoreError::Validation(
            "Schema must be a JSON object".to_string(),
        ));
    }

    let doc: SchemaDocument = serde_json::from_value(schema.clone())
        .map_err(|e| CoreError::Validation(format!("Malformed schema document: {e}")))?;

    if doc.fields.is_empty() {
        return Err(CoreError::Validation(
            "Schema must declare at least one field".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for field in &doc.fields {
        if field.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Schema field names must be non-empty".to_string(),
            ));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate schema field '{}'",
                field.name
            )));
        }
    }

    Ok(doc)
}

/// Required schema fields absent (or blank) in `form_data`.
pub fn missing_required_fields(schema: &SchemaDocument, form_data: &Value) -> Vec<String> {
    schema
        .fields
        .iter()
        .filter(|f| f.required)
        .filter(|f| match form_data.get(&f.name) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        })
        .map(|f| f.name.clone())
        .collect()
}
