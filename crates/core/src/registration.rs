//! Registration steps, status enums and step evaluation.
//!
//! [`evaluate_step`] checks a step's form data against the field validators
//! and decides which identity verification (if any) should follow. It never
//! touches the store; the API layer runs the verification and persists the
//! combined outcome.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::field_validation::{validate_field, FieldKind, FieldValidation};

// ---------------------------------------------------------------------------
// Status enums
// ---------------------------------------------------------------------------

/// Validation status of a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Pending,
    Completed,
    Failed,
}

impl ValidationStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(CoreError::Validation(format!(
                "Invalid validation status '{s}'. Must be one of: pending, completed, failed"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Status of a registration (one user session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    InProgress,
    Completed,
    Abandoned,
}

impl UserStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(CoreError::Validation(format!(
                "Invalid user status '{s}'. Must be one of: in_progress, completed, abandoned"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The four steps of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    AadhaarVerification,
    PanVerification,
    BusinessDetails,
    AddressDetails,
}

/// Minimum step number (1-based).
pub const MIN_STEP: i32 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: i32 = 4;

impl RegistrationStep {
    /// All steps in order.
    pub const ALL: [RegistrationStep; 4] = [
        Self::AadhaarVerification,
        Self::PanVerification,
        Self::BusinessDetails,
        Self::AddressDetails,
    ];

    /// Convert a 1-based step number to a `RegistrationStep`.
    pub fn from_number(n: i32) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::AadhaarVerification),
            2 => Ok(Self::PanVerification),
            3 => Ok(Self::BusinessDetails),
            4 => Ok(Self::AddressDetails),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> i32 {
        match self {
            Self::AadhaarVerification => 1,
            Self::PanVerification => 2,
            Self::BusinessDetails => 3,
            Self::AddressDetails => 4,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::AadhaarVerification => "Aadhaar Verification with OTP",
            Self::PanVerification => "PAN Verification",
            Self::BusinessDetails => "Business Details",
            Self::AddressDetails => "Address Details",
        }
    }

    /// Fields checked by a dedicated validator. Missing ones fail.
    pub fn validated_fields(self) -> &'static [FieldKind] {
        match self {
            Self::AadhaarVerification => &[FieldKind::AadhaarNumber, FieldKind::Otp],
            Self::PanVerification => &[FieldKind::PanNumber],
            Self::BusinessDetails => &[FieldKind::MobileNumber, FieldKind::Email],
            Self::AddressDetails => &[FieldKind::Pincode],
        }
    }

    /// Fields stored as captured, without a validator.
    pub fn plain_fields(self) -> &'static [&'static str] {
        match self {
            Self::AadhaarVerification => &["entrepreneurName", "consent"],
            Self::PanVerification => &["organisationType", "panHolderName", "dateOfBirth"],
            Self::BusinessDetails => &["enterpriseName", "enterpriseType", "majorActivity"],
            Self::AddressDetails => &[
                "flatNumber",
                "building",
                "street",
                "city",
                "district",
                "state",
            ],
        }
    }

    /// Whether `name` belongs to this step, validated or plain.
    pub fn accepts_field(self, name: &str) -> bool {
        self.plain_fields().contains(&name)
            || self.validated_fields().iter().any(|k| k.name() == name)
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Identity check to run once every field of a step is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationRequest {
    AadhaarOtp { aadhaar_number: String, otp: String },
    Pan { pan: String },
}

/// Result of checking one step's form data.
#[derive(Debug, Clone)]
pub struct StepEvaluation {
    pub step: RegistrationStep,
    pub fields: Vec<FieldValidation>,
    /// Set only when every field passed and the step has an identity check.
    pub verification: Option<VerificationRequest>,
}

impl StepEvaluation {
    /// Whether every validated field passed.
    pub fn all_valid(&self) -> bool {
        self.fields.iter().all(|f| f.is_valid)
    }
}

/// Validate the form data submitted for `step`.
///
/// Fails fast (nothing should be persisted) when the data is not a JSON
/// object, contains a key outside the step's field set, or carries a
/// non-string value for a validated field.
pub fn evaluate_step(step: RegistrationStep, form_data: &Value) -> Result<StepEvaluation, CoreError> {
    let obj = form_data
        .as_object()
        .ok_or_else(|| CoreError::Validation("Form data must be a JSON object".to_string()))?;

    if let Some(unknown) = obj.keys().find(|k| !step.accepts_field(k)) {
        return Err(CoreError::InvalidFieldName(unknown.clone()));
    }

    let mut fields = Vec::with_capacity(step.validated_fields().len());
    for kind in step.validated_fields() {
        let raw = match obj.get(kind.name()) {
            None | Some(Value::Null) => "",
            Some(Value::String(s)) => s.as_str(),
            Some(_) => {
                return Err(CoreError::Validation(format!(
                    "Field '{}' must be a string",
                    kind.name()
                )))
            }
        };
        fields.push(validate_field(kind.name(), raw)?);
    }

    let all_valid = fields.iter().all(|f| f.is_valid);
    let verification = if all_valid {
        verification_for(step, &fields)
    } else {
        None
    };

    Ok(StepEvaluation {
        step,
        fields,
        verification,
    })
}

fn verification_for(step: RegistrationStep, fields: &[FieldValidation]) -> Option<VerificationRequest> {
    let value_of = |kind: FieldKind| {
        fields
            .iter()
            .find(|f| f.field == kind.name())
            .map(|f| f.value.clone())
    };

    match step {
        RegistrationStep::AadhaarVerification => Some(VerificationRequest::AadhaarOtp {
            aadhaar_number: value_of(FieldKind::AadhaarNumber)?,
            otp: value_of(FieldKind::Otp)?,
        }),
        RegistrationStep::PanVerification => Some(VerificationRequest::Pan {
            pan: value_of(FieldKind::PanNumber)?,
        }),
        RegistrationStep::BusinessDetails | RegistrationStep::AddressDetails => None,
    }
}

/// Combine field validation and verification into a submission status.
///
/// `verified` is `None` when no verification ran (either the step has none
/// or a field failed first).
pub fn combine_status(all_valid: bool, verified: Option<bool>) -> ValidationStatus {
    match (all_valid, verified) {
        (false, _) => ValidationStatus::Failed,
        (true, Some(false)) => ValidationStatus::Failed,
        (true, _) => ValidationStatus::Completed,
    }
}

/// Whether the set of completed step numbers covers every step.
pub fn all_steps_completed(completed_steps: &[i32]) -> bool {
    RegistrationStep::ALL
        .iter()
        .all(|s| completed_steps.contains(&s.to_number()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
