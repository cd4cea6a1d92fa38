//! Field-level validators for the registration form.
//!
//! [`validate_field`] is the single entry point. Field names map onto the
//! closed [`FieldKind`] enum; anything else is rejected with
//! [`CoreError::InvalidFieldName`] instead of producing a result.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

// ASCII classes only: `\d` in the regex crate matches every Unicode digit.
static AADHAAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{12}$").expect("valid regex"));
static PAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid regex"));
static OTP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("valid regex"));
static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("valid regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
static PINCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Field kinds
// ---------------------------------------------------------------------------

/// Every form field that has a dedicated validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    AadhaarNumber,
    PanNumber,
    Otp,
    MobileNumber,
    Email,
    Pincode,
}

impl FieldKind {
    /// All validated fields, in form order.
    pub const ALL: [FieldKind; 6] = [
        Self::AadhaarNumber,
        Self::PanNumber,
        Self::Otp,
        Self::MobileNumber,
        Self::Email,
        Self::Pincode,
    ];

    /// Resolve a wire field name (exact, case-sensitive match).
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "aadhaarNumber" => Ok(Self::AadhaarNumber),
            "panNumber" => Ok(Self::PanNumber),
            "otp" => Ok(Self::Otp),
            "mobileNumber" => Ok(Self::MobileNumber),
            "email" => Ok(Self::Email),
            "pincode" => Ok(Self::Pincode),
            other => Err(CoreError::InvalidFieldName(other.to_string())),
        }
    }

    /// The wire name used in form data and API payloads.
    pub fn name(self) -> &'static str {
        match self {
            Self::AadhaarNumber => "aadhaarNumber",
            Self::PanNumber => "panNumber",
            Self::Otp => "otp",
            Self::MobileNumber => "mobileNumber",
            Self::Email => "email",
            Self::Pincode => "pincode",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::AadhaarNumber => &AADHAAR_RE,
            Self::PanNumber => &PAN_RE,
            Self::Otp => &OTP_RE,
            Self::MobileNumber => &MOBILE_RE,
            Self::Email => &EMAIL_RE,
            Self::Pincode => &PINCODE_RE,
        }
    }

    /// Message returned when the value passes.
    pub fn success_message(self) -> &'static str {
        match self {
            Self::AadhaarNumber => "Valid Aadhaar number",
            Self::PanNumber => "Valid PAN number",
            Self::Otp => "Valid OTP format",
            Self::MobileNumber => "Valid mobile number",
            Self::Email => "Valid email address",
            Self::Pincode => "Valid PIN code",
        }
    }

    /// Message returned when the value fails. Rendered verbatim by clients.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::AadhaarNumber => "Aadhaar number must be exactly 12 digits",
            Self::PanNumber => "PAN number must follow format: 5 letters, 4 digits, 1 letter",
            Self::Otp => "OTP must be exactly 6 digits",
            Self::MobileNumber => "Mobile number must be 10 digits starting with 6, 7, 8, or 9",
            Self::Email => "Please provide a valid email address",
            Self::Pincode => "PIN code must be exactly 6 digits",
        }
    }

    /// Check a raw value. The whole value must match; surrounding
    /// whitespace is not stripped and blank input never passes.
    pub fn is_valid(self, value: &str) -> bool {
        !value.trim().is_empty() && self.pattern().is_match(value)
    }

    /// Validate a raw value and build the full result.
    pub fn validate(self, value: &str) -> FieldValidation {
        let is_valid = self.is_valid(value);
        let message = if is_valid {
            self.success_message()
        } else {
            self.failure_message()
        };
        FieldValidation {
            field: self.name().to_string(),
            value: value.to_string(),
            is_valid,
            message: message.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    pub field: String,
    pub value: String,
    pub is_valid: bool,
    pub message: String,
}

/// Validate `value` against the rule registered for `field_name`.
///
/// Fails with [`CoreError::InvalidFieldName`] when no rule exists for the
/// name. Malformed values are not errors; they produce a result with
/// `is_valid == false` and the field's failure message.
pub fn validate_field(field_name: &str, value: &str) -> Result<FieldValidation, CoreError> {
    FieldKind::from_name(field_name).map(|kind| kind.validate(value))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn check(field: &str, value: &str) -> FieldValidation {
        validate_field(field, value).unwrap()
    }

    // -- Aadhaar --

    #[test]
    fn aadhaar_twelve_digits_is_valid() {
        let r = check("aadhaarNumber", "123456789012");
        assert!(r.is_valid);
        assert_eq!(r.message, "Valid Aadhaar number");
        assert_eq!(r.field, "aadhaarNumber");
        assert_eq!(r.value, "123456789012");
    }

    #[test]
    fn aadhaar_wrong_length_or_letters_is_invalid() {
        for v in ["12345678901", "1234567890123", "12345678901a", "1234 5678 9012"] {
            let r = check("aadhaarNumber", v);
            assert!(!r.is_valid, "{v} should be invalid");
            assert_eq!(r.message, "Aadhaar number must be exactly 12 digits");
        }
    }

    #[test]
    fn aadhaar_rejects_non_ascii_digits() {
        // Devanagari digits are Unicode `Nd` but not accepted.
        assert!(!check("aadhaarNumber", "१२३४५६७८९०१२").is_valid);
    }

    // -- PAN --

    #[test]
    fn pan_valid_format() {
        let r = check("panNumber", "ABCDE1234F");
        assert!(r.is_valid);
        assert_eq!(r.message, "Valid PAN number");
    }

    #[test]
    fn pan_is_case_sensitive() {
        assert!(!check("panNumber", "abcde1234f").is_valid);
    }

    #[test]
    fn pan_invalid_shape() {
        let r = check("panNumber", "INVALID123");
        assert!(!r.is_valid);
        assert_eq!(
            r.message,
            "PAN number must follow format: 5 letters, 4 digits, 1 letter"
        );
    }

    // -- OTP --

    #[test]
    fn otp_six_digits() {
        assert_eq!(check("otp", "123456").message, "Valid OTP format");
        let r = check("otp", "12345");
        assert!(!r.is_valid);
        assert_eq!(r.message, "OTP must be exactly 6 digits");
    }

    // -- Mobile --

    #[test]
    fn mobile_must_start_with_six_to_nine() {
        for v in ["6123456789", "7123456789", "8123456789", "9876543210"] {
            assert!(check("mobileNumber", v).is_valid, "{v} should be valid");
        }
        for v in ["5123456789", "0123456789", "987654321", "98765432100"] {
            let r = check("mobileNumber", v);
            assert!(!r.is_valid, "{v} should be invalid");
            assert_eq!(
                r.message,
                "Mobile number must be 10 digits starting with 6, 7, 8, or 9"
            );
        }
    }

    // -- Email --

    #[test]
    fn email_requires_dot_in_domain() {
        assert!(check("email", "owner@example.com").is_valid);
        assert_eq!(check("email", "owner@example.com").message, "Valid email address");
        for v in ["owner@localhost", "owner.example.com", "a b@example.com", "@example.com"] {
            let r = check("email", v);
            assert!(!r.is_valid, "{v} should be invalid");
            assert_eq!(r.message, "Please provide a valid email address");
        }
    }

    // -- PIN code --

    #[test]
    fn pincode_six_digits() {
        assert_eq!(check("pincode", "110001").message, "Valid PIN code");
        let r = check("pincode", "11000");
        assert!(!r.is_valid);
        assert_eq!(r.message, "PIN code must be exactly 6 digits");
    }

    // -- Shared behaviour --

    #[test]
    fn empty_and_blank_input_is_invalid_for_every_field() {
        for kind in FieldKind::ALL {
            assert!(!check(kind.name(), "").is_valid, "{} empty", kind.name());
            assert!(!check(kind.name(), "   ").is_valid, "{} blank", kind.name());
            assert_eq!(check(kind.name(), "").message, kind.failure_message());
        }
    }

    #[test]
    fn padded_values_are_rejected_for_every_field() {
        let good = |kind: FieldKind| match kind {
            FieldKind::AadhaarNumber => "123456789012",
            FieldKind::PanNumber => "ABCDE1234F",
            FieldKind::Otp => "123456",
            FieldKind::MobileNumber => "9876543210",
            FieldKind::Email => "a@b.co",
            FieldKind::Pincode => "110001",
        };
        for kind in FieldKind::ALL {
            assert!(check(kind.name(), good(kind)).is_valid, "{} bare", kind.name());
            for padded in [
                format!(" {}", good(kind)),
                format!("{} ", good(kind)),
                format!(" {} ", good(kind)),
                format!("{}\n", good(kind)),
            ] {
                let r = check(kind.name(), &padded);
                assert!(!r.is_valid, "{} {padded:?} should be invalid", kind.name());
                assert_eq!(r.message, kind.failure_message());
                assert_eq!(r.value, padded);
            }
        }
    }

    #[test]
    fn padded_aadhaar_is_not_twelve_digits() {
        assert!(!check("aadhaarNumber", " 123456789012 ").is_valid);
    }

    #[test]
    fn unknown_field_name_is_an_error() {
        assert_matches!(
            validate_field("gstNumber", "27AAAAA0000A1Z5"),
            Err(CoreError::InvalidFieldName(name)) if name == "gstNumber"
        );
    }

    #[test]
    fn field_names_are_exact() {
        assert_matches!(
            validate_field("AadhaarNumber", "123456789012"),
            Err(CoreError::InvalidFieldName(_))
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let a = check("email", "owner@example.com");
        let b = check("email", "owner@example.com");
        assert_eq!(a, b);
    }

    #[test]
    fn name_roundtrip() {
        for kind in FieldKind::ALL {
            assert_eq!(FieldKind::from_name(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn result_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(check("otp", "123456")).unwrap();
        assert_eq!(json["isValid"], true);
        assert_eq!(json["field"], "otp");
        assert_eq!(json["message"], "Valid OTP format");
    }
}
