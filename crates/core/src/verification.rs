//! Mock identity verification.
//!
//! Stand-ins for the Aadhaar OTP and PAN authority checks. Both are pure
//! pattern matches; nothing leaves the process. The [`IdentityVerifier`]
//! trait is the seam a real integration would implement.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// OTP accepted for every Aadhaar number in test environments.
pub const TEST_OTP: &str = "123456";

/// Second universally accepted OTP.
pub const BYPASS_OTP: &str = "000000";

/// Number of trailing Aadhaar digits that also act as a valid OTP.
pub const AADHAAR_OTP_SUFFIX_LEN: usize = 6;

/// PAN values that always fail verification (compared ignoring ASCII case).
pub const INVALID_PAN_SENTINELS: [&str; 4] = ["INVALID", "INVALID123", "AAAAA0000A", "ABCDE0000Z"];

static PAN_SHAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid regex"));

/// Verify an Aadhaar OTP.
///
/// Accepts the two fixed test OTPs, or an OTP equal to the last six
/// characters of the Aadhaar number.
pub fn verify_aadhaar_otp(aadhaar_number: &str, otp: &str) -> bool {
    if otp == TEST_OTP || otp == BYPASS_OTP {
        return true;
    }
    aadhaar_number.len() >= AADHAAR_OTP_SUFFIX_LEN
        && aadhaar_number.is_char_boundary(aadhaar_number.len() - AADHAAR_OTP_SUFFIX_LEN)
        && otp == &aadhaar_number[aadhaar_number.len() - AADHAAR_OTP_SUFFIX_LEN..]
}

/// Verify a PAN.
///
/// Rejects the sentinel deny-list; otherwise accepts anything with PAN
/// shape, ignoring letter case.
pub fn verify_pan(pan: &str) -> bool {
    let candidate = pan.trim().to_ascii_uppercase();
    if INVALID_PAN_SENTINELS.contains(&candidate.as_str()) {
        return false;
    }
    PAN_SHAPE_RE.is_match(&candidate)
}

// ---------------------------------------------------------------------------
// Verifier seam
// ---------------------------------------------------------------------------

/// Which external check was run for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationKind {
    AadhaarOtp,
    Pan,
}

/// Result of a verification call, reported back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    pub kind: VerificationKind,
    pub verified: bool,
}

/// Identity verification provider.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify_aadhaar_otp(&self, aadhaar_number: &str, otp: &str) -> bool;

    async fn verify_pan(&self, pan: &str) -> bool;
}

/// Pattern-based verifier used until a real authority is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockIdentityVerifier;

#[async_trait]
impl IdentityVerifier for MockIdentityVerifier {
    async fn verify_aadhaar_otp(&self, aadhaar_number: &str, otp: &str) -> bool {
        verify_aadhaar_otp(aadhaar_number, otp)
    }

    async fn verify_pan(&self, pan: &str) -> bool {
        verify_pan(pan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Aadhaar OTP --

    #[test]
    fn sentinel_otps_always_pass() {
        assert!(verify_aadhaar_otp("123456789012", "123456"));
        assert!(verify_aadhaar_otp("999988887777", "123456"));
        assert!(verify_aadhaar_otp("999988887777", "000000"));
    }

    #[test]
    fn last_six_digits_pass() {
        assert!(verify_aadhaar_otp("123456789012", "789012"));
        assert!(verify_aadhaar_otp("999988887777", "887777"));
    }

    #[test]
    fn other_otps_fail() {
        assert!(!verify_aadhaar_otp("123456789012", "789013"));
        assert!(!verify_aadhaar_otp("123456789012", "111111"));
        assert!(!verify_aadhaar_otp("123456789012", ""));
        assert!(!verify_aadhaar_otp("12345", "12345"));
    }

    // -- PAN --

    #[test]
    fn well_formed_pan_passes() {
        assert!(verify_pan("ABCDE1234F"));
        assert!(verify_pan("PQRST9876Z"));
    }

    #[test]
    fn pan_shape_check_ignores_case() {
        assert!(verify_pan("abcde1234f"));
    }

    #[test]
    fn sentinels_fail_in_any_case() {
        for pan in ["AAAAA0000A", "aaaaa0000a", "ABCDE0000Z", "abcde0000z", "INVALID", "invalid123"] {
            assert!(!verify_pan(pan), "{pan} should be rejected");
        }
    }

    #[test]
    fn malformed_pan_fails() {
        assert!(!verify_pan("ABCD1234F"));
        assert!(!verify_pan("12345ABCDE"));
        assert!(!verify_pan(""));
    }

    // -- Trait --

    #[tokio::test]
    async fn mock_verifier_delegates_to_pattern_checks() {
        let verifier: &dyn IdentityVerifier = &MockIdentityVerifier;
        assert!(verifier.verify_aadhaar_otp("123456789012", "789012").await);
        assert!(!verifier.verify_aadhaar_otp("123456789012", "222222").await);
        assert!(verifier.verify_pan("ABCDE1234F").await);
        assert!(!verifier.verify_pan("AAAAA0000A").await);
    }
}
