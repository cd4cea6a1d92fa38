//! Opaque registration session identifiers.
//!
//! Format: `udyam_<13-digit millisecond epoch>_<9 lowercase alphanumerics>`.
//! Uniqueness within one millisecond comes from the random suffix.

use rand::Rng;

/// Prefix shared by every session identifier.
pub const SESSION_ID_PREFIX: &str = "udyam";

/// Length of the random suffix.
pub const SUFFIX_LENGTH: usize = 9;

/// Width of the zero-padded millisecond timestamp.
pub const TIMESTAMP_WIDTH: usize = 13;

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a new session identifier from the current time and a random suffix.
pub fn generate_session_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LENGTH)
        .map(|_| SUFFIX_CHARSET[rng.random_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();

    format!("{SESSION_ID_PREFIX}_{millis:0width$}_{suffix}", width = TIMESTAMP_WIDTH)
}

/// Check that `id` has the shape produced by [`generate_session_id`].
pub fn is_well_formed_session_id(id: &str) -> bool {
    let mut parts = id.split('_');
    let (Some(prefix), Some(timestamp), Some(suffix), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    prefix == SESSION_ID_PREFIX
        && timestamp.len() == TIMESTAMP_WIDTH
        && timestamp.bytes().all(|b| b.is_ascii_digit())
        && suffix.len() == SUFFIX_LENGTH
        && suffix.bytes().all(|b| SUFFIX_CHARSET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_well_formed() {
        for _ in 0..100 {
            let id = generate_session_id();
            assert!(is_well_formed_session_id(&id), "malformed id: {id}");
        }
    }

    #[test]
    fn consecutive_ids_differ() {
        let a = generate_session_id();
        let b = generate_session_id();
        assert_ne!(a, b);
    }

    #[test]
    fn timestamp_is_current() {
        let before = chrono::Utc::now().timestamp_millis();
        let id = generate_session_id();
        let after = chrono::Utc::now().timestamp_millis();
        let ts: i64 = id.split('_').nth(1).unwrap().parse().unwrap();
        assert!(ts >= before && ts <= after);
    }

    #[test]
    fn rejects_malformed_ids() {
        for id in [
            "",
            "udyam",
            "udyam_1700000000000",
            "session_1700000000000_abc123xyz",
            "udyam_170000000000_abc123xyz",
            "udyam_1700000000000_ABC123XYZ",
            "udyam_1700000000000_abc123xy",
            "udyam_1700000000000_abc123xyz_extra",
            "udyam_17000000000a0_abc123xyz",
        ] {
            assert!(!is_well_formed_session_id(id), "{id} should be rejected");
        }
    }

    #[test]
    fn accepts_known_good_id() {
        assert!(is_well_formed_session_id("udyam_1700000000000_abc123xyz"));
    }
}
