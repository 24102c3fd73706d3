use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Word characters, dots and hyphens around a single '@', with a dotted
/// suffix. A shape check, not RFC 5322.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").unwrap());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Opaque credential exactly as supplied at signup. Compared only
    /// through `CredentialVerifier`, never serialized out.
    #[serde(skip_serializing)]
    pub credential: String,
    pub created_at: DateTime<Utc>,
}

/// Signup payload
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub credential: String,
}

/// Login payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub credential: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_addresses() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("bob.smith@mail.example.org"));
        assert!(is_valid_email("under_score@host.io"));
        assert!(is_valid_email("dash-ed@sub.domain.co"));
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("trailing@example."));
        assert!(!is_valid_email("spaced out@example.com"));
        assert!(!is_valid_email("two@@example.com"));
    }
}
