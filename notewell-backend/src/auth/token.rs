//! Signed login tokens.
//!
//! A token is `base64url(claims).base64url(hmac_sha256(key, claims))` where
//! claims is a small JSON document. Verification is offline: no storage
//! lookup, the expiry rides inside the signed payload.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username the token vouches for
    pub sub: String,
    /// Expiry as unix seconds
    pub exp: i64,
    /// Per-issue nonce so two logins in the same second produce distinct
    /// tokens
    pub jti: String,
}

pub struct TokenSigner {
    key: Vec<u8>,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(key: &[u8], ttl_secs: i64) -> Self {
        Self {
            key: key.to_vec(),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Issue a token for `username`, valid for the configured TTL.
    pub fn issue(&self, username: &str) -> String {
        let claims = TokenClaims {
            sub: username.to_string(),
            exp: (Utc::now() + self.ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        let payload = serde_json::to_vec(&claims).expect("claims always serialize");

        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(&payload);
        let sig = mac.finalize().into_bytes();

        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(sig)
        )
    }

    /// Check signature and expiry. Malformed, tampered, and expired tokens
    /// all come back as None.
    pub fn verify(&self, token: &str) -> Option<TokenClaims> {
        let (payload_b64, sig_b64) = token.split_once('.')?;
        let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
        let sig = URL_SAFE_NO_PAD.decode(sig_b64).ok()?;

        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(&payload);
        if mac.verify_slice(&sig).is_err() {
            log::debug!("Rejected token with bad signature");
            return None;
        }

        let claims: TokenClaims = serde_json::from_slice(&payload).ok()?;
        if claims.exp <= Utc::now().timestamp() {
            log::debug!("Rejected expired token for {}", claims.sub);
            return None;
        }

        Some(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_verify() {
        let signer = TokenSigner::new(b"test-key", 60);
        let token = signer.issue("alice");

        let claims = signer.verify(&token).expect("Failed to verify fresh token");
        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_tokens_are_unique_per_issue() {
        let signer = TokenSigner::new(b"test-key", 60);
        assert_ne!(signer.issue("alice"), signer.issue("alice"));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let signer = TokenSigner::new(b"test-key", -60);
        let token = signer.issue("alice");
        assert!(signer.verify(&token).is_none());
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let signer = TokenSigner::new(b"test-key", 60);
        let other = TokenSigner::new(b"other-key", 60);
        let token = signer.issue("alice");
        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let signer = TokenSigner::new(b"test-key", 60);
        let token = signer.issue("alice");

        let (_, sig) = token.split_once('.').unwrap();
        let forged_claims = TokenClaims {
            sub: "mallory".to_string(),
            exp: Utc::now().timestamp() + 3600,
            jti: "forged".to_string(),
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{}.{}", forged_payload, sig);

        assert!(signer.verify(&forged).is_none());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let signer = TokenSigner::new(b"test-key", 60);
        assert!(signer.verify("").is_none());
        assert!(signer.verify("no-dot-here").is_none());
        assert!(signer.verify("not!base64.also!not").is_none());
        assert!(signer.verify("YWJj.ZGVm").is_none());
    }
}
