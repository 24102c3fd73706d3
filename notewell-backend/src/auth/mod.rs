//! Caller identity: credential verification and signed login tokens.

pub mod credentials;
pub mod token;

pub use credentials::{CredentialVerifier, ExactMatchVerifier};
pub use token::{TokenClaims, TokenSigner};

use crate::db::Database;
use crate::error::ApiError;
use crate::models::User;

/// Resolve a username/credential pair to a user. Unknown usernames and
/// wrong credentials are indistinguishable to the caller.
pub fn authenticate(
    db: &Database,
    verifier: &dyn CredentialVerifier,
    username: &str,
    credential: &str,
) -> Result<User, ApiError> {
    match db.get_user_by_username(username)? {
        Some(user) if verifier.verify(&user.credential, credential) => Ok(user),
        _ => Err(ApiError::Unauthenticated("Invalid credentials".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_authenticate_against_stored_users() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::new(db_path.to_str().unwrap()).expect("Failed to initialize database");
        db.create_user("alice", "alice@example.com", "pw-a")
            .expect("Failed to create user");

        let verifier = ExactMatchVerifier;

        let user = authenticate(&db, &verifier, "alice", "pw-a").expect("Failed to authenticate");
        assert_eq!(user.username, "alice");

        let wrong_pw = authenticate(&db, &verifier, "alice", "pw-b");
        assert!(matches!(wrong_pw, Err(ApiError::Unauthenticated(_))));

        let unknown = authenticate(&db, &verifier, "nobody", "pw-a");
        assert!(matches!(unknown, Err(ApiError::Unauthenticated(_))));
    }
}
