/// Strategy for comparing a stored credential against one presented at
/// login. Implementations take the stored form first.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, stored: &str, provided: &str) -> bool;
}

/// Byte-for-byte equality on the opaque credential string. The seam where a
/// salted-hash verifier would plug in.
pub struct ExactMatchVerifier;

impl CredentialVerifier for ExactMatchVerifier {
    fn verify(&self, stored: &str, provided: &str) -> bool {
        stored == provided
    }
}
