//! Credential verification seam.
//!
//! Login passwords and voice passwords go through a [`CredentialVerifier`]
//! so a hashed or externally-backed scheme can replace plain equality
//! without touching the transfer workflow.

/// Decides whether a supplied secret matches the stored one.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, supplied: &str, stored: &str) -> bool;
}

/// Verbatim string equality.
///
/// This carries no cryptographic weight at all; it reproduces the accept or
/// reject behavior of the stored-in-the-clear scheme it replaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn verify(&self, supplied: &str, stored: &str) -> bool {
        supplied == stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plaintext_matches_exactly() {
        let verifier = PlaintextVerifier;

        assert!(verifier.verify("open sesame", "open sesame"));
        assert!(!verifier.verify("open Sesame", "open sesame"));
        assert!(!verifier.verify("", "open sesame"));
    }
}
