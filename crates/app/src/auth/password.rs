//! Password hashing.

use std::fmt::Debug;

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use zeroize::Zeroize;

const SALT_BYTES: usize = 16;

#[derive(Debug, Error)]
#[error("failed to hash password: {0}")]
pub struct PasswordHashError(String);

impl From<password_hash::Error> for PasswordHashError {
    fn from(error: password_hash::Error) -> Self {
        Self(error.to_string())
    }
}

/// Credential hashing primitive used by the auth service.
pub trait PasswordHasher: Debug + Send + Sync {
    /// Hash `password` into a self-describing string suitable for storage.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying key derivation fails.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Whether `password` matches a hash produced by [`PasswordHasher::hash`].
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id with default parameters, stored as a PHC string (`$argon2id$v=19$...`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let mut bytes = [0_u8; SALT_BYTES];

        OsRng.fill_bytes(&mut bytes);

        let salt = SaltString::encode_b64(&bytes);

        bytes.zeroize();

        let salt = salt?;

        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hash_verifies_the_same_password() -> TestResult {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("segreta")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("segreta", &hash));
        assert!(!hasher.verify("Segreta", &hash));

        Ok(())
    }

    #[test]
    fn hashes_are_salted() -> TestResult {
        let hasher = Argon2PasswordHasher;

        assert_ne!(hasher.hash("segreta")?, hasher.hash("segreta")?);

        Ok(())
    }

    #[test]
    fn malformed_hashes_never_verify() {
        let hasher = Argon2PasswordHasher;

        for hash in ["", "segreta", "$argon2id$", "sha256$00$00"] {
            assert!(!hasher.verify("segreta", hash), "{hash} should not verify");
        }
    }
}
