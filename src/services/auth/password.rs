use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::error;

use crate::error::AppError;

/// Salted one-way hash (Argon2id, default parameters).
///
/// A fresh salt is generated per call, so two hashes of the same input
/// differ. The digest is opaque to everything outside this module.
pub fn hash(plain: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            AppError::Internal
        })?
        .to_string();

    Ok(digest)
}

/// `Ok(false)` on mismatch. A digest that cannot be parsed is a stored-data
/// problem and surfaces as an internal error, not a failed login.
pub fn verify(plain: &str, digest: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(digest).map_err(|e| {
        error!(error = %e, "stored password digest is malformed");
        AppError::Internal
    })?;

    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => {
            error!(error = %e, "password verification failed");
            Err(AppError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrips() {
        let digest = hash("SecureP@ss1").unwrap();
        assert!(verify("SecureP@ss1", &digest).unwrap());
    }

    #[test]
    fn wrong_password_verifies_false() {
        let digest = hash("SecureP@ss1").unwrap();
        assert!(!verify("wrong-password", &digest).unwrap());
    }

    #[test]
    fn identical_inputs_produce_distinct_digests() {
        let a = hash("same-input").unwrap();
        let b = hash("same-input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_digest_is_an_internal_error() {
        assert!(verify("anything", "not-a-phc-string").is_err());
    }
}
