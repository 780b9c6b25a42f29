//! Password hashing for user accounts.
//!
//! Hashes use Argon2id with a per-password random salt and are stored in PHC
//! string format, so the algorithm parameters travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::CoreError;

/// Shortest password accepted at registration or change.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Reject passwords that fall below the minimum length.
pub fn check_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Hash a plaintext password with Argon2id, returning the PHC string.
pub fn hash(password: &str) -> Result<String, CoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CoreError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored PHC hash.
///
/// `Ok(false)` means the password does not match; a malformed stored hash is
/// an internal error, not a mismatch.
pub fn verify(password: &str, stored: &str) -> Result<bool, CoreError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| CoreError::Internal(format!("stored password hash is malformed: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CoreError::Internal(format!(
            "password verification failed: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash("correct-horse-battery-staple").unwrap();
        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");
        assert!(verify("correct-horse-battery-staple", &hash).unwrap());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hash = hash("real-password").unwrap();
        assert!(!verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn strength_enforces_minimum_length() {
        let err = check_strength("short").unwrap_err();
        assert!(err.to_string().contains("at least 8 characters"));
        assert!(check_strength("long-enough-pw").is_ok());
    }
}
