//! Password hashing and verification using Argon2id.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use moim_core::error::CoreError;

/// Minimum password length accepted at signup and invitation acceptance.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a plaintext password with Argon2id and a random salt.
///
/// Returns the PHC-format hash string for storage.
pub fn hash_password(password: &str) -> Result<String, CoreError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CoreError::Internal(format!("Password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-format hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` otherwise.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, CoreError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| CoreError::Internal(format!("Invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Validate password strength: at least [`MIN_PASSWORD_LENGTH`] characters,
/// with at least one letter and one digit.
pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err(CoreError::Validation(
            "Password must contain at least one letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation(
            "Password must contain at least one digit".to_string(),
        ));
    }
    Ok(())
}
