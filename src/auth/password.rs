/// Password Hashing and Verification
///
/// Handles password hashing with bcrypt. The cost factor is fixed and the
/// comparison is left to bcrypt, which compares in constant time.

use bcrypt::{hash, verify};

use crate::error::{AppError, AuthError, ValidationError};

const HASH_COST: u32 = 10;
/// bcrypt ignores everything past 72 bytes
const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password using bcrypt
///
/// # Errors
/// Returns error if:
/// - Password is empty or longer than 72 bytes
/// - Bcrypt hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    validate_password_input(password)?;

    hash(password, HASH_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its hash
///
/// # Errors
/// - `AuthError::InvalidCredentials` when the password does not match, or is
///   longer than any password `hash_password` accepts
/// - `AppError::Internal` when the stored hash is not a bcrypt hash
pub fn verify_password(password_hash: &str, password: &str) -> Result<(), AppError> {
    // bcrypt would silently compare only the first 72 bytes
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::Auth(AuthError::InvalidCredentials));
    }

    let matches = verify(password, password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

    if matches {
        Ok(())
    } else {
        Err(AppError::Auth(AuthError::InvalidCredentials))
    }
}

fn validate_password_input(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(ValidationError::EmptyField("password".to_string()).into());
    }

    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::TooLong("password".to_string(), MAX_PASSWORD_BYTES).into());
    }

    Ok(())
}
