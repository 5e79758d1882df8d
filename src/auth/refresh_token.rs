/// Refresh Token Management
///
/// Handles refresh token generation, storage, validation, and revocation.
/// Refresh tokens are:
/// - 32 bytes from the OS CSPRNG, hex-encoded
/// - Valid for 60 days from issue
/// - Revoked by moving `expires_at` to "now"; the record is kept for audit

use chrono::{Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::database::{Database, RefreshToken, UserId};
use crate::error::{AppError, AuthError};

const REFRESH_TOKEN_BYTES: usize = 32;
pub const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 60;

/// Generate a new random refresh token value
///
/// Collisions are not checked; at 256 bits they are not a practical concern.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Issue and store a refresh token for `user_id`
///
/// # Errors
/// Returns error if the store cannot be written
pub fn issue_refresh_token(db: &Database, user_id: UserId) -> Result<RefreshToken, AppError> {
    let issued_at = Utc::now();
    let refresh_token = RefreshToken {
        token: generate_refresh_token(),
        user_id,
        issued_at,
        expires_at: issued_at + Duration::days(REFRESH_TOKEN_LIFETIME_DAYS),
    };

    let stored = refresh_token.clone();
    db.transact(move |snapshot| {
        snapshot.tokens.insert(stored.token.clone(), stored);
        Ok(())
    })?;

    tracing::info!(user_id = user_id, "Refresh token issued");
    Ok(refresh_token)
}

/// Look up a refresh token record, revoked or not
pub fn find_refresh_token(db: &Database, token: &str) -> Result<RefreshToken, AppError> {
    db.query(|snapshot| {
        snapshot
            .tokens
            .get(token)
            .cloned()
            .ok_or_else(|| AppError::NotFound("refresh token".to_string()))
    })
}

/// Check that a refresh token exists and has not expired or been revoked
///
/// # Returns
/// User ID associated with the token if valid
///
/// # Errors
/// - `AppError::NotFound` if the token was never issued
/// - `AuthError::TokenExpired` if it has expired or was revoked
pub fn validate_refresh_token(db: &Database, token: &str) -> Result<UserId, AppError> {
    let record = find_refresh_token(db, token)?;

    if !record.is_valid_at(Utc::now()) {
        tracing::warn!(user_id = record.user_id, "Attempt to use expired or revoked refresh token");
        return Err(AppError::Auth(AuthError::TokenExpired));
    }

    Ok(record.user_id)
}

/// Revoke a refresh token by expiring it now
///
/// # Errors
/// Returns `AppError::NotFound` if the token was never issued
pub fn revoke_refresh_token(db: &Database, token: &str) -> Result<(), AppError> {
    let user_id = db.transact(|snapshot| {
        let record = snapshot
            .tokens
            .get_mut(token)
            .ok_or_else(|| AppError::NotFound("refresh token".to_string()))?;

        let now = Utc::now();
        if record.expires_at > now {
            record.expires_at = now;
        }
        Ok(record.user_id)
    })?;

    tracing::info!(user_id = user_id, "Refresh token revoked");
    Ok(())
}
