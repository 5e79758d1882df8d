/// JWT Claims structure
///
/// Payload of an access token: registered claims only (RFC 7519).

use serde::{Deserialize, Serialize};

use crate::database::UserId;
use crate::error::{AppError, AuthError};

/// Issuer written into and required from every access token
pub const ISSUER: &str = "chirpy";

/// JWT Claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user id, stringified)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create claims for `subject` valid for `ttl_seconds` from now
    pub fn new(subject: impl Into<String>, ttl_seconds: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: subject.into(),
            exp: now + ttl_seconds,
            iat: now,
            iss: ISSUER.to_string(),
        }
    }

    /// Extract the user id from the subject
    ///
    /// # Errors
    /// A subject that is not an integer is treated as a bad token, not a crash
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub.parse::<UserId>().map_err(|_| {
            tracing::warn!(subject = %self.sub, "Access token subject is not a user id");
            AppError::Auth(AuthError::MalformedToken)
        })
    }

    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new("7", 3600);

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.lifetime_seconds(), 3600);
    }

    #[test]
    fn test_user_id_extraction() {
        let claims = Claims::new("42", 3600);
        assert_eq!(claims.user_id().unwrap(), 42);
    }

    #[test]
    fn test_invalid_user_id() {
        let claims = Claims::new("not-a-number", 3600);

        assert!(matches!(
            claims.user_id(),
            Err(AppError::Auth(AuthError::MalformedToken))
        ));
    }
}
