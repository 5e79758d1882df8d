/// JWT Token Generation and Validation
///
/// Access tokens are HS256-signed with a shared secret that callers pass in
/// explicitly, so tests can use their own secrets.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::{Claims, ISSUER};
use crate::error::{AppError, AuthError};

/// Lifetime used when the requested TTL is missing or out of range
pub const DEFAULT_ACCESS_TOKEN_TTL: i64 = 86_400;

/// Clamp a requested TTL into `(0, 86400]`, falling back to the default
pub fn effective_ttl(requested_ttl_seconds: i64) -> i64 {
    if requested_ttl_seconds > 0 && requested_ttl_seconds <= DEFAULT_ACCESS_TOKEN_TTL {
        requested_ttl_seconds
    } else {
        DEFAULT_ACCESS_TOKEN_TTL
    }
}

/// Issue a signed access token for `subject`
///
/// # Arguments
/// * `secret` - Shared HMAC secret
/// * `subject` - Opaque subject, the stringified user id
/// * `requested_ttl_seconds` - Desired lifetime; `0` or anything out of range means 24h
///
/// # Errors
/// Returns error if token encoding fails
pub fn issue_access_token(
    secret: &str,
    subject: &str,
    requested_ttl_seconds: i64,
) -> Result<String, AppError> {
    let claims = Claims::new(subject, effective_ttl(requested_ttl_seconds));

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Verify an access token and return its claims
///
/// # Errors
/// - `AuthError::InvalidSignature` if the token was not signed with `secret`
/// - `AuthError::TokenExpired` once `exp` has passed
/// - `AuthError::MalformedToken` for anything else (garbage, wrong issuer, ...)
pub fn parse_access_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[ISSUER]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::warn!("JWT validation error: {}", e);
        let kind = match e.kind() {
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::MalformedToken,
        };
        AppError::Auth(kind)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-characters-long";

    #[test]
    fn test_issue_and_parse_token() {
        let token = issue_access_token(SECRET, "7", 3600).expect("Failed to generate token");
        let claims = parse_access_token(SECRET, &token).expect("Failed to validate token");

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.user_id().unwrap(), 7);
    }

    #[test]
    fn test_ttl_clamping() {
        for (requested, expected) in [
            (0, 86_400),
            (-5, 86_400),
            (90_000, 86_400),
            (86_400, 86_400),
            (120, 120),
        ] {
            let token = issue_access_token(SECRET, "7", requested).unwrap();
            let claims = parse_access_token(SECRET, &token).unwrap();
            assert_eq!(
                claims.lifetime_seconds(),
                expected,
                "requested TTL {} should give {}",
                requested,
                expected
            );
        }
    }

    #[test]
    fn test_expired_token() {
        let token = issue_access_token(SECRET, "7", 1).unwrap();
        assert!(parse_access_token(SECRET, &token).is_ok());

        std::thread::sleep(std::time::Duration::from_millis(2100));

        let result = parse_access_token(SECRET, &token);
        assert!(matches!(result, Err(AppError::Auth(AuthError::TokenExpired))));
    }

    #[test]
    fn test_wrong_secret() {
        let token = issue_access_token(SECRET, "7", 3600).unwrap();

        let result = parse_access_token("some-other-secret", &token);
        assert!(matches!(
            result,
            Err(AppError::Auth(AuthError::InvalidSignature))
        ));
    }

    #[test]
    fn test_invalid_token() {
        let result = parse_access_token(SECRET, "invalid.token.here");
        assert!(matches!(
            result,
            Err(AppError::Auth(AuthError::MalformedToken))
        ));
    }

    #[test]
    fn test_wrong_issuer() {
        let claims = Claims {
            iss: "someone-else".to_string(),
            ..Claims::new("7", 3600)
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(parse_access_token(SECRET, &token).is_err());
    }
}
