/// Authentication module
///
/// Handles access token issuing/parsing, password hashing,
/// and refresh token management.

mod claims;
mod jwt;
mod password;
mod refresh_token;

pub use claims::Claims;
pub use claims::ISSUER;
pub use jwt::effective_ttl;
pub use jwt::issue_access_token;
pub use jwt::parse_access_token;
pub use jwt::DEFAULT_ACCESS_TOKEN_TTL;
pub use password::hash_password;
pub use password::verify_password;
pub use refresh_token::find_refresh_token;
pub use refresh_token::generate_refresh_token;
pub use refresh_token::issue_refresh_token;
pub use refresh_token::revoke_refresh_token;
pub use refresh_token::validate_refresh_token;
pub use refresh_token::REFRESH_TOKEN_LIFETIME_DAYS;
