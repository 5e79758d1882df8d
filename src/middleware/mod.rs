/// Middleware module
///
/// Custom middleware for authentication.

mod jwt_middleware;

pub use jwt_middleware::{authorization_credential, credentials_match};
pub use jwt_middleware::JwtMiddleware;
