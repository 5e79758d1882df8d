mod admin;
mod auth;
mod chirps;
mod health_check;
mod users;
mod webhooks;

pub use admin::reset;
pub use auth::{login, refresh, revoke};
pub use chirps::{create_chirp, delete_chirp, get_chirp, list_chirps};
pub use health_check::health_check;
pub use users::{create_user, update_user};
pub use webhooks::polka_webhook;

use actix_web::web;
use serde::Serialize;

use crate::database::User;
use crate::error::AppError;

/// Public view of a user. The password hash never leaves the server.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub is_chirpy_red: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_chirpy_red: user.is_chirpy_red,
        }
    }
}

/// Run store work (file I/O, bcrypt) on the blocking thread pool
async fn run_blocking<F, T>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))?
}
