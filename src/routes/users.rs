use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::{run_blocking, UserResponse};
use crate::auth::Claims;
use crate::database::{self, Database};
use crate::error::{AppError, ErrorContext};

#[derive(Deserialize)]
pub struct UserRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/users
///
/// # Errors
/// - 400: Empty or over-long password
/// - 409: Email already registered
pub async fn create_user(
    form: web::Json<UserRequest>,
    db: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    let UserRequest { email, password } = form.into_inner();
    let db = db.into_inner();

    let user = run_blocking(move || database::create_user(&db, &email, &password)).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// PUT /api/users
///
/// **Requires valid JWT access token.** Updates the caller's own email and password.
pub async fn update_user(
    form: web::Json<UserRequest>,
    claims: web::ReqData<Claims>,
    db: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;
    let context = ErrorContext::new("update_user").with_user_id(user_id);
    let UserRequest { email, password } = form.into_inner();
    let db = db.into_inner();

    let user = run_blocking(move || {
        database::update_user(&db, user_id, &email, &password)?;
        database::get_user(&db, user_id)
    })
    .await
    .map_err(|e| context.log_error(e))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
