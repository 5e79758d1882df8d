/// Authentication Routes
///
/// Handles login, access token refresh, and refresh token revocation.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use super::run_blocking;
use crate::auth::{
    issue_access_token, issue_refresh_token, revoke_refresh_token, validate_refresh_token,
};
use crate::configuration::JwtSettings;
use crate::database::{self, Database};
use crate::error::{AppError, AuthError, ErrorContext};
use crate::middleware::authorization_credential;

/// User login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Requested access token lifetime; missing or out of range means 24h
    pub expires_in_seconds: Option<i64>,
}

/// Login response: the user plus both tokens
#[derive(Serialize)]
pub struct LoginResponse {
    pub id: i64,
    pub email: String,
    pub is_chirpy_red: bool,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/login
///
/// Authenticate with email and password.
/// Returns an access token and a refresh token on success.
///
/// # Errors
/// - 401: Unknown email or wrong password (same response for both)
pub async fn login(
    form: web::Json<LoginRequest>,
    db: web::Data<Database>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("user_login");
    let LoginRequest {
        email,
        password,
        expires_in_seconds,
    } = form.into_inner();
    let db = db.into_inner();

    let (user, refresh_token) = run_blocking(move || {
        let user = database::authenticate_user(&db, &email, &password).map_err(|e| match e {
            AppError::NotFound(_) => AppError::Auth(AuthError::InvalidCredentials),
            other => other,
        })?;
        let refresh_token = issue_refresh_token(&db, user.id)?;
        Ok((user, refresh_token))
    })
    .await
    .map_err(|e| context.log_error(e))?;

    let token = issue_access_token(
        &jwt_config.secret,
        &user.id.to_string(),
        expires_in_seconds.unwrap_or(0),
    )?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = user.id,
        "User logged in successfully"
    );

    Ok(HttpResponse::Ok().json(LoginResponse {
        id: user.id,
        email: user.email,
        is_chirpy_red: user.is_chirpy_red,
        token,
        refresh_token: refresh_token.token,
    }))
}

/// POST /api/refresh
///
/// Mint a new access token from `Authorization: Bearer <refresh_token>`.
///
/// # Errors
/// - 401: Missing, unknown, expired, or revoked refresh token
pub async fn refresh(
    req: HttpRequest,
    db: web::Data<Database>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("token_refresh");
    let refresh_token = authorization_credential(req.headers(), "Bearer")
        .ok_or(AppError::Auth(AuthError::MissingToken))?;
    let db = db.into_inner();

    let user_id = run_blocking(move || {
        validate_refresh_token(&db, &refresh_token).map_err(|e| match e {
            AppError::NotFound(_) => AppError::Auth(AuthError::MalformedToken),
            other => other,
        })
    })
    .await
    .map_err(|e| context.log_error(e))?;

    let token = issue_access_token(
        &jwt_config.secret,
        &user_id.to_string(),
        jwt_config.access_token_expiry,
    )?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = user_id,
        "Access token refreshed"
    );

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// POST /api/revoke
///
/// Revoke the refresh token in `Authorization: Bearer <refresh_token>`.
/// The token record is kept but can no longer be used.
pub async fn revoke(req: HttpRequest, db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("token_revoke");
    let refresh_token = authorization_credential(req.headers(), "Bearer")
        .ok_or(AppError::Auth(AuthError::MissingToken))?;
    let db = db.into_inner();

    run_blocking(move || {
        revoke_refresh_token(&db, &refresh_token).map_err(|e| match e {
            AppError::NotFound(_) => AppError::Auth(AuthError::MalformedToken),
            other => other,
        })
    })
    .await
    .map_err(|e| context.log_error(e))?;

    Ok(HttpResponse::NoContent().finish())
}
