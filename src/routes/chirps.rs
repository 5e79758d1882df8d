/// Chirp Routes
///
/// Create, read, list and delete chirps.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::run_blocking;
use crate::auth::Claims;
use crate::database::{self, Database, MessageFilter, MessageId, SortDirection};
use crate::error::{AppError, ErrorContext};

#[derive(Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

/// Query string of `GET /api/chirps`
#[derive(Deserialize)]
pub struct ListChirpsQuery {
    pub author_id: Option<i64>,
    pub sort: Option<String>,
}

/// POST /api/chirps
///
/// **Requires valid JWT access token.** The caller becomes the author.
///
/// # Errors
/// - 400: Empty body or longer than 140 characters
/// - 401: Missing or invalid token
pub async fn create_chirp(
    form: web::Json<CreateChirpRequest>,
    claims: web::ReqData<Claims>,
    db: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    let author_id = claims.user_id()?;
    let context = ErrorContext::new("create_chirp").with_user_id(author_id);
    let body = form.into_inner().body;
    let db = db.into_inner();

    let message = run_blocking(move || database::create_message(&db, &body, author_id))
        .await
        .map_err(|e| context.log_error(e))?;

    Ok(HttpResponse::Created().json(message))
}

/// GET /api/chirps?author_id=&sort=asc|desc
pub async fn list_chirps(
    query: web::Query<ListChirpsQuery>,
    db: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let direction = match query.sort.as_deref() {
        Some(sort) => sort.parse::<SortDirection>()?,
        None => SortDirection::default(),
    };
    let filter = MessageFilter {
        author_id: query.author_id,
    };
    let db = db.into_inner();

    let messages = run_blocking(move || database::list_messages(&db, filter, direction)).await?;

    Ok(HttpResponse::Ok().json(messages))
}

/// GET /api/chirps/{chirp_id}
pub async fn get_chirp(
    path: web::Path<MessageId>,
    db: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let db = db.into_inner();

    let message = run_blocking(move || database::get_message(&db, id)).await?;

    Ok(HttpResponse::Ok().json(message))
}

/// DELETE /api/chirps/{chirp_id}
///
/// **Requires valid JWT access token.** Only the author may delete a chirp.
///
/// # Errors
/// - 403: Chirp belongs to another user
/// - 404: No such chirp
pub async fn delete_chirp(
    path: web::Path<MessageId>,
    claims: web::ReqData<Claims>,
    db: web::Data<Database>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;
    let context = ErrorContext::new("delete_chirp").with_user_id(user_id);
    let id = path.into_inner();
    let db = db.into_inner();

    run_blocking(move || database::delete_message(&db, id, user_id))
        .await
        .map_err(|e| context.log_error(e))?;

    Ok(HttpResponse::NoContent().finish())
}
