use actix_web::{web, HttpResponse};

use super::run_blocking;
use crate::configuration::ApplicationSettings;
use crate::database::Database;
use crate::error::AppError;

/// POST /admin/reset
///
/// Wipes every chirp, user and token. Only allowed on the `dev` platform.
pub async fn reset(
    db: web::Data<Database>,
    application: web::Data<ApplicationSettings>,
) -> Result<HttpResponse, AppError> {
    if !application.is_dev() {
        return Err(AppError::Forbidden(
            "reset is only allowed in dev".to_string(),
        ));
    }

    let db = db.into_inner();
    run_blocking(move || db.reset()).await?;

    Ok(HttpResponse::Ok().finish())
}
