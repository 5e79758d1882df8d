use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use super::run_blocking;
use crate::configuration::PolkaSettings;
use crate::database::{self, Database, UserId};
use crate::error::{AppError, AuthError};
use crate::middleware::{authorization_credential, credentials_match};

const USER_UPGRADED: &str = "user.upgraded";

#[derive(Deserialize)]
pub struct WebhookData {
    pub user_id: UserId,
}

#[derive(Deserialize)]
pub struct WebhookRequest {
    pub event: String,
    pub data: WebhookData,
}

/// POST /api/polka/webhooks
///
/// Billing provider callback, authenticated with `Authorization: ApiKey <key>`.
/// Only `user.upgraded` changes anything; other events are acknowledged with 204.
pub async fn polka_webhook(
    req: HttpRequest,
    form: web::Json<WebhookRequest>,
    db: web::Data<Database>,
    polka: web::Data<PolkaSettings>,
) -> Result<HttpResponse, AppError> {
    let api_key = authorization_credential(req.headers(), "ApiKey")
        .ok_or(AppError::Auth(AuthError::MissingToken))?;
    if !credentials_match(&api_key, &polka.api_key) {
        return Err(AppError::Auth(AuthError::InvalidCredentials));
    }

    let WebhookRequest { event, data } = form.into_inner();
    if event != USER_UPGRADED {
        tracing::debug!(event = %event, "Ignoring webhook event");
        return Ok(HttpResponse::NoContent().finish());
    }

    let db = db.into_inner();
    run_blocking(move || database::set_premium_flag(&db, data.user_id, true)).await?;

    Ok(HttpResponse::NoContent().finish())
}
