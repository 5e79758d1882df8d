/// JWT Authentication Middleware
///
/// Validates access tokens from the Authorization header and injects
/// claims into request extensions for use by route handlers.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, AUTHORIZATION},
    Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::auth::parse_access_token;
use crate::configuration::JwtSettings;

/// Credential from an `Authorization: <scheme> <credential>` header
///
/// Returns `None` when the header is missing, not UTF-8, uses another scheme,
/// or carries an empty credential.
pub fn authorization_credential(headers: &HeaderMap, scheme: &str) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(scheme))
        .and_then(|rest| rest.strip_prefix(' '))
        .map(|credential| credential.trim().to_string())
        .filter(|credential| !credential.is_empty())
}

/// Compare a presented secret with the expected one without stopping at the
/// first differing byte
pub fn credentials_match(presented: &str, expected: &str) -> bool {
    let (presented, expected) = (presented.as_bytes(), expected.as_bytes());
    if presented.len() != expected.len() {
        return false;
    }

    presented
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

/// JWT middleware for protecting routes
///
/// Extracts and validates the bearer access token; handlers read the
/// verified claims with `web::ReqData<Claims>`.
pub struct JwtMiddleware {
    jwt_config: JwtSettings,
}

impl JwtMiddleware {
    pub fn new(jwt_config: JwtSettings) -> Self {
        Self { jwt_config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(JwtMiddlewareService {
            service: Rc::new(service),
            jwt_config: self.jwt_config.clone(),
        }))
    }
}

pub struct JwtMiddlewareService<S> {
    service: Rc<S>,
    jwt_config: JwtSettings,
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = authorization_credential(req.headers(), "Bearer");

        match token {
            None => {
                tracing::warn!("Missing or invalid Authorization header");
                let response = HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "Missing or invalid authorization header",
                    "code": "MISSING_TOKEN"
                }));
                Box::pin(async move {
                    Err(actix_web::error::InternalError::from_response(
                        "Unauthorized",
                        response,
                    )
                    .into())
                })
            }
            Some(token) => match parse_access_token(&self.jwt_config.secret, &token) {
                Ok(claims) => {
                    tracing::debug!(subject = %claims.sub, "JWT validated successfully");

                    req.extensions_mut().insert(claims);

                    let service = self.service.clone();
                    Box::pin(async move { service.call(req).await })
                }
                Err(e) => {
                    tracing::warn!("JWT validation failed: {}", e);
                    let response = HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "Invalid or expired token",
                        "code": "TOKEN_INVALID"
                    }));
                    Box::pin(async move {
                        Err(actix_web::error::InternalError::from_response(
                            "Invalid token",
                            response,
                        )
                        .into())
                    })
                }
            },
        }
    }
}
