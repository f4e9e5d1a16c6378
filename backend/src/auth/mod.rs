//! # Session/Auth Gateway
//!
//! Login hands out an opaque token; clients send it back as
//! `Authorization: Token <key>`. Handlers that need a caller take an
//! [`AuthenticatedUser`] argument, which resolves the header before the
//! handler body runs and answers `401 Unauthorized` on its own when the
//! header is missing, malformed, unknown or expired.

pub mod password;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::services::with_connection;
use crate::store::users::User;
use crate::store::{tokens, Database};
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use std::time::Duration;

const SCHEME: &str = "Token";

/// The key from an `Authorization: Token <key>` header, if present.
pub fn token_from_header(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, key) = value.trim().split_once(' ')?;
    let key = key.trim();
    (scheme.eq_ignore_ascii_case(SCHEME) && !key.is_empty()).then(|| key.to_string())
}

/// Configured token lifetime; `None` when tokens never expire.
pub fn token_ttl(req: &HttpRequest) -> Option<Duration> {
    req.app_data::<web::Data<ServerConfig>>()
        .and_then(|config| config.token_ttl)
}

/// The caller of an authenticated endpoint.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = token_from_header(req);
        let ttl = token_ttl(req);
        let database = req.app_data::<web::Data<Database>>().cloned();

        Box::pin(async move {
            let token = token.ok_or_else(|| {
                ApiError::Unauthorized("Authentication credentials were not provided.".to_string())
            })?;
            let database = database
                .ok_or_else(|| ApiError::Internal("database is not configured".to_string()))?;

            let key = token.clone();
            let user = with_connection(&database, move |conn| tokens::resolve(conn, &key, ttl))
                .await?
                .ok_or_else(|| ApiError::Unauthorized("Invalid token.".to_string()))?;

            Ok(AuthenticatedUser { user, token })
        })
    }
}
