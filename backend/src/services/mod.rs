//! # Ratings Service
//!
//! HTTP endpoints, grouped by area. Each area module registers its routes
//! through a `configure_routes` function and keeps one file per operation.
//! The file exposes the actix handler `process` next to a plain function that
//! does the work against a `rusqlite::Connection`, so the logic can be used
//! without going through HTTP.
//!
//! ## Areas
//! - `accounts`: register, login, token, logout.
//! - `modules`: the module catalogue.
//! - `professors`: rating listings and per-module averages.
//! - `ratings`: rating submission.

pub mod accounts;
pub mod modules;
pub mod professors;
pub mod ratings;

use crate::error::ApiError;
use crate::store::{Database, StoreResult};
use actix_web::web::{self, scope};
use actix_web::{HttpResponse, Scope};
use rusqlite::Connection;

/// Largest request body accepted by any endpoint.
const BODY_LIMIT: usize = 64 * 1024;

/// The base path of the catalogue and rating endpoints.
const API_PATH: &str = "/api";

/// Registers every endpoint on an actix `App`.
///
/// Account endpoints sit at the root; everything else is mounted under
/// `/api` through [`api_scope`]. The caller provides `web::Data<Database>`
/// and, optionally, `web::Data<ServerConfig>` as app data.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(BODY_LIMIT)
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .app_data(web::PayloadConfig::new(BODY_LIMIT))
    .configure(accounts::configure_routes)
    .service(api_scope());
}

/// The `/api` scope with the module, professor and rating routes.
///
/// Actix stops at the first scope whose prefix matches, so there is exactly
/// one `/api` scope and the areas register their paths inside it.
pub fn api_scope() -> Scope {
    scope(API_PATH)
        .configure(modules::configure_routes)
        .configure(professors::configure_routes)
        .configure(ratings::configure_routes)
}

/// Fallback for unknown routes.
pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound("Not found".to_string()))
}

/// Runs `work` on a fresh connection on actix's blocking thread pool.
pub(crate) async fn with_connection<F, T>(database: &Database, work: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let database = database.clone();
    let result = web::block(move || {
        let mut conn = database.connect()?;
        work(&mut conn)
    })
    .await
    .map_err(|err| ApiError::Internal(err.to_string()))?;
    result.map_err(ApiError::from)
}
