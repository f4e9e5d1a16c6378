//! # Module Catalogue
//!
//! Backend logic for `GET /api/modules/`.
//!
//! ## Workflow
//!
//! 1.  **Store read**: `list_modules` loads every module instance with its
//!     module name and the professors who taught it, in one query.
//!
//! 2.  **HTTP Response**: `200 OK` with the summaries as a JSON array. An
//!     empty catalogue is an empty array, not an error.

use crate::error::ApiError;
use crate::services::with_connection;
use crate::store::{instances, Database, StoreResult};
use actix_web::{web, HttpResponse};
use common::model::module::ModuleInstanceSummary;
use log::debug;
use rusqlite::Connection;

/// Actix web handler for `GET /api/modules/`. Needs no token.
pub(crate) async fn process(database: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let modules = with_connection(&database, |conn| list_modules(conn)).await?;
    debug!("Listing {} module instances", modules.len());
    Ok(HttpResponse::Ok().json(modules))
}

/// Lists every module instance.
///
/// # Arguments
/// * `conn` - An open connection.
///
/// # Returns
/// One summary per instance, ordered by module code, year and semester. Each
/// summary names its teaching professors, possibly none.
pub fn list_modules(conn: &Connection) -> StoreResult<Vec<ModuleInstanceSummary>> {
    instances::list_summaries(conn)
}
