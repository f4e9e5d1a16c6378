//! # Professor Ratings
//!
//! Backend logic for `GET /api/professor-ratings/`.
//!
//! ## Workflow
//!
//! 1.  **Store read**: every rating value is loaded, grouped by professor.
//!
//! 2.  **Aggregation**: professors without ratings are dropped. The rest get
//!     the mean over all their ratings in every module, to one decimal place.
//!
//! 3.  **HTTP Response**: `200 OK` with a JSON array of `ProfessorRating`.

use crate::aggregate::professor_average;
use crate::error::ApiError;
use crate::services::with_connection;
use crate::store::{ratings, Database, StoreResult};
use actix_web::{web, HttpResponse};
use common::model::professor::ProfessorRating;
use rusqlite::Connection;

/// Actix web handler for `GET /api/professor-ratings/`.
///
/// # Returns
/// - `200 OK` with the listing, possibly empty.
/// - `500 Internal Server Error` if the store cannot be read.
pub(crate) async fn process(database: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let listing = with_connection(&database, |conn| professor_ratings(conn)).await?;
    Ok(HttpResponse::Ok().json(listing))
}

/// Average rating of every professor who has been rated at least once.
///
/// # Arguments
/// * `conn` - An open connection.
///
/// # Returns
/// One entry per rated professor, in professor id order.
pub fn professor_ratings(conn: &Connection) -> StoreResult<Vec<ProfessorRating>> {
    let listing = ratings::values_by_professor(conn)?
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(professor, values)| ProfessorRating {
            professor_id: professor.professor_id,
            name: professor.name,
            rating: professor_average(&values),
        })
        .collect();
    Ok(listing)
}
