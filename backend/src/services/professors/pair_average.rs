//! # Professor Average in a Module
//!
//! Backend logic for
//! `GET /api/professors/{professor_id}/modules/{module_code}/rating/`.
//!
//! ## Workflow
//!
//! 1.  **Lookup**: the professor and the module must both exist, and the
//!     professor must have taught at least one offering of the module.
//!     Otherwise the request ends with `404 Not Found`.
//!
//! 2.  **Aggregation**: the ratings of every offering are pooled and averaged
//!     to a whole number.
//!
//! 3.  **HTTP Response**: `200 OK` with a `PairAverageResponse`. A pair that
//!     was taught but never rated answers `"No ratings yet"`.

use crate::aggregate::pair_average;
use crate::error::ApiError;
use crate::services::with_connection;
use crate::store::{instances, modules, professors, ratings, Database, StoreError, StoreResult};
use actix_web::{web, HttpResponse};
use common::model::average::Average;
use common::responses::PairAverageResponse;
use log::debug;
use rusqlite::Connection;

/// Actix web handler for the per-module average.
///
/// # Arguments
/// * `database` - Shared database handle.
/// * `path` - The professor id and the module code, in that order.
///
/// # Returns
/// - `200 OK` with the average.
/// - `404 Not Found` for an unknown professor, an unknown module, or a
///   professor who never taught the module.
pub(crate) async fn process(
    database: web::Data<Database>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (professor_id, module_code) = path.into_inner();
    debug!("Average of {} in {}", professor_id, module_code);

    let average =
        with_connection(&database, move |conn| module_average(conn, &professor_id, &module_code))
            .await?;
    Ok(HttpResponse::Ok().json(PairAverageResponse {
        average_rating: average,
    }))
}

/// Whole-number average of a professor's ratings in one module, across every
/// offering of that module.
///
/// # Arguments
/// * `conn` - An open connection.
/// * `professor_id` - The professor to average.
/// * `module_code` - The module whose offerings are pooled.
///
/// # Returns
/// `Average::Rated` with the rounded mean, or `Average::NoRatings` when the
/// pair was taught but never rated. `StoreError::NotFound` otherwise.
pub fn module_average(
    conn: &Connection,
    professor_id: &str,
    module_code: &str,
) -> StoreResult<Average<i64>> {
    professors::get(conn, professor_id)?;
    modules::get(conn, module_code)?;
    if !instances::taught_by(conn, professor_id, module_code)? {
        return Err(StoreError::not_found(
            "Module instance",
            format!("professor {professor_id} in module {module_code}"),
        ));
    }
    let values = ratings::values_for_pair(conn, professor_id, module_code)?;
    Ok(pair_average(&values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::{database, module, professor, user};

    #[test]
    fn aggregates_across_offerings() {
        let (_dir, db) = database();
        let mut conn = db.connect().unwrap();
        professor(&conn, "JE1", "J. Excellent");
        module(&conn, "CD1", "Computing for Dummies");
        let first = instances::create(&mut conn, "CD1", 2017, 1, &["JE1".into()]).unwrap();
        let second = instances::create(&mut conn, "CD1", 2018, 2, &["JE1".into()]).unwrap();
        let amy = user(&conn, "amy");
        ratings::upsert(&conn, amy, "JE1", first, 4).unwrap();
        ratings::upsert(&conn, amy, "JE1", second, 5).unwrap();

        assert_eq!(module_average(&conn, "JE1", "CD1").unwrap(), Average::Rated(4));
    }

    #[test]
    fn taught_but_unrated() {
        let (_dir, db) = database();
        let mut conn = db.connect().unwrap();
        professor(&conn, "JE1", "J. Excellent");
        module(&conn, "CD1", "Computing for Dummies");
        instances::create(&mut conn, "CD1", 2017, 1, &["JE1".into()]).unwrap();

        assert_eq!(module_average(&conn, "JE1", "CD1").unwrap(), Average::NoRatings);
    }

    #[test]
    fn unknown_or_untaught_pairs_are_not_found() {
        let (_dir, db) = database();
        let mut conn = db.connect().unwrap();
        professor(&conn, "JE1", "J. Excellent");
        professor(&conn, "VS1", "V. Smart");
        module(&conn, "CD1", "Computing for Dummies");
        instances::create(&mut conn, "CD1", 2017, 1, &["JE1".into()]).unwrap();

        for (professor_id, module_code) in [("XX9", "CD1"), ("JE1", "ZZ9"), ("VS1", "CD1")] {
            let err = module_average(&conn, professor_id, module_code).unwrap_err();
            assert!(
                matches!(err, StoreError::NotFound { .. }),
                "{professor_id}/{module_code}: {err}"
            );
        }
    }
}
