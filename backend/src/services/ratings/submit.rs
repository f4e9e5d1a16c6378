//! # Rating Submission
//!
//! Backend logic for `POST /api/ratings/`.
//!
//! ## Workflow
//!
//! 1.  **Authentication**: the `AuthenticatedUser` extractor resolves the
//!     `Authorization: Token <key>` header. The body is taken as raw bytes, so
//!     a caller without a valid token gets `401` whatever the body holds.
//!
//! 2.  **Body and range check**: the bytes are decoded into a
//!     `SubmitRatingRequest` and the value is checked against 1..=5 before any
//!     query runs.
//!
//! 3.  **Store write**: `submit_rating` looks up the professor and the module
//!     instance, then upserts the rating in a single statement.
//!
//! 4.  **HTTP Response**: `201 Created` with the message, the rating id and
//!     the stored value.

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::services::with_connection;
use crate::store::ratings::{self, StoredRating, MAX_RATING, MIN_RATING};
use crate::store::{instances, professors, Database, StoreResult};
use actix_web::{web, HttpResponse};
use common::requests::SubmitRatingRequest;
use common::responses::SubmitRatingResponse;
use log::info;
use rusqlite::Connection;

/// Actix web handler for `POST /api/ratings/`.
///
/// # Arguments
/// * `caller` - The user owning the bearer token.
/// * `database` - Shared database handle.
/// * `body` - Raw JSON body, decoded once the caller is known.
///
/// # Returns
/// - `201 Created` with a `SubmitRatingResponse` on success.
/// - `400 Bad Request` for a malformed body or a value outside 1..=5.
/// - `401 Unauthorized` when the token is missing, unknown or expired.
/// - `404 Not Found` for an unknown professor or module instance.
pub(crate) async fn process(
    caller: AuthenticatedUser,
    database: web::Data<Database>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let request = parse_request(&body)?;

    let user_id = caller.user.id;
    let professor_id = request.professor_id.clone();
    let stored = with_connection(&database, move |conn| submit_rating(conn, user_id, &request)).await?;
    info!(
        "User {} rated {} with {} (rating {})",
        caller.user.username, professor_id, stored.rating, stored.id
    );

    Ok(HttpResponse::Created().json(SubmitRatingResponse {
        message: "Rating submitted successfully".to_string(),
        rating_id: stored.id,
        rating: stored.rating,
    }))
}

/// Decodes the body and rejects out-of-range values.
///
/// # Returns
/// - `Ok(SubmitRatingRequest)` for a well-formed body with a value in 1..=5.
/// - `Err(ApiError::Validation)` otherwise.
fn parse_request(body: &[u8]) -> Result<SubmitRatingRequest, ApiError> {
    let request: SubmitRatingRequest = serde_json::from_slice(body)
        .map_err(|err| ApiError::Validation(format!("Invalid request body: {err}")))?;
    if !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
        return Err(ApiError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
            request.rating
        )));
    }
    Ok(request)
}

/// Checks that the professor and module instance exist, then stores the
/// rating, replacing the user's earlier value for the same pair.
///
/// # Arguments
/// * `conn` - Connection for this unit of work.
/// * `user_id` - Author of the rating.
/// * `request` - Professor, module instance reference and value.
///
/// # Returns
/// - `Ok(StoredRating)` with the id, unchanged across resubmissions.
/// - `Err(StoreError::NotFound)` for an unknown professor or instance.
pub fn submit_rating(
    conn: &Connection,
    user_id: i64,
    request: &SubmitRatingRequest,
) -> StoreResult<StoredRating> {
    let professor = professors::get(conn, &request.professor_id)?;
    let instance = instances::resolve(conn, &request.module_instance)?;
    ratings::upsert(
        conn,
        user_id,
        &professor.professor_id,
        instance.id,
        request.rating,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::{database, module, professor, user};
    use crate::store::StoreError;
    use common::requests::ModuleInstanceRef;

    fn request(professor_id: &str, module_instance: ModuleInstanceRef, rating: i64) -> SubmitRatingRequest {
        SubmitRatingRequest {
            professor_id: professor_id.to_string(),
            module_instance,
            rating,
        }
    }

    #[test]
    fn body_is_decoded_and_range_checked() {
        let request =
            parse_request(br#"{"professor_id": "JE1", "module_instance": 3, "rating": 5}"#)
                .unwrap();
        assert_eq!(request.module_instance, ModuleInstanceRef::Id(3));

        for body in [
            &br#"{"professor_id": "#[..],
            &br#"{"professor_id": "JE1"}"#[..],
            &br#"{"professor_id": "JE1", "module_instance": 3, "rating": 6}"#[..],
        ] {
            assert!(matches!(parse_request(body), Err(ApiError::Validation(_))));
        }
    }

    #[test]
    fn resubmission_updates_in_place() {
        let (_dir, db) = database();
        let mut conn = db.connect().unwrap();
        professor(&conn, "JE1", "J. Excellent");
        module(&conn, "CD1", "Computing for Dummies");
        let instance = instances::create(&mut conn, "CD1", 2017, 1, &["JE1".into()]).unwrap();
        let amy = user(&conn, "amy");

        let first = submit_rating(&conn, amy, &request("JE1", ModuleInstanceRef::Id(instance), 2)).unwrap();
        let offering = ModuleInstanceRef::Offering {
            module_code: "CD1".to_string(),
            year: 2017,
            semester: 1,
        };
        let second = submit_rating(&conn, amy, &request("JE1", offering, 5)).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.rating, 5);
        assert_eq!(ratings::count(&conn).unwrap(), 1);
    }

    #[test]
    fn unknown_professor_or_instance() {
        let (_dir, db) = database();
        let mut conn = db.connect().unwrap();
        professor(&conn, "JE1", "J. Excellent");
        module(&conn, "CD1", "Computing for Dummies");
        let instance = instances::create(&mut conn, "CD1", 2017, 1, &[]).unwrap();
        let amy = user(&conn, "amy");

        for req in [
            request("XX9", ModuleInstanceRef::Id(instance), 3),
            request("JE1", ModuleInstanceRef::Id(instance + 100), 3),
        ] {
            let err = submit_rating(&conn, amy, &req).unwrap_err();
            assert!(matches!(err, StoreError::NotFound { .. }), "{err}");
        }
        assert_eq!(ratings::count(&conn).unwrap(), 0);
    }
}
