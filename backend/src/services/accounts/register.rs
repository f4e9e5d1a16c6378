//! # Registration
//!
//! Backend logic for `POST /register/`.
//!
//! ## Workflow
//!
//! 1.  **Validation**: username, email and password must all be present; the
//!     username and email are trimmed, and must not be blank afterwards.
//!
//! 2.  **Hashing**: the password is hashed with Argon2 on the blocking pool.
//!
//! 3.  **Store write**: `register_user` inserts the user. The `UNIQUE`
//!     constraint on the username turns a duplicate into
//!     `400 "Username already exists"` and leaves the table as it was.
//!
//! 4.  **HTTP Response**: `201 Created` with a confirmation message.

use crate::auth::password::hash_password;
use crate::error::ApiError;
use crate::services::with_connection;
use crate::store::users::{self, User};
use crate::store::{Database, StoreResult};
use actix_web::{web, HttpResponse};
use common::requests::RegisterRequest;
use common::responses::MessageResponse;
use log::info;
use rusqlite::Connection;

/// Actix web handler for `POST /register/`.
///
/// # Arguments
/// * `database` - Shared database handle.
/// * `payload` - `{username, email, password}`.
///
/// # Returns
/// - `201 Created` with a `MessageResponse` on success.
/// - `400 Bad Request` when a field is blank or the username is taken.
pub(crate) async fn process(
    database: web::Data<Database>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = payload.into_inner();
    validate(&request)?;

    let password = request.password.clone();
    let password_hash = web::block(move || hash_password(&password))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))??;

    let user = with_connection(&database, move |conn| {
        register_user(conn, &request, &password_hash)
    })
    .await?;
    info!("Registered user {} (id {})", user.username, user.id);

    Ok(HttpResponse::Created().json(MessageResponse {
        message: "User registered successfully".to_string(),
    }))
}

fn validate(request: &RegisterRequest) -> Result<(), ApiError> {
    let fields = [
        ("username", request.username.trim()),
        ("email", request.email.trim()),
        ("password", request.password.as_str()),
    ];
    match fields.iter().find(|(_, value)| value.is_empty()) {
        Some((name, _)) => Err(ApiError::Validation(format!("{name} is required"))),
        None => Ok(()),
    }
}

/// Stores a new user under the trimmed username and email.
///
/// # Arguments
/// * `conn` - Connection for this unit of work.
/// * `request` - The validated registration request.
/// * `password_hash` - PHC string from [`hash_password`].
///
/// # Returns
/// - `Ok(User)` for the new account.
/// - `Err(StoreError::Conflict)` when the username is taken.
pub fn register_user(
    conn: &Connection,
    request: &RegisterRequest,
    password_hash: &str,
) -> StoreResult<User> {
    users::create(
        conn,
        request.username.trim(),
        request.email.trim(),
        password_hash,
    )
}
