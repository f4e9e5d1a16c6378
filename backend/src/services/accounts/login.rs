//! # Login
//!
//! Backend logic for `POST /login/` and `POST /api-token-auth/`.
//!
//! ## Workflow
//!
//! 1.  **Validation**: username and password must both be present. The
//!     username is trimmed the same way registration trims it.
//!
//! 2.  **Credential check**: `authenticate` loads the stored hash on the
//!     blocking pool and verifies the password against it.
//!
//! 3.  **Token**: the user's current token is returned, or a new one is issued
//!     when they have none or it has expired.
//!
//! 4.  **HTTP Response**: `200 OK` with `{message, token}` for `/login/` and
//!     `{token}` for `/api-token-auth/`; `401` for bad credentials.

use crate::auth::password::verify_password;
use crate::auth::token_ttl;
use crate::error::ApiError;
use crate::services::with_connection;
use crate::store::users::{self, User};
use crate::store::{tokens, Database};
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::LoginRequest;
use common::responses::{LoginResponse, TokenResponse};
use log::{info, warn};
use std::time::Duration;

/// Actix web handler for `POST /login/`.
///
/// # Arguments
/// * `req` - The request, for the configured token lifetime.
/// * `database` - Shared database handle.
/// * `payload` - `{username, password}`.
///
/// # Returns
/// - `200 OK` with a `LoginResponse` on success.
/// - `400 Bad Request` when a field is missing.
/// - `401 Unauthorized` for unknown users or wrong passwords.
pub(crate) async fn process(
    req: HttpRequest,
    database: web::Data<Database>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = authenticate(&database, payload.into_inner(), token_ttl(&req)).await?;
    info!("User {} logged in", user.username);
    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful!".to_string(),
        token,
    }))
}

/// Actix web handler for `POST /api-token-auth/`. Same checks as
/// [`process`], answering with the token only.
pub(crate) async fn obtain_token(
    req: HttpRequest,
    database: web::Data<Database>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let (_, token) = authenticate(&database, payload.into_inner(), token_ttl(&req)).await?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Checks credentials and returns the user with their current token.
///
/// # Arguments
/// * `database` - Database handle.
/// * `request` - Username and password as sent by the client.
/// * `ttl` - Token lifetime; `None` when tokens never expire.
///
/// # Returns
/// - `Ok((User, token))` on success.
/// - `Err(ApiError::Validation)` for a blank username or empty password.
/// - `Err(ApiError::Unauthorized)` for bad credentials.
pub async fn authenticate(
    database: &Database,
    request: LoginRequest,
    ttl: Option<Duration>,
) -> Result<(User, String), ApiError> {
    let username = request.username.trim().to_string();
    if username.is_empty() || request.password.is_empty() {
        return Err(ApiError::Validation(
            "Username and password required".to_string(),
        ));
    }

    let lookup = username.clone();
    let issued = with_connection(database, move |conn| {
        match users::find_with_hash(conn, &lookup)? {
            Some((user, hash)) if verify_password(&request.password, &hash) => {
                let token = tokens::get_or_create(conn, user.id, ttl)?;
                Ok(Some((user, token)))
            }
            _ => Ok(None),
        }
    })
    .await?;

    issued.ok_or_else(|| {
        warn!("Failed login for {}", username);
        ApiError::Unauthorized("Invalid credentials".to_string())
    })
}
