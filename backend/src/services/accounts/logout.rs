use crate::auth::{token_from_header, token_ttl};
use crate::error::ApiError;
use crate::services::with_connection;
use crate::store::{tokens, Database};
use actix_web::{web, HttpRequest, HttpResponse};
use common::responses::MessageResponse;
use log::info;

/// Deletes the caller's token. A token that is missing, unknown or already
/// expired means there is no session to end.
pub(crate) async fn process(
    req: HttpRequest,
    database: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let token = token_from_header(&req).ok_or(ApiError::NoSession)?;
    let ttl = token_ttl(&req);

    let user = with_connection(&database, move |conn| {
        let user = tokens::resolve(conn, &token, ttl)?;
        if user.is_some() {
            tokens::delete(conn, &token)?;
        }
        Ok(user)
    })
    .await?
    .ok_or(ApiError::NoSession)?;

    info!("User {} logged out", user.username);
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Logout successful!".to_string(),
    }))
}
