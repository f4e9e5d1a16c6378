//! Errors returned by HTTP handlers.
//!
//! Every failure leaves the server as a status code plus a JSON body of the
//! form `{"error": "<message>"}`.

use crate::auth::password::HashError;
use crate::store::StoreError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::responses::ErrorResponse;
use log::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 404: unknown professor, module, module instance, pair or route.
    #[error("{0}")]
    NotFound(String),

    /// 400: out-of-range rating, malformed JSON, missing field.
    #[error("{0}")]
    Validation(String),

    /// 401: missing, unknown or expired token, or bad credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// 400: the username is already taken.
    #[error("{0}")]
    Conflict(String),

    /// 400: logout without a live token.
    #[error("No active session found")]
    NoSession,

    /// 500: logged in full, reported to the caller without detail.
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::Conflict(_) | ApiError::NoSession => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Internal(detail) => {
                error!("Request failed: {}", detail);
                "Internal server error".to_string()
            }
            other => {
                warn!("Request rejected: {}", other);
                other.to_string()
            }
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse { error: message })
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::Conflict(message) => ApiError::Conflict(message),
            StoreError::Validation(message) => ApiError::Validation(message),
            StoreError::Storage(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<HashError> for ApiError {
    fn from(err: HashError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
