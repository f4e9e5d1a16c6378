//! Response bodies produced by the ratings server.

use crate::model::average::Average;
use serde::{Deserialize, Serialize};

/// Generic acknowledgement, e.g. after registering or logging out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Returned by `POST /login/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Returned by `POST /api-token-auth/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Returned by `POST /api/ratings/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRatingResponse {
    pub message: String,
    /// Unchanged when an earlier rating of the same professor and instance
    /// is overwritten.
    pub rating_id: i64,
    pub rating: i64,
}

/// Returned by `GET /api/professors/{professor_id}/modules/{module_code}/rating/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairAverageResponse {
    pub average_rating: Average<i64>,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
