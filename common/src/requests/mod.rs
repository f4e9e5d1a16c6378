//! Request bodies accepted by the ratings server.

use serde::{Deserialize, Serialize};

/// Body of `POST /register/`.
///
/// Fields default to empty so that a missing field is reported by the server
/// as a validation error naming the field instead of a generic JSON error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /login/` and `POST /api-token-auth/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /api/ratings/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRatingRequest {
    pub professor_id: String,
    pub module_instance: ModuleInstanceRef,
    /// Kept wide so out-of-range values reach validation instead of failing
    /// deserialization.
    pub rating: i64,
}

/// Identifies the module instance a rating is given in.
///
/// Either the store-assigned id, or the offering itself as a module code plus
/// year and semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleInstanceRef {
    Id(i64),
    Offering {
        module_code: String,
        year: i32,
        semester: i32,
    },
}
