use crate::model::average::Average;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    /// Externally assigned staff code.
    pub professor_id: String,
    pub name: String,
}

/// One row of `GET /api/professor-ratings/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessorRating {
    pub professor_id: String,
    pub name: String,
    /// Mean over every rating the professor received, rounded to one decimal.
    pub rating: Average<f64>,
}
