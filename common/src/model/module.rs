use serde::{Deserialize, Serialize};

/// A course, identified by its code (e.g. `CD1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub code: String,
    pub name: String,
}

/// One row of `GET /api/modules/`: an offering of a module in a given year
/// and semester together with the names of everyone who taught it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInstanceSummary {
    pub module_code: String,
    pub module_name: String,
    pub year: i32,
    pub semester: i32,
    /// Never null; empty when nobody is assigned to the offering.
    pub professors: Vec<String>,
}
