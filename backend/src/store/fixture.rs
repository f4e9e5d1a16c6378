//! Loads reference data (professors, modules and module instances) from a
//! JSON file.
//!
//! This is the administrative path for populating the catalogue; nothing
//! over HTTP creates reference data. Applying a fixture is idempotent, so
//! the server can apply the same file on every start:
//! - professors and modules that already exist are left as they are,
//! - instances are matched on (module, year, semester) and get their
//!   teaching staff replaced by the one in the file.
//!
//! The whole file is applied in one transaction. A reference to an unknown
//! professor or module aborts it with `NotFound` and nothing is written.
//!
//! ```json
//! {
//!   "professors": [{"professor_id": "JE1", "name": "J. Excellent"}],
//!   "modules": [{"code": "CD1", "name": "Computing for Dummies"}],
//!   "module_instances": [
//!     {"module_code": "CD1", "year": 2017, "semester": 1, "professors": ["JE1"]}
//!   ]
//! }
//! ```

use crate::store::{instances, modules, StoreError, StoreResult};
use common::model::module::Module;
use common::model::professor::Professor;
use rusqlite::{params, Connection};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub professors: Vec<Professor>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub module_instances: Vec<FixtureInstance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureInstance {
    pub module_code: String,
    pub year: i32,
    pub semester: i32,
    #[serde(default)]
    pub professors: Vec<String>,
}

/// Number of records of each kind written or matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureSummary {
    pub professors: usize,
    pub modules: usize,
    pub module_instances: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("cannot read fixture {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fixture {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub fn load(path: &Path) -> Result<Fixture, FixtureError> {
    let raw = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn apply(conn: &mut Connection, fixture: &Fixture) -> StoreResult<FixtureSummary> {
    let tx = conn.transaction()?;

    for professor in &fixture.professors {
        tx.execute(
            "INSERT INTO professors (professor_id, name) VALUES (?1, ?2)
             ON CONFLICT (professor_id) DO NOTHING",
            params![professor.professor_id, professor.name],
        )?;
    }
    for module in &fixture.modules {
        tx.execute(
            "INSERT INTO modules (code, name) VALUES (?1, ?2) ON CONFLICT (code) DO NOTHING",
            params![module.code, module.name],
        )?;
    }
    for instance in &fixture.module_instances {
        modules::get(&tx, &instance.module_code)?;
        // DO UPDATE rather than DO NOTHING so RETURNING yields the existing id.
        let id: i64 = tx.query_row(
            "INSERT INTO module_instances (module_code, year, semester) VALUES (?1, ?2, ?3)
             ON CONFLICT (module_code, year, semester) DO UPDATE SET year = excluded.year
             RETURNING id",
            params![instance.module_code, instance.year, instance.semester],
            |row| row.get(0),
        )?;
        instances::set_professors(&tx, id, &instance.professors)?;
    }

    tx.commit()?;
    Ok(FixtureSummary {
        professors: fixture.professors.len(),
        modules: fixture.modules.len(),
        module_instances: fixture.module_instances.len(),
    })
}
