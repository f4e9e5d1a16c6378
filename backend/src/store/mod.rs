//! # Data Store
//!
//! SQLite persistence for professors, modules, module instances, ratings,
//! users and login tokens.
//!
//! Each submodule owns the queries for one table and works on a borrowed
//! `rusqlite::Connection`, so callers decide the unit of work: a plain
//! connection for single statements, or a `Transaction` (which derefs to a
//! connection) when several statements must commit together.
//!
//! Integrity is enforced by the schema itself (primary keys, `UNIQUE`,
//! `CHECK` and foreign keys), not by read-then-write checks in Rust. When a
//! constraint fires, the raw SQLite error is translated into a [`StoreError`]
//! kind by the `From<rusqlite::Error>` impl below.

use rusqlite::{ffi, Connection, ErrorCode};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod fixture;
pub mod instances;
pub mod modules;
pub mod professors;
pub mod ratings;
mod schema;
pub mod tokens;
pub mod users;

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A lookup by key matched nothing.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    /// A `CHECK` constraint rejected the value.
    #[error("{0}")]
    Validation(String),

    #[error("storage failure: {0}")]
    Storage(#[source] rusqlite::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        let constraint = match &err {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                let detail = message.clone().unwrap_or_else(|| failure.to_string());
                Some((failure.extended_code, detail))
            }
            _ => None,
        };

        match constraint {
            Some((ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY, detail)) => {
                StoreError::Conflict(detail)
            }
            Some((ffi::SQLITE_CONSTRAINT_CHECK, detail)) => StoreError::Validation(detail),
            Some((ffi::SQLITE_CONSTRAINT_FOREIGNKEY, detail)) => StoreError::NotFound {
                entity: "Referenced record",
                key: detail,
            },
            _ => StoreError::Storage(err),
        }
    }
}

/// Handle to the ratings database file.
///
/// Cheap to clone; it only holds the path. Every unit of work opens its own
/// connection through [`Database::connect`], which keeps request handlers
/// independent of each other and lets SQLite serialize concurrent writers.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and applies the schema.
    ///
    /// Safe to call on an existing database: every statement in the schema
    /// is `IF NOT EXISTS`.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let database = Self { path: path.into() };
        let conn = database.connect()?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;
        conn.execute_batch(schema::SCHEMA)?;
        Ok(database)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a new connection with foreign keys enforced.
    pub fn connect(&self) -> StoreResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopening_keeps_existing_rows() {
        let (_dir, database) = test_support::database();
        {
            let conn = database.connect().unwrap();
            test_support::professor(&conn, "JE1", "J. Excellent");
        }

        let reopened = Database::open(database.path()).unwrap();
        let conn = reopened.connect().unwrap();
        assert_eq!(professors::list(&conn).unwrap().len(), 1);
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let (_dir, database) = test_support::database();
        let conn = database.connect().unwrap();
        let err = conn
            .execute(
                "INSERT INTO module_instances (module_code, year, semester) VALUES ('NOPE', 2020, 1)",
                [],
            )
            .map_err(StoreError::from)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn duplicate_primary_key_is_a_conflict() {
        let (_dir, database) = test_support::database();
        let conn = database.connect().unwrap();
        test_support::module(&conn, "CD1", "Computing for Dummies");
        let err = conn
            .execute(
                "INSERT INTO modules (code, name) VALUES ('CD1', 'Again')",
                [],
            )
            .map_err(StoreError::from)
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }
}
