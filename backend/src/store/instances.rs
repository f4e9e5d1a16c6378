//! Module instances: one offering of a module in a given year and semester,
//! plus the set of professors who taught it.

use crate::store::{modules, professors, StoreError, StoreResult};
use common::model::module::ModuleInstanceSummary;
use common::requests::ModuleInstanceRef;
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTITY: &str = "Module instance";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInstance {
    pub id: i64,
    pub module_code: String,
    pub year: i32,
    pub semester: i32,
}

impl ModuleInstance {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ModuleInstance {
            id: row.get(0)?,
            module_code: row.get(1)?,
            year: row.get(2)?,
            semester: row.get(3)?,
        })
    }
}

/// Creates an offering and assigns its teaching staff in one transaction.
///
/// Returns the new instance id. Unknown module or professor ids fail with
/// `NotFound`; a second offering of the same module in the same year and
/// semester fails with `Conflict`.
pub fn create(
    conn: &mut Connection,
    module_code: &str,
    year: i32,
    semester: i32,
    professor_ids: &[String],
) -> StoreResult<i64> {
    let tx = conn.transaction()?;
    modules::get(&tx, module_code)?;
    tx.execute(
        "INSERT INTO module_instances (module_code, year, semester) VALUES (?1, ?2, ?3)",
        params![module_code, year, semester],
    )?;
    let id = tx.last_insert_rowid();
    set_professors(&tx, id, professor_ids)?;
    tx.commit()?;
    Ok(id)
}

/// Replaces the teaching staff of an instance.
///
/// Meant to run inside the caller's transaction.
pub fn set_professors(conn: &Connection, instance_id: i64, professor_ids: &[String]) -> StoreResult<()> {
    conn.execute(
        "DELETE FROM module_instance_professors WHERE module_instance_id = ?1",
        params![instance_id],
    )?;
    let mut insert = conn.prepare(
        "INSERT OR IGNORE INTO module_instance_professors (module_instance_id, professor_id)
         VALUES (?1, ?2)",
    )?;
    for professor_id in professor_ids {
        professors::get(conn, professor_id)?;
        insert.execute(params![instance_id, professor_id])?;
    }
    Ok(())
}

pub fn get(conn: &Connection, id: i64) -> StoreResult<ModuleInstance> {
    conn.query_row(
        "SELECT id, module_code, year, semester FROM module_instances WHERE id = ?1",
        params![id],
        ModuleInstance::from_row,
    )
    .optional()?
    .ok_or_else(|| StoreError::not_found(ENTITY, id))
}

pub fn find(conn: &Connection, module_code: &str, year: i32, semester: i32) -> StoreResult<ModuleInstance> {
    conn.query_row(
        "SELECT id, module_code, year, semester FROM module_instances
         WHERE module_code = ?1 AND year = ?2 AND semester = ?3",
        params![module_code, year, semester],
        ModuleInstance::from_row,
    )
    .optional()?
    .ok_or_else(|| {
        StoreError::not_found(ENTITY, format!("{module_code} {year} semester {semester}"))
    })
}

/// Looks up the instance a rating request points at.
pub fn resolve(conn: &Connection, reference: &ModuleInstanceRef) -> StoreResult<ModuleInstance> {
    match reference {
        ModuleInstanceRef::Id(id) => get(conn, *id),
        ModuleInstanceRef::Offering {
            module_code,
            year,
            semester,
        } => find(conn, module_code, *year, *semester),
    }
}

/// Whether `professor_id` taught at least one offering of `module_code`.
pub fn taught_by(conn: &Connection, professor_id: &str, module_code: &str) -> StoreResult<bool> {
    let taught = conn.query_row(
        "SELECT EXISTS (
            SELECT 1 FROM module_instances i
            JOIN module_instance_professors mp ON mp.module_instance_id = i.id
            WHERE i.module_code = ?1 AND mp.professor_id = ?2
         )",
        params![module_code, professor_id],
        |row| row.get(0),
    )?;
    Ok(taught)
}

/// Every offering with its module's code and name and the names of its
/// teaching staff, ordered by module code, year and semester.
pub fn list_summaries(conn: &Connection) -> StoreResult<Vec<ModuleInstanceSummary>> {
    let mut stmt = conn.prepare(
        "SELECT i.id, m.code, m.name, i.year, i.semester, p.name
         FROM module_instances i
         JOIN modules m ON m.code = i.module_code
         LEFT JOIN module_instance_professors mp ON mp.module_instance_id = i.id
         LEFT JOIN professors p ON p.professor_id = mp.professor_id
         ORDER BY m.code, i.year, i.semester, i.id, p.professor_id",
    )?;
    let rows = stmt.query_map([], |row| {
        let summary = ModuleInstanceSummary {
            module_code: row.get(1)?,
            module_name: row.get(2)?,
            year: row.get(3)?,
            semester: row.get(4)?,
            professors: Vec::new(),
        };
        Ok((row.get::<_, i64>(0)?, summary, row.get::<_, Option<String>>(5)?))
    })?;

    // One row per (instance, professor); fold consecutive rows of the same
    // instance into a single summary.
    let mut summaries: Vec<ModuleInstanceSummary> = Vec::new();
    let mut current_id = None;
    for row in rows {
        let (id, summary, professor) = row?;
        if current_id != Some(id) {
            summaries.push(summary);
            current_id = Some(id);
        }
        if let (Some(name), Some(current)) = (professor, summaries.last_mut()) {
            current.professors.push(name);
        }
    }
    Ok(summaries)
}
