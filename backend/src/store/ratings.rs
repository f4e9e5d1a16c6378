use crate::store::{StoreError, StoreResult};
use common::model::professor::Professor;
use rusqlite::{params, Connection, OptionalExtension};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// A rating row as seen by its author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredRating {
    pub id: i64,
    pub rating: i64,
}

/// Records `rating` for (user, professor, instance), overwriting any earlier
/// value for the same triple.
///
/// This is a single `INSERT ... ON CONFLICT DO UPDATE` statement, so two
/// concurrent submissions for the same triple end up as one row holding
/// whichever value was written last, and the row keeps its id.
pub fn upsert(
    conn: &Connection,
    user_id: i64,
    professor_id: &str,
    module_instance_id: i64,
    rating: i64,
) -> StoreResult<StoredRating> {
    let stored = conn
        .query_row(
            "INSERT INTO ratings (user_id, professor_id, module_instance_id, rating)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (user_id, professor_id, module_instance_id)
             DO UPDATE SET rating = excluded.rating
             RETURNING id, rating",
            params![user_id, professor_id, module_instance_id, rating],
            |row| {
                Ok(StoredRating {
                    id: row.get(0)?,
                    rating: row.get(1)?,
                })
            },
        )
        .map_err(|err| match StoreError::from(err) {
            StoreError::Validation(_) => StoreError::Validation(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
            )),
            other => other,
        })?;
    Ok(stored)
}

pub fn find(
    conn: &Connection,
    user_id: i64,
    professor_id: &str,
    module_instance_id: i64,
) -> StoreResult<Option<StoredRating>> {
    let stored = conn
        .query_row(
            "SELECT id, rating FROM ratings
             WHERE user_id = ?1 AND professor_id = ?2 AND module_instance_id = ?3",
            params![user_id, professor_id, module_instance_id],
            |row| {
                Ok(StoredRating {
                    id: row.get(0)?,
                    rating: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(stored)
}

pub fn count(conn: &Connection) -> StoreResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM ratings", [], |row| row.get(0))?)
}

/// Every rated professor with all of their rating values, ordered by
/// professor id. Professors nobody has rated do not appear.
pub fn values_by_professor(conn: &Connection) -> StoreResult<Vec<(Professor, Vec<i64>)>> {
    let mut stmt = conn.prepare(
        "SELECT p.professor_id, p.name, r.rating
         FROM ratings r
         JOIN professors p ON p.professor_id = r.professor_id
         ORDER BY p.professor_id, r.id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
        ))
    })?;

    let mut groups: Vec<(Professor, Vec<i64>)> = Vec::new();
    for row in rows {
        let (professor_id, name, rating) = row?;
        match groups.last_mut() {
            Some((professor, values)) if professor.professor_id == professor_id => {
                values.push(rating);
            }
            _ => groups.push((Professor { professor_id, name }, vec![rating])),
        }
    }
    Ok(groups)
}

/// Rating values a professor received in any offering of a module, across
/// all years and semesters.
pub fn values_for_pair(conn: &Connection, professor_id: &str, module_code: &str) -> StoreResult<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT r.rating
         FROM ratings r
         JOIN module_instances i ON i.id = r.module_instance_id
         WHERE r.professor_id = ?1 AND i.module_code = ?2
         ORDER BY r.id",
    )?;
    let values = stmt
        .query_map(params![professor_id, module_code], |row| row.get(0))?
        .collect::<Result<Vec<i64>, _>>()?;
    Ok(values)
}
