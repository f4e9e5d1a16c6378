use crate::store::{StoreError, StoreResult};
use common::model::professor::Professor;
use rusqlite::{params, Connection, OptionalExtension};

const ENTITY: &str = "Professor";

/// Inserts a new professor. Fails with `Conflict` if the id is taken.
pub fn create(conn: &Connection, professor: &Professor) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO professors (professor_id, name) VALUES (?1, ?2)",
        params![professor.professor_id, professor.name],
    )?;
    Ok(())
}

pub fn get(conn: &Connection, professor_id: &str) -> StoreResult<Professor> {
    conn.query_row(
        "SELECT professor_id, name FROM professors WHERE professor_id = ?1",
        params![professor_id],
        |row| {
            Ok(Professor {
                professor_id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| StoreError::not_found(ENTITY, professor_id))
}

pub fn list(conn: &Connection) -> StoreResult<Vec<Professor>> {
    let mut stmt = conn.prepare("SELECT professor_id, name FROM professors ORDER BY professor_id")?;
    let professors = stmt
        .query_map([], |row| {
            Ok(Professor {
                professor_id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(professors)
}

/// Deletes a professor together with every rating they received and every
/// teaching assignment they hold. The module instances themselves stay.
pub fn delete(conn: &mut Connection, professor_id: &str) -> StoreResult<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM ratings WHERE professor_id = ?1", params![professor_id])?;
    tx.execute(
        "DELETE FROM module_instance_professors WHERE professor_id = ?1",
        params![professor_id],
    )?;
    let removed = tx.execute(
        "DELETE FROM professors WHERE professor_id = ?1",
        params![professor_id],
    )?;
    if removed == 0 {
        return Err(StoreError::not_found(ENTITY, professor_id));
    }
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support;
    use crate::store::{instances, ratings};

    #[test]
    fn get_unknown_professor_is_not_found() {
        let (_dir, database) = test_support::database();
        let conn = database.connect().unwrap();
        let err = get(&conn, "XX9").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "Professor", .. }));
    }

    #[test]
    fn duplicate_id_is_a_conflict() {
        let (_dir, database) = test_support::database();
        let conn = database.connect().unwrap();
        test_support::professor(&conn, "JE1", "J. Excellent");
        let err = create(
            &conn,
            &Professor {
                professor_id: "JE1".to_string(),
                name: "Someone Else".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(get(&conn, "JE1").unwrap().name, "J. Excellent");
    }

    #[test]
    fn delete_removes_teaching_rows_and_ratings_but_keeps_instance() {
        let (_dir, database) = test_support::database();
        let mut conn = database.connect().unwrap();
        test_support::professor(&conn, "JE1", "J. Excellent");
        test_support::professor(&conn, "VS1", "V. Smart");
        test_support::module(&conn, "CD1", "Computing for Dummies");
        let user = test_support::user(&conn, "amy");
        let instance = instances::create(
            &mut conn,
            "CD1",
            2017,
            1,
            &["JE1".to_string(), "VS1".to_string()],
        )
        .unwrap();
        ratings::upsert(&conn, user, "JE1", instance, 5).unwrap();
        ratings::upsert(&conn, user, "VS1", instance, 3).unwrap();

        delete(&mut conn, "JE1").unwrap();

        assert!(get(&conn, "JE1").is_err());
        assert_eq!(ratings::count(&conn).unwrap(), 1);
        let summaries = instances::list_summaries(&conn).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].professors, vec!["V. Smart".to_string()]);
    }

    #[test]
    fn delete_unknown_professor_is_not_found() {
        let (_dir, database) = test_support::database();
        let mut conn = database.connect().unwrap();
        assert!(matches!(
            delete(&mut conn, "XX9"),
            Err(StoreError::NotFound { .. })
        ));
    }
}
