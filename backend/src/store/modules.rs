use crate::store::{StoreError, StoreResult};
use common::model::module::Module;
use rusqlite::{params, Connection, OptionalExtension};

const ENTITY: &str = "Module";

/// Inserts a new module. Fails with `Conflict` if the code is taken.
pub fn create(conn: &Connection, module: &Module) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO modules (code, name) VALUES (?1, ?2)",
        params![module.code, module.name],
    )?;
    Ok(())
}

pub fn get(conn: &Connection, code: &str) -> StoreResult<Module> {
    conn.query_row(
        "SELECT code, name FROM modules WHERE code = ?1",
        params![code],
        |row| {
            Ok(Module {
                code: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| StoreError::not_found(ENTITY, code))
}

pub fn list(conn: &Connection) -> StoreResult<Vec<Module>> {
    let mut stmt = conn.prepare("SELECT code, name FROM modules ORDER BY code")?;
    let modules = stmt
        .query_map([], |row| {
            Ok(Module {
                code: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(modules)
}

/// Deletes a module and everything hanging off it: its instances, their
/// teaching assignments and every rating given in them.
pub fn delete(conn: &mut Connection, code: &str) -> StoreResult<()> {
    let tx = conn.transaction()?;
    tx.execute(
        "DELETE FROM ratings WHERE module_instance_id IN
            (SELECT id FROM module_instances WHERE module_code = ?1)",
        params![code],
    )?;
    tx.execute(
        "DELETE FROM module_instance_professors WHERE module_instance_id IN
            (SELECT id FROM module_instances WHERE module_code = ?1)",
        params![code],
    )?;
    tx.execute(
        "DELETE FROM module_instances WHERE module_code = ?1",
        params![code],
    )?;
    let removed = tx.execute("DELETE FROM modules WHERE code = ?1", params![code])?;
    if removed == 0 {
        return Err(StoreError::not_found(ENTITY, code));
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
    fn delete_cascades_to_instances_and_ratings() {
        let (_dir, database) = test_support::database();
        let mut conn = database.connect().unwrap();
        test_support::professor(&conn, "JE1", "J. Excellent");
        test_support::module(&conn, "CD1", "Computing for Dummies");
        test_support::module(&conn, "PG1", "Programming for the Gifted");
        let user = test_support::user(&conn, "amy");
        let doomed = instances::create(&mut conn, "CD1", 2017, 1, &["JE1".to_string()]).unwrap();
        let kept = instances::create(&mut conn, "PG1", 2017, 2, &["JE1".to_string()]).unwrap();
        ratings::upsert(&conn, user, "JE1", doomed, 2).unwrap();
        ratings::upsert(&conn, user, "JE1", kept, 4).unwrap();

        delete(&mut conn, "CD1").unwrap();

        assert!(matches!(get(&conn, "CD1"), Err(StoreError::NotFound { .. })));
        assert!(matches!(
            instances::get(&conn, doomed),
            Err(StoreError::NotFound { .. })
        ));
        assert!(instances::get(&conn, kept).is_ok());
        assert_eq!(ratings::count(&conn).unwrap(), 1);
    }

    #[test]
    fn list_is_ordered_by_code() {
        let (_dir, database) = test_support::database();
        let conn = database.connect().unwrap();
        test_support::module(&conn, "PG1", "Programming for the Gifted");
        test_support::module(&conn, "CD1", "Computing for Dummies");
        let codes: Vec<String> = list(&conn).unwrap().into_iter().map(|m| m.code).collect();
        assert_eq!(codes, vec!["CD1", "PG1"]);
    }
}
