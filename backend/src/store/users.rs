use crate::store::{StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Inserts a user. A taken username fails with `Conflict` and leaves the
/// table untouched; the `UNIQUE` constraint makes this safe under
/// concurrent registrations.
pub fn create(conn: &Connection, username: &str, email: &str, password_hash: &str) -> StoreResult<User> {
    conn.execute(
        "INSERT INTO users (username, email, password_hash) VALUES (?1, ?2, ?3)",
        params![username, email, password_hash],
    )
    .map_err(|err| match StoreError::from(err) {
        StoreError::Conflict(_) => StoreError::Conflict("Username already exists".to_string()),
        other => other,
    })?;
    Ok(User {
        id: conn.last_insert_rowid(),
        username: username.to_string(),
        email: email.to_string(),
    })
}

pub fn get_by_username(conn: &Connection, username: &str) -> StoreResult<User> {
    find_with_hash(conn, username)?
        .map(|(user, _)| user)
        .ok_or_else(|| StoreError::not_found("User", username))
}

/// The user together with their stored password hash, for credential checks.
pub fn find_with_hash(conn: &Connection, username: &str) -> StoreResult<Option<(User, String)>> {
    let found = conn
        .query_row(
            "SELECT id, username, email, password_hash FROM users WHERE username = ?1",
            params![username],
            |row| {
                Ok((
                    User {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        email: row.get(2)?,
                    },
                    row.get(3)?,
                ))
            },
        )
        .optional()?;
    Ok(found)
}

pub fn count(conn: &Connection) -> StoreResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support;

    #[test]
    fn duplicate_username_is_a_conflict_without_mutation() {
        let (_dir, database) = test_support::database();
        let conn = database.connect().unwrap();
        create(&conn, "amy", "amy@example.com", "h1").unwrap();

        let err = create(&conn, "amy", "other@example.com", "h2").unwrap_err();

        assert!(matches!(err, StoreError::Conflict(ref msg) if msg == "Username already exists"));
        assert_eq!(count(&conn).unwrap(), 1);
        let (user, hash) = find_with_hash(&conn, "amy").unwrap().unwrap();
        assert_eq!(user.email, "amy@example.com");
        assert_eq!(hash, "h1");
    }

    #[test]
    fn unknown_username_is_not_found() {
        let (_dir, database) = test_support::database();
        let conn = database.connect().unwrap();
        assert!(find_with_hash(&conn, "ghost").unwrap().is_none());
        assert!(matches!(
            get_by_username(&conn, "ghost"),
            Err(StoreError::NotFound { entity: "User", .. })
        ));
    }
}
