//! Opaque login tokens, one per user.
//!
//! A token is created the first time a user logs in and handed out again on
//! every later login until it is deleted by logout or, when a lifetime is
//! configured, until it expires.

use crate::store::users::User;
use crate::store::StoreResult;
use rusqlite::{params, Connection, OptionalExtension};
use std::time::Duration;
use uuid::Uuid;

fn ttl_secs(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
}

/// Returns the user's current token, issuing a new one if they have none or
/// their old one has outlived `ttl`.
pub fn get_or_create(conn: &Connection, user_id: i64, ttl: Option<Duration>) -> StoreResult<String> {
    if let Some(ttl) = ttl {
        conn.execute(
            "DELETE FROM tokens
             WHERE user_id = ?1 AND created + ?2 <= CAST(strftime('%s', 'now') AS INTEGER)",
            params![user_id, ttl_secs(ttl)],
        )?;
    }
    // A concurrent login may have inserted first; keep whichever token won.
    conn.execute(
        "INSERT INTO tokens (key, user_id) VALUES (?1, ?2) ON CONFLICT (user_id) DO NOTHING",
        params![Uuid::new_v4().simple().to_string(), user_id],
    )?;
    let key = conn.query_row(
        "SELECT key FROM tokens WHERE user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;
    Ok(key)
}

/// Maps a token to its user. Unknown and expired tokens resolve to `None`;
/// expired ones are deleted on the way.
pub fn resolve(conn: &Connection, key: &str, ttl: Option<Duration>) -> StoreResult<Option<User>> {
    if let Some(ttl) = ttl {
        conn.execute(
            "DELETE FROM tokens
             WHERE key = ?1 AND created + ?2 <= CAST(strftime('%s', 'now') AS INTEGER)",
            params![key, ttl_secs(ttl)],
        )?;
    }
    let user = conn
        .query_row(
            "SELECT u.id, u.username, u.email
             FROM tokens t JOIN users u ON u.id = t.user_id
             WHERE t.key = ?1",
            params![key],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(user)
}

/// Deletes a token. Returns whether it existed.
pub fn delete(conn: &Connection, key: &str) -> StoreResult<bool> {
    let removed = conn.execute("DELETE FROM tokens WHERE key = ?1", params![key])?;
    Ok(removed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support;

    #[test]
    fn login_reuses_the_same_token() {
        let (_dir, database) = test_support::database();
        let conn = database.connect().unwrap();
        let amy = test_support::user(&conn, "amy");

        let first = get_or_create(&conn, amy, None).unwrap();
        let second = get_or_create(&conn, amy, None).unwrap();

        assert_eq!(first, second);
        assert_eq!(resolve(&conn, &first, None).unwrap().unwrap().username, "amy");
    }

    #[test]
    fn deleted_token_no_longer_resolves() {
        let (_dir, database) = test_support::database();
        let conn = database.connect().unwrap();
        let amy = test_support::user(&conn, "amy");
        let token = get_or_create(&conn, amy, None).unwrap();

        assert!(delete(&conn, &token).unwrap());
        assert!(resolve(&conn, &token, None).unwrap().is_none());
        assert!(!delete(&conn, &token).unwrap());
        assert_ne!(get_or_create(&conn, amy, None).unwrap(), token);
    }

    #[test]
    fn expired_token_is_rejected_and_replaced() {
        let (_dir, database) = test_support::database();
        let conn = database.connect().unwrap();
        let amy = test_support::user(&conn, "amy");
        let token = get_or_create(&conn, amy, None).unwrap();

        assert!(resolve(&conn, &token, Some(Duration::ZERO)).unwrap().is_none());
        assert!(resolve(&conn, &token, None).unwrap().is_none());

        let fresh = get_or_create(&conn, amy, Some(Duration::from_secs(3600))).unwrap();
        assert_ne!(fresh, token);
        assert!(resolve(&conn, &fresh, Some(Duration::from_secs(3600))).unwrap().is_some());
    }

    #[test]
    fn unknown_token_resolves_to_none() {
        let (_dir, database) = test_support::database();
        let conn = database.connect().unwrap();
        assert!(resolve(&conn, "not-a-token", None).unwrap().is_none());
    }
}
