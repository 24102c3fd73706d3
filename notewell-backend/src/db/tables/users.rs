//! User table operations

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Result as SqliteResult};

use super::super::Database;
use crate::models::User;

impl Database {
    /// Insert a new user row. Uniqueness of username and email is expected
    /// to be checked by the caller; the UNIQUE constraints are a backstop.
    pub fn create_user(
        &self,
        username: &str,
        email: &str,
        credential: &str,
    ) -> SqliteResult<User> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO users (username, email, credential, created_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![username, email, credential, &now.to_rfc3339()],
        )?;

        let id = conn.last_insert_rowid();

        Ok(User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            credential: credential.to_string(),
            created_at: now,
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> SqliteResult<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, username, email, credential, created_at FROM users WHERE username = ?1",
        )?;
        stmt.query_row([username], Self::row_to_user).optional()
    }

    pub fn get_user_by_id(&self, id: i64) -> SqliteResult<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, username, email, credential, created_at FROM users WHERE id = ?1",
        )?;
        stmt.query_row([id], Self::row_to_user).optional()
    }

    pub fn username_exists(&self, username: &str) -> SqliteResult<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE username = ?1",
            [username],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn email_exists(&self, email: &str) -> SqliteResult<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE email = ?1",
            [email],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
        let created_at_str: String = row.get(4)?;

        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
            credential: row.get(3)?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .unwrap()
                .with_timezone(&Utc),
        })
    }
}
