//! SQLite connection handling and schema.
//!
//! One connection behind a mutex serializes all storage access; the
//! table-specific operations live in `tables/`.

use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use std::sync::Mutex;

pub struct Database {
    pub(crate) conn: Mutex<Connection>,
}

impl Database {
    /// Open the database at `database_url`, creating the file and schema if
    /// needed.
    pub fn new(database_url: &str) -> SqliteResult<Self> {
        if let Some(parent) = Path::new(database_url).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).ok();
            }
        }

        let conn = Connection::open(database_url)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.create_tables()?;

        Ok(db)
    }

    fn create_tables(&self) -> SqliteResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                credential TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id INTEGER NOT NULL REFERENCES users(id),
                content TEXT NOT NULL,
                created_at TEXT NOT NULL,
                last_modified_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS note_versions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                note_id INTEGER NOT NULL REFERENCES notes(id),
                content TEXT NOT NULL,
                recorded_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_note_versions_note ON note_versions(note_id);

            CREATE TABLE IF NOT EXISTS note_shares (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                note_id INTEGER NOT NULL REFERENCES notes(id),
                grantor_id INTEGER NOT NULL REFERENCES users(id),
                grantee_id INTEGER NOT NULL REFERENCES users(id),
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_note_shares_grantee ON note_shares(note_id, grantee_id);",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_creates_file_and_schema() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("sub").join("test.db");

        let db = Database::new(db_path.to_str().unwrap()).expect("Failed to initialize database");
        assert!(db_path.exists());

        // Schema is queryable immediately
        let conn = db.conn.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .expect("Failed to query users table");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_reopen_preserves_rows() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        {
            let db =
                Database::new(db_path.to_str().unwrap()).expect("Failed to initialize database");
            db.create_user("alice", "alice@example.com", "pw")
                .expect("Failed to create user");
        }

        let db = Database::new(db_path.to_str().unwrap()).expect("Failed to reopen database");
        let user = db
            .get_user_by_username("alice")
            .expect("Failed to query user")
            .expect("User missing after reopen");
        assert_eq!(user.email, "alice@example.com");
    }
}
