//! Note table operations. Every mutation also appends the new content to
//! the version ledger in the same transaction.

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Result as SqliteResult};

use super::super::Database;
use super::versions::insert_version_row;
use crate::models::Note;

impl Database {
    /// Create a note and its first version entry atomically.
    pub fn create_note(&self, owner_id: i64, content: &str) -> SqliteResult<Note> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        tx.execute(
            "INSERT INTO notes (owner_id, content, created_at, last_modified_at)
             VALUES (?1, ?2, ?3, ?3)",
            rusqlite::params![owner_id, content, &now_str],
        )?;
        let id = tx.last_insert_rowid();
        insert_version_row(&tx, id, content, &now_str)?;

        tx.commit()?;

        Ok(Note {
            id,
            owner_id,
            content: content.to_string(),
            created_at: now,
            last_modified_at: now,
        })
    }

    pub fn get_note(&self, id: i64) -> SqliteResult<Option<Note>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, content, created_at, last_modified_at FROM notes WHERE id = ?1",
        )?;
        stmt.query_row([id], Self::row_to_note).optional()
    }

    /// Overwrite a note's content and append the new content to the ledger
    /// atomically. Writing identical content still counts as a mutation.
    /// Returns false when no such note exists.
    pub fn update_note(&self, id: i64, content: &str) -> SqliteResult<bool> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let now_str = Utc::now().to_rfc3339();

        let updated = tx.execute(
            "UPDATE notes SET content = ?1, last_modified_at = ?2 WHERE id = ?3",
            rusqlite::params![content, &now_str, id],
        )?;
        if updated == 0 {
            return Ok(false);
        }
        insert_version_row(&tx, id, content, &now_str)?;

        tx.commit()?;
        Ok(true)
    }

    fn row_to_note(row: &rusqlite::Row) -> rusqlite::Result<Note> {
        let created_at_str: String = row.get(3)?;
        let last_modified_at_str: String = row.get(4)?;

        Ok(Note {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            content: row.get(2)?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .unwrap()
                .with_timezone(&Utc),
            last_modified_at: DateTime::parse_from_rfc3339(&last_modified_at_str)
                .unwrap()
                .with_timezone(&Utc),
        })
    }
}
