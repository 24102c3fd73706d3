//! Version ledger operations. Rows are written alongside note mutations and
//! are never updated or deleted afterwards.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result as SqliteResult};

use super::super::Database;
use crate::models::NoteVersion;

/// Write one ledger row. Callers pass the connection so the insert can ride
/// inside a larger transaction.
pub(crate) fn insert_version_row(
    conn: &Connection,
    note_id: i64,
    content: &str,
    recorded_at: &str,
) -> SqliteResult<()> {
    conn.execute(
        "INSERT INTO note_versions (note_id, content, recorded_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![note_id, content, recorded_at],
    )?;
    Ok(())
}

impl Database {
    /// Full history for a note, newest first. Row id breaks ties between
    /// identical timestamps. An unknown note id yields an empty list;
    /// existence is the caller's concern.
    pub fn get_version_history(&self, note_id: i64) -> SqliteResult<Vec<NoteVersion>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, note_id, content, recorded_at FROM note_versions
             WHERE note_id = ?1 ORDER BY recorded_at DESC, id DESC",
        )?;

        let versions = stmt
            .query_map([note_id], Self::row_to_version)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(versions)
    }

    fn row_to_version(row: &rusqlite::Row) -> rusqlite::Result<NoteVersion> {
        let recorded_at_str: String = row.get(3)?;

        Ok(NoteVersion {
            id: row.get(0)?,
            note_id: row.get(1)?,
            content: row.get(2)?,
            recorded_at: DateTime::parse_from_rfc3339(&recorded_at_str)
                .unwrap()
                .with_timezone(&Utc),
        })
    }
}
