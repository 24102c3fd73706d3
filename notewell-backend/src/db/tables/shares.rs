//! Share grant operations

use chrono::Utc;
use rusqlite::Result as SqliteResult;

use super::super::Database;
use crate::models::NoteShare;

impl Database {
    /// Record a grant. Duplicates are allowed and accumulate as rows.
    pub fn create_share(
        &self,
        note_id: i64,
        grantor_id: i64,
        grantee_id: i64,
    ) -> SqliteResult<NoteShare> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO note_shares (note_id, grantor_id, grantee_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![note_id, grantor_id, grantee_id, &now.to_rfc3339()],
        )?;

        let id = conn.last_insert_rowid();

        Ok(NoteShare {
            id,
            note_id,
            grantor_id,
            grantee_id,
            created_at: now,
        })
    }

    /// Whether at least one grant names `user_id` on `note_id`.
    pub fn share_exists(&self, note_id: i64, user_id: i64) -> SqliteResult<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM note_shares WHERE note_id = ?1 AND grantee_id = ?2",
            [note_id, user_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_db(dir: &tempfile::TempDir) -> Database {
        let db_path = dir.path().join("test.db");
        Database::new(db_path.to_str().unwrap()).expect("Failed to initialize database")
    }

    #[test]
    fn test_share_exists_only_for_the_grantee() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);

        let alice = db
            .create_user("alice", "alice@example.com", "pw-a")
            .expect("Failed to create user");
        let bob = db
            .create_user("bob", "bob@example.com", "pw-b")
            .expect("Failed to create user");
        let charlie = db
            .create_user("charlie", "charlie@example.com", "pw-c")
            .expect("Failed to create user");
        let note = db
            .create_note(alice.id, "hello")
            .expect("Failed to create note");

        let share = db
            .create_share(note.id, alice.id, bob.id)
            .expect("Failed to create share");
        assert_eq!(share.grantor_id, alice.id);
        assert_eq!(share.grantee_id, bob.id);

        assert!(db.share_exists(note.id, bob.id).unwrap());
        assert!(!db.share_exists(note.id, charlie.id).unwrap());
        assert!(!db.share_exists(note.id + 1, bob.id).unwrap());
    }

    #[test]
    fn test_duplicate_grants_accumulate() {
        let dir = tempdir().unwrap();
        let db = open_db(&dir);

        let alice = db
            .create_user("alice", "alice@example.com", "pw-a")
            .expect("Failed to create user");
        let bob = db
            .create_user("bob", "bob@example.com", "pw-b")
            .expect("Failed to create user");
        let note = db
            .create_note(alice.id, "hello")
            .expect("Failed to create note");

        db.create_share(note.id, alice.id, bob.id)
            .expect("Failed to create share");
        db.create_share(note.id, alice.id, bob.id)
            .expect("Failed to create duplicate share");

        let conn = db.conn.lock().unwrap();
        let rows: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM note_shares WHERE note_id = ?1 AND grantee_id = ?2",
                [note.id, bob.id],
                |row| row.get(0),
            )
            .expect("Failed to count shares");
        assert_eq!(rows, 2);
    }
}
