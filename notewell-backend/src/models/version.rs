use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ledger row. Append-only: never updated or deleted once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteVersion {
    pub id: i64,
    pub note_id: i64,
    pub content: String,
    pub recorded_at: DateTime<Utc>,
}
