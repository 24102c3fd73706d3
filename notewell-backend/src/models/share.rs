use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sharing grant. Grants accumulate: sharing the same note with the same
/// user twice produces two rows, and that is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteShare {
    pub id: i64,
    pub note_id: i64,
    pub grantor_id: i64,
    pub grantee_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Share payload
#[derive(Debug, Clone, Deserialize)]
pub struct ShareNoteRequest {
    pub username: String,
    pub credential: String,
    pub note_id: i64,
    pub shared_with_user_id: i64,
}
