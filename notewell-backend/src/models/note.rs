use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note row. `content` always equals the newest version ledger entry for
/// the note; the two are written in one transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub owner_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
}

/// Create payload; credentials travel in the body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteRequest {
    pub username: String,
    pub credential: String,
    pub content: String,
}

/// Update payload
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNoteRequest {
    pub username: String,
    pub credential: String,
    pub content: String,
}

/// Body credentials for GET endpoints, used when the caller does not send
/// a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadAuthRequest {
    pub username: String,
    pub credential: String,
}
