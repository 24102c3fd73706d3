//! Access decisions for notes.
//!
//! Pure functions over already-loaded state: the grant lookup happens at the
//! storage layer and its result is passed in as data, so these rules never
//! touch I/O.

use crate::models::{Note, User};

/// How a user relates to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAccess {
    /// The note's creator. Full control, including granting shares.
    Owner,
    /// Named in at least one share grant for the note.
    Shared,
    Denied,
}

impl NoteAccess {
    pub fn is_owner(&self) -> bool {
        matches!(self, NoteAccess::Owner)
    }

    pub fn can_read(&self) -> bool {
        matches!(self, NoteAccess::Owner | NoteAccess::Shared)
    }

    /// Sharing is binary: anyone who can read can also write.
    pub fn can_write(&self) -> bool {
        self.can_read()
    }
}

pub fn is_owner(note: &Note, user: &User) -> bool {
    note.owner_id == user.id
}

/// Classify `user`'s access to `note`. `has_grant` is whether any share
/// grant row names the user on this note.
pub fn evaluate(note: &Note, user: &User, has_grant: bool) -> NoteAccess {
    if is_owner(note, user) {
        NoteAccess::Owner
    } else if has_grant {
        NoteAccess::Shared
    } else {
        NoteAccess::Denied
    }
}
