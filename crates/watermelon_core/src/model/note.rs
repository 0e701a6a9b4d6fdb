//! Note domain model.
//!
//! # Responsibility
//! - Define the title/content record kept by `NoteStore`.
//! - Fix the persisted wire shape: `{ "id", "title", "content" }`.
//!
//! # Invariants
//! - `id` is generated once and never reused for another note.
//! - `title` may be empty here; callers creating notes from user input
//!   enforce a non-empty title before reaching the store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one note.
///
/// Serialized as a hyphenated UUID string.
pub type NoteId = Uuid;

/// A user-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// List identity only; not used for lookup by external callers.
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

impl Note {
    /// Creates a note with a freshly generated id.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, content)
    }

    /// Creates a note with a caller-provided id.
    ///
    /// Used when rebuilding notes whose identity already exists.
    pub fn with_id(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Returns up to `max_lines` leading lines of content for list rows.
    pub fn preview_lines(&self, max_lines: usize) -> Vec<&str> {
        self.content.lines().take(max_lines).collect()
    }
}
