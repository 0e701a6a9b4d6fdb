//! Domain model for notes and app settings.
//!
//! # Responsibility
//! - Define the records mirrored into local key-value storage.
//! - Keep wire field names stable for the persisted JSON blob.
//!
//! # Invariants
//! - Every note is identified by a `NoteId` that never changes after creation.

pub mod note;
pub mod settings;
