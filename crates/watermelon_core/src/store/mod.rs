//! Stores mirroring in-memory state to local key-value storage.
//!
//! # Responsibility
//! - `NoteStore`: ordered note collection persisted as one JSON blob.
//! - `SettingsStore`: the dark-mode flag persisted under its own key.
//!
//! # Invariants
//! - Every note mutation rewrites the whole persisted blob before returning.
//! - Persistence failures never crash callers; in-memory state stays
//!   authoritative.

pub mod note_store;
pub mod settings_store;
