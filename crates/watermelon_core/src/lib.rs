//! Core of Watermelon Notes.
//! Owns the note list, its persistence to local key-value storage, and the
//! appearance setting.

pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use kv::{KvError, KvResult, KvStore, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId};
pub use model::settings::Appearance;
pub use service::note_service::{NoteService, NoteServiceError};
pub use store::note_store::{
    NoteStore, PersistIssue, StoreError, StoreResult, StoreState, NOTES_KEY,
};
pub use store::settings_store::{SettingsStore, DARK_MODE_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
