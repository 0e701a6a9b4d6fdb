//! Local key-value storage handles.
//!
//! # Responsibility
//! - Define the storage contract injected into `NoteStore` and
//!   `SettingsStore`.
//! - Provide a persistent SQLite backend and an in-memory backend.
//!
//! # Invariants
//! - `set` overwrites the whole value for a key; there are no partial writes.
//! - `remove` of a missing key is not an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Error raised by a key-value backend.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Backend refused the operation (e.g. injected failure, read-only medium).
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Byte-oriented local key-value storage.
pub trait KvStore {
    /// Returns the stored bytes for `key`, or `None` when the key is absent.
    fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &[u8]) -> KvResult<()>;

    /// Removes `key`; succeeds when the key does not exist.
    fn remove(&mut self, key: &str) -> KvResult<()>;
}

impl<T: KvStore + ?Sized> KvStore for &mut T {
    fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> KvResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> KvResult<()> {
        (**self).remove(key)
    }
}
