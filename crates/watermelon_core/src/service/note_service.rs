//! Note use-case service.
//!
//! # Responsibility
//! - Implement the "create on explicit confirmation" pathway used by the
//!   presentation layer.
//! - Forward deletions of user-selected positions to the store.
//!
//! # Invariants
//! - A note with an empty title is never handed to `NoteStore::add`.

use crate::kv::KvStore;
use crate::model::note::{Note, NoteId};
use crate::store::note_store::{NoteStore, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteServiceError {
    /// Title was empty at confirmation time.
    EmptyTitle,
    /// Store rejected the request.
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title cannot be empty"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::EmptyTitle => None,
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Note service facade over a `NoteStore`.
pub struct NoteService<S: KvStore> {
    store: NoteStore<S>,
}

impl<S: KvStore> NoteService<S> {
    pub fn new(store: NoteStore<S>) -> Self {
        Self { store }
    }

    /// Opens a store on `storage` and wraps it.
    pub fn open(storage: S) -> Self {
        Self::new(NoteStore::open(storage))
    }

    /// Creates a note from confirmed user input.
    ///
    /// # Errors
    /// - `NoteServiceError::EmptyTitle` when `title` is empty; the store is
    ///   left untouched.
    pub fn create_note(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<NoteId, NoteServiceError> {
        let title = title.into();
        if title.is_empty() {
            info!("event=note_create module=service status=rejected reason=empty_title");
            return Err(NoteServiceError::EmptyTitle);
        }
        Ok(self.store.add(title, content))
    }

    /// Deletes notes at user-selected 0-based positions.
    pub fn delete_notes(
        &mut self,
        positions: impl IntoIterator<Item = usize>,
    ) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self.store.delete(positions)?)
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn into_store(self) -> NoteStore<S> {
        self.store
    }
}
