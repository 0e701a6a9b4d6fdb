//! Ordered note collection with best-effort persistence.
//!
//! # Responsibility
//! - Own the authoritative in-memory list of notes.
//! - Hydrate from the `savedNotes` blob on open and rewrite it after every
//!   mutation.
//! - Record non-fatal persistence failures in a soft-issue slot.
//!
//! # Invariants
//! - Insertion order is the only ordering; nothing re-sorts notes.
//! - Note ids are unique within one store instance.
//! - `delete` either removes every requested position or nothing.
//! - Unreadable or unparseable storage collapses to an empty collection.

use crate::kv::{KvError, KvStore};
use crate::model::note::{Note, NoteId};
use log::{debug, error, info, warn};
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the JSON array of all notes.
pub const NOTES_KEY: &str = "savedNotes";

pub type StoreResult<T> = Result<T, StoreError>;

/// Caller contract violations reported by `NoteStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A requested position does not exist in the current collection.
    PositionOutOfBounds { position: usize, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PositionOutOfBounds { position, len } => write!(
                f,
                "note position {position} is out of bounds for {len} note(s)"
            ),
        }
    }
}

impl Error for StoreError {}

/// Non-fatal persistence failure kept for inspection.
#[derive(Debug)]
pub enum PersistIssue {
    /// Storage could not be read during `load`.
    Read(KvError),
    /// Stored bytes were not a valid note array.
    Decode(serde_json::Error),
    /// Collection could not be serialized during `save`.
    Encode(serde_json::Error),
    /// Storage rejected the write during `save`.
    Write(KvError),
}

impl PersistIssue {
    /// Short stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read(_) => "read_failed",
            Self::Decode(_) => "decode_failed",
            Self::Encode(_) => "encode_failed",
            Self::Write(_) => "write_failed",
        }
    }
}

impl Display for PersistIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read saved notes: {err}"),
            Self::Decode(err) => write!(f, "saved notes are not a valid note list: {err}"),
            Self::Encode(err) => write!(f, "failed to serialize notes: {err}"),
            Self::Write(err) => write!(f, "failed to write saved notes: {err}"),
        }
    }
}

impl Error for PersistIssue {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) | Self::Write(err) => Some(err),
            Self::Decode(err) | Self::Encode(err) => Some(err),
        }
    }
}

/// Lifecycle of a store instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Loaded,
}

/// In-memory note list mirrored to one key of a `KvStore`.
pub struct NoteStore<S: KvStore> {
    storage: S,
    notes: Vec<Note>,
    state: StoreState,
    last_issue: Option<PersistIssue>,
}

impl<S: KvStore> NoteStore<S> {
    /// Creates a store around `storage` and hydrates it immediately.
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            notes: Vec::new(),
            state: StoreState::Uninitialized,
            last_issue: None,
        };
        store.load();
        store
    }

    /// Replaces in-memory notes with the persisted blob.
    ///
    /// Missing data yields an empty list. Read or parse failures also yield
    /// an empty list and are recorded via `last_issue`.
    pub fn load(&mut self) {
        self.state = StoreState::Loaded;
        let raw = match self.storage.get(NOTES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=notes_load module=store status=ok source=empty count=0");
                self.notes.clear();
                self.last_issue = None;
                return;
            }
            Err(err) => {
                self.notes.clear();
                self.record_issue(PersistIssue::Read(err));
                return;
            }
        };

        match serde_json::from_slice::<Vec<Note>>(&raw) {
            Ok(mut notes) => {
                let reassigned = reassign_duplicate_ids(&mut notes);
                if reassigned > 0 {
                    warn!(
                        "event=notes_load module=store status=degraded error_code=duplicate_id reassigned={}",
                        reassigned
                    );
                }
                info!(
                    "event=notes_load module=store status=ok source=storage count={}",
                    notes.len()
                );
                self.notes = notes;
                self.last_issue = None;
            }
            Err(err) => {
                self.notes.clear();
                self.record_issue(PersistIssue::Decode(err));
            }
        }
    }

    /// Appends a new note and persists the collection.
    ///
    /// No validation happens here; empty titles are the caller's concern.
    pub fn add(&mut self, title: impl Into<String>, content: impl Into<String>) -> NoteId {
        let mut note = Note::new(title, content);
        while self.notes.iter().any(|existing| existing.id == note.id) {
            note.id = NoteId::new_v4();
        }
        let id = note.id;
        self.notes.push(note);
        debug!(
            "event=note_add module=store status=ok count={}",
            self.notes.len()
        );
        self.save();
        id
    }

    /// Removes the notes at `positions` in one batch and persists.
    ///
    /// Positions refer to the order before deletion; duplicates collapse.
    /// Returns removed notes in their original order.
    ///
    /// # Errors
    /// - `StoreError::PositionOutOfBounds` when any position is outside the
    ///   current collection. Nothing is removed or saved in that case.
    pub fn delete(
        &mut self,
        positions: impl IntoIterator<Item = usize>,
    ) -> StoreResult<Vec<Note>> {
        let positions: BTreeSet<usize> = positions.into_iter().collect();
        let len = self.notes.len();
        if let Some(&position) = positions.iter().find(|&&position| position >= len) {
            error!(
                "event=note_delete module=store status=error error_code=out_of_bounds position={} len={}",
                position, len
            );
            return Err(StoreError::PositionOutOfBounds { position, len });
        }

        let mut removed = Vec::with_capacity(positions.len());
        let mut kept = Vec::with_capacity(len - positions.len());
        for (index, note) in std::mem::take(&mut self.notes).into_iter().enumerate() {
            if positions.contains(&index) {
                removed.push(note);
            } else {
                kept.push(note);
            }
        }
        self.notes = kept;

        debug!(
            "event=note_delete module=store status=ok removed={} count={}",
            removed.len(),
            self.notes.len()
        );
        self.save();
        Ok(removed)
    }

    /// Overwrites the persisted blob with the full collection.
    ///
    /// Failures are logged and recorded via `last_issue`; nothing is retried.
    pub fn save(&mut self) {
        let encoded = match serde_json::to_vec(&self.notes) {
            Ok(encoded) => encoded,
            Err(err) => {
                self.record_issue(PersistIssue::Encode(err));
                return;
            }
        };

        match self.storage.set(NOTES_KEY, &encoded) {
            Ok(()) => {
                debug!(
                    "event=notes_save module=store status=ok count={} bytes={}",
                    self.notes.len(),
                    encoded.len()
                );
                self.last_issue = None;
            }
            Err(err) => self.record_issue(PersistIssue::Write(err)),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Returns the note at `position`, if any.
    pub fn get(&self, position: usize) -> Option<&Note> {
        self.notes.get(position)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    /// Most recent persistence failure, cleared by the next successful
    /// load or save.
    pub fn last_issue(&self) -> Option<&PersistIssue> {
        self.last_issue.as_ref()
    }

    pub fn take_issue(&mut self) -> Option<PersistIssue> {
        self.last_issue.take()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn record_issue(&mut self, issue: PersistIssue) {
        warn!(
            "event=notes_persist module=store status=degraded error_code={} error={}",
            issue.code(),
            issue
        );
        self.last_issue = Some(issue);
    }
}

/// Gives every repeated id after its first occurrence a fresh id.
///
/// Returns how many notes were reassigned.
fn reassign_duplicate_ids(notes: &mut [Note]) -> usize {
    let mut taken: HashSet<NoteId> = notes.iter().map(|note| note.id).collect();
    if taken.len() == notes.len() {
        return 0;
    }

    let mut seen = HashSet::with_capacity(notes.len());
    let mut reassigned = 0;
    for note in notes.iter_mut() {
        if seen.insert(note.id) {
            continue;
        }
        let mut fresh = NoteId::new_v4();
        while taken.contains(&fresh) {
            fresh = NoteId::new_v4();
        }
        taken.insert(fresh);
        seen.insert(fresh);
        note.id = fresh;
        reassigned += 1;
    }
    reassigned
}
