//! Dark-mode flag persisted independently of notes.
//!
//! # Invariants
//! - The flag lives under `isDarkMode`, never inside the notes blob.
//! - Reads go straight to storage; nothing is cached.
//! - A missing or unreadable flag means light appearance.

use crate::kv::{KvResult, KvStore};
use crate::model::settings::Appearance;
use log::{info, warn};

/// Storage key holding the JSON boolean dark-mode flag.
pub const DARK_MODE_KEY: &str = "isDarkMode";

/// Reads and writes appearance settings on a `KvStore`.
pub struct SettingsStore<S: KvStore> {
    storage: S,
}

impl<S: KvStore> SettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns the persisted dark-mode flag, defaulting to `false`.
    pub fn is_dark_mode(&self) -> bool {
        let raw = match self.storage.get(DARK_MODE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(err) => {
                warn!(
                    "event=settings_read module=settings status=degraded error_code=read_failed error={}",
                    err
                );
                return false;
            }
        };

        serde_json::from_slice::<bool>(&raw).unwrap_or_else(|err| {
            warn!(
                "event=settings_read module=settings status=degraded error_code=decode_failed error={}",
                err
            );
            false
        })
    }

    /// Persists the dark-mode flag.
    pub fn set_dark_mode(&mut self, enabled: bool) -> KvResult<()> {
        let encoded = if enabled { b"true".as_slice() } else { b"false".as_slice() };
        self.storage.set(DARK_MODE_KEY, encoded)?;
        info!(
            "event=settings_write module=settings status=ok dark_mode={}",
            enabled
        );
        Ok(())
    }

    /// Flips the flag and returns the new value.
    pub fn toggle_dark_mode(&mut self) -> KvResult<bool> {
        let next = !self.is_dark_mode();
        self.set_dark_mode(next)?;
        Ok(next)
    }

    pub fn appearance(&self) -> Appearance {
        Appearance::from_dark_mode(self.is_dark_mode())
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
