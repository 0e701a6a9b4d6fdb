//! In-memory key-value store for tests and ephemeral sessions.

use super::{KvError, KvResult, KvStore};
use std::collections::BTreeMap;

/// `BTreeMap`-backed store with optional write failure injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, Vec<u8>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `get` fail with `KvError::Unavailable`.
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Makes every subsequent `set`/`remove` fail with `KvError::Unavailable`.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Writes raw bytes regardless of failure injection.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        if self.fail_reads {
            return Err(KvError::Unavailable(format!("read of `{key}` rejected")));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> KvResult<()> {
        if self.fail_writes {
            return Err(KvError::Unavailable(format!("write of `{key}` rejected")));
        }
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KvResult<()> {
        if self.fail_writes {
            return Err(KvError::Unavailable(format!("remove of `{key}` rejected")));
        }
        self.entries.remove(key);
        Ok(())
    }
}
