//! In-process store. Nothing survives a restart.
//!
//! Clones share the same slot, so a caller can keep one clone and watch
//! what the engine saves through another.

use super::LedgerStore;
use crate::{error::SimResult, snapshot::LedgerSnapshot};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Saved {
    snapshot: Option<LedgerSnapshot>,
    saves:    u64,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Saved>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot, as if it had been saved earlier.
    pub fn with_snapshot(snapshot: LedgerSnapshot) -> Self {
        let store = Self::new();
        store.slot().snapshot = Some(snapshot);
        store
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> u64 {
        self.slot().saves
    }

    /// The last saved snapshot, if any.
    pub fn last_saved(&self) -> Option<LedgerSnapshot> {
        self.slot().snapshot.clone()
    }

    fn slot(&self) -> MutexGuard<'_, Saved> {
        // A panic while holding the lock cannot leave `Saved` half-written.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LedgerStore for MemoryStore {
    fn name(&self) -> &'static str { "memory" }

    fn load(&self) -> SimResult<Option<LedgerSnapshot>> {
        Ok(self.last_saved())
    }

    fn save(&mut self, snapshot: &LedgerSnapshot) -> SimResult<()> {
        let mut slot = self.slot();
        slot.snapshot = Some(snapshot.clone());
        slot.saves += 1;
        Ok(())
    }
}
