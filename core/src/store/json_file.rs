//! Flat JSON file store.
//!
//! The whole ledger is one document. Saves go to a sibling temp file that is
//! renamed over the target, so a crash mid-write leaves the old file intact.

use super::LedgerStore;
use crate::{error::SimResult, snapshot::LedgerSnapshot};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LedgerStore for JsonFileStore {
    fn name(&self) -> &'static str { "json" }

    fn load(&self) -> SimResult<Option<LedgerSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let snapshot: LedgerSnapshot = serde_json::from_str(&content)?;
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &LedgerSnapshot) -> SimResult<()> {
        let json = serde_json::to_string(snapshot)?;
        let tmp = self.temp_path();
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::trace!("Wrote ledger to {}", self.path.display());
        Ok(())
    }
}
