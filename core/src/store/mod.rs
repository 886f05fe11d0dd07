//! Persistence layer.
//!
//! RULE: Only the store modules touch durable storage.
//! The engine hands over a full `LedgerSnapshot` after every mutation and
//! reads one back at startup; backends never see partial rounds.

mod json_file;
mod memory;
mod sqlite;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::{error::SimResult, snapshot::LedgerSnapshot};
use serde::{Deserialize, Serialize};

/// The contract every persistence backend fulfills.
pub trait LedgerStore: Send {
    /// Stable backend name for log lines.
    fn name(&self) -> &'static str;

    /// Last saved state, or `None` if nothing was ever saved.
    fn load(&self) -> SimResult<Option<LedgerSnapshot>>;

    /// Durably replace the stored state with `snapshot`.
    fn save(&mut self, snapshot: &LedgerSnapshot) -> SimResult<()>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    Memory,
    #[default]
    Json,
    Sqlite,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            "json"   => Ok(Self::Json),
            "sqlite" => Ok(Self::Sqlite),
            other    => Err(format!("unknown store backend '{other}' (memory|json|sqlite)")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// File path for the JSON and SQLite backends. Ignored for memory.
    pub path:    String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Json,
            path:    "game_data.json".into(),
        }
    }
}

impl StoreConfig {
    pub fn memory() -> Self {
        Self { backend: StoreBackend::Memory, path: String::new() }
    }
}

/// Open the configured backend, creating files and schema as needed.
pub fn open_store(config: &StoreConfig) -> SimResult<Box<dyn LedgerStore>> {
    let store: Box<dyn LedgerStore> = match config.backend {
        StoreBackend::Memory => Box::new(MemoryStore::new()),
        StoreBackend::Json   => Box::new(JsonFileStore::new(&config.path)),
        StoreBackend::Sqlite => {
            let store = SqliteStore::open(&config.path)?;
            store.migrate()?;
            Box::new(store)
        }
    };
    log::info!("Opened {} store at '{}'", store.name(), config.path);
    Ok(store)
}
