//! Snapshot serialization: the full ledger state as one value.
//!
//! Every store backend reads and writes this shape, so switching from the
//! JSON file to SQLite never changes what a reloaded server sees. Files
//! written with the older `current_year` / `all_years_data` keys, whose
//! games carry no season, still load.

use crate::{game::GameResult, types::Season};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerSnapshot {
    #[serde(alias = "current_year")]
    pub current_season: Season,
    #[serde(alias = "current_year_games")]
    pub current_games:  Vec<GameResult>,
    /// Completed seasons in ascending order.
    #[serde(alias = "all_years_data")]
    pub archive:        BTreeMap<Season, Vec<GameResult>>,
}

impl LedgerSnapshot {
    /// State of a ledger that has never simulated anything.
    pub fn empty(epoch: Season) -> Self {
        Self {
            current_season: epoch,
            current_games:  Vec::new(),
            archive:        BTreeMap::new(),
        }
    }

    pub fn total_games(&self) -> usize {
        self.current_games.len() + self.archive.values().map(Vec::len).sum::<usize>()
    }
}
