//! Events emitted by ledger and engine mutations.
//!
//! Every mutating engine operation returns the events it produced so callers
//! can log them or report them over HTTP without re-reading ledger state.

use crate::types::Season;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    RoundSimulated {
        season: Season,
        games:  usize,
    },
    SeasonClosed {
        season: Season,
        games:  usize,
    },
    LedgerCleared {
        epoch: Season,
    },
}

impl SimEvent {
    /// Stable string name for log lines.
    pub fn type_name(&self) -> &'static str {
        match self {
            SimEvent::RoundSimulated { .. } => "round_simulated",
            SimEvent::SeasonClosed { .. }   => "season_closed",
            SimEvent::LedgerCleared { .. }  => "ledger_cleared",
        }
    }
}
