//! Simulation clock: tick interval, optional end season, and loop state.

use crate::types::Season;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub interval_secs: u64,
    /// Bounded runs stop simulating once the season reaches this value.
    pub end_season:    Option<Season>,
    pub state:         SimulatorState,
}

impl SimClock {
    pub fn new(interval_secs: u64, end_season: Option<Season>) -> Self {
        Self {
            interval_secs,
            end_season,
            state: SimulatorState::Idle,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// True once a bounded run has nothing left to simulate.
    /// Checked before every round, never only after a rollover.
    pub fn bound_reached(&self, current_season: Season) -> bool {
        self.end_season.is_some_and(|end| current_season >= end)
    }

    /// Raise the end season by one. Returns the new bound, or `None` when
    /// the run is unbounded.
    pub fn extend(&mut self) -> Option<Season> {
        let end = self.end_season.as_mut()?;
        *end += 1;
        Some(*end)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SimulatorState {
    Idle,        // waiting for the next tick
    Simulating,  // running and committing one round
    Halted,      // bounded run reached its end season
}
