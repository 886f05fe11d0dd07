use crate::{
    error::{SimError, SimResult},
    game::TieBreak,
    ledger::MAX_START_SEASON,
    store::StoreConfig,
    team::{default_roster, validate_roster, Team},
    types::Season,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EPOCH: Season = 1920;
pub const DEFAULT_GAMES_PER_SEASON: usize = 100;
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Everything a run needs to start. Every field has a default, so a config
/// file only lists what it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// First season of a fresh ledger, and the season `clear` returns to.
    pub epoch:              Season,
    /// Games recorded before a season rolls over.
    pub games_per_season:   usize,
    pub tick_interval_secs: u64,
    /// Bounded runs stop at this season until extended.
    pub end_season:         Option<Season>,
    pub tie_break:          TieBreak,
    /// Explicit seed for reproducible runs. `None` draws from OS entropy.
    pub seed:               Option<u64>,
    pub bind_addr:          String,
    pub store:              StoreConfig,
    pub teams:              Vec<Team>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            epoch:              DEFAULT_EPOCH,
            games_per_season:   DEFAULT_GAMES_PER_SEASON,
            tick_interval_secs: DEFAULT_TICK_INTERVAL_SECS,
            end_season:         None,
            tie_break:          TieBreak::default(),
            seed:               None,
            bind_addr:          DEFAULT_BIND_ADDR.into(),
            store:              StoreConfig::default(),
            teams:              default_roster(),
        }
    }
}

impl SimConfig {
    /// Load from a JSON config file. Missing fields keep their defaults.
    /// In tests, use SimConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Seeded, memory-backed, one-second ticks.
    pub fn default_test() -> Self {
        Self {
            tick_interval_secs: 1,
            seed:               Some(0x5EA5_0001),
            bind_addr:          "127.0.0.1:0".into(),
            store:              StoreConfig::memory(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.games_per_season == 0 {
            return Err(SimError::InvalidConfig("games_per_season must be > 0".into()));
        }
        if self.tick_interval_secs == 0 {
            return Err(SimError::InvalidConfig("tick_interval_secs must be > 0".into()));
        }
        if self.epoch > MAX_START_SEASON {
            return Err(SimError::InvalidConfig(format!(
                "epoch {} is above the maximum of {MAX_START_SEASON}",
                self.epoch
            )));
        }
        if let Some(end) = self.end_season {
            if end > MAX_START_SEASON {
                return Err(SimError::InvalidConfig(format!(
                    "end_season {end} is above the maximum of {MAX_START_SEASON}"
                )));
            }
            if end < self.epoch {
                return Err(SimError::InvalidConfig(format!(
                    "end_season {end} is before epoch {}",
                    self.epoch
                )));
            }
        }
        validate_roster(&self.teams)
    }

    /// Games in one full round-robin of the configured roster.
    pub fn games_per_round(&self) -> usize {
        let n = self.teams.len();
        n * n.saturating_sub(1) / 2
    }
}
