//! The season ledger: the only mutable simulation state.
//!
//! INVARIANT: `current_games.len() < games_per_season` after every single
//! append. Rollover (archive + reset + increment) happens inside
//! `append_game`, so no caller can observe a full in-progress season.

use crate::{
    error::{SimError, SimResult},
    event::SimEvent,
    game::GameResult,
    snapshot::LedgerSnapshot,
    types::Season,
};
use std::collections::BTreeMap;

/// Highest season a ledger may start from. Keeps `current_season + 1`
/// far away from `Season::MAX` for any realistic number of rollovers.
pub const MAX_START_SEASON: Season = 999_999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonLedger {
    epoch:            Season,
    games_per_season: usize,
    current_season:   Season,
    current_games:    Vec<GameResult>,
    archive:          BTreeMap<Season, Vec<GameResult>>,
}

impl SeasonLedger {
    /// Fresh ledger at the epoch. Panics if `games_per_season` is zero;
    /// config validation rejects that before a ledger is ever built.
    pub fn new(epoch: Season, games_per_season: usize) -> Self {
        assert!(games_per_season > 0, "games_per_season must be > 0");
        Self {
            epoch,
            games_per_season,
            current_season: epoch,
            current_games:  Vec::new(),
            archive:        BTreeMap::new(),
        }
    }

    /// Rebuild a ledger from persisted state.
    ///
    /// A snapshot saved under a larger quota may hold a full in-progress
    /// season; those games are re-appended so the invariant holds again.
    /// Archived games are stamped with the season they are filed under.
    pub fn from_snapshot(
        epoch:            Season,
        games_per_season: usize,
        snapshot:         LedgerSnapshot,
    ) -> SimResult<Self> {
        if snapshot.current_season > MAX_START_SEASON {
            return Err(SimError::InvalidConfig(format!(
                "saved season {} is above the maximum of {MAX_START_SEASON}",
                snapshot.current_season
            )));
        }

        let mut ledger = Self::new(epoch, games_per_season);
        ledger.current_season = snapshot.current_season;
        ledger.archive = snapshot.archive;
        for (season, games) in ledger.archive.iter_mut() {
            for game in games.iter_mut() {
                game.season = *season;
            }
        }

        if snapshot.current_games.len() >= games_per_season {
            log::warn!(
                "Loaded {} in-progress games with a quota of {games_per_season}; rolling over",
                snapshot.current_games.len()
            );
        }
        ledger.append_round(snapshot.current_games);
        Ok(ledger)
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            current_season: self.current_season,
            current_games:  self.current_games.clone(),
            archive:        self.archive.clone(),
        }
    }

    // ── Mutation ───────────────────────────────────────────────

    /// Record one game under the season in progress, rolling over if the
    /// quota is reached. Returns the closed season, if any.
    pub fn append_game(&mut self, mut game: GameResult) -> Option<Season> {
        game.season = self.current_season;
        self.current_games.push(game);

        if self.current_games.len() < self.games_per_season {
            return None;
        }

        let closed = self.current_season;
        let games = std::mem::take(&mut self.current_games);
        self.archive.insert(closed, games);
        self.current_season += 1;
        Some(closed)
    }

    /// Append a simulated round in order, checking for rollover after every
    /// single game. One round may close more than one season.
    pub fn append_round(&mut self, games: Vec<GameResult>) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for game in games {
            if let Some(season) = self.append_game(game) {
                events.push(SimEvent::SeasonClosed {
                    season,
                    games: self.games_per_season,
                });
            }
        }
        events
    }

    /// Back to the epoch with no games at all.
    pub fn clear(&mut self) {
        self.current_season = self.epoch;
        self.current_games.clear();
        self.archive.clear();
    }

    // ── Queries ────────────────────────────────────────────────

    pub fn epoch(&self) -> Season {
        self.epoch
    }

    pub fn games_per_season(&self) -> usize {
        self.games_per_season
    }

    pub fn current_season(&self) -> Season {
        self.current_season
    }

    pub fn current_games(&self) -> &[GameResult] {
        &self.current_games
    }

    pub fn archive(&self) -> &BTreeMap<Season, Vec<GameResult>> {
        &self.archive
    }

    /// Games of a completed season.
    pub fn season_games(&self, season: Season) -> SimResult<&[GameResult]> {
        self.archive
            .get(&season)
            .map(Vec::as_slice)
            .ok_or(SimError::SeasonNotFound { season })
    }
}
