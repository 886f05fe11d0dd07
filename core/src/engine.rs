//! The simulation engine: roster, ledger, random source, clock and store.
//!
//! EXECUTION ORDER of one round (fixed):
//!   1. Simulate a full round-robin against the season in progress.
//!   2. Append every result to the ledger, rolling over per game.
//!   3. Persist the whole ledger.
//!
//! RULES:
//!   - The engine is the only owner of the ledger.
//!   - All randomness flows through the engine's SimRng.
//!   - A failed persist never rolls back the in-memory ledger; the error is
//!     returned and the next successful save reconciles the store.

use crate::{
    clock::{SimClock, SimulatorState},
    config::SimConfig,
    error::{SimError, SimResult},
    event::SimEvent,
    game::{self, GameResult, TieBreak},
    ledger::SeasonLedger,
    rng::SimRng,
    store::{open_store, LedgerStore, MemoryStore},
    team::Team,
    types::Season,
};

/// What one simulated round did to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// Season in progress after the round.
    pub season:        Season,
    pub games:         usize,
    pub events:        Vec<SimEvent>,
    /// In-progress games right after the round was committed.
    pub current_games: Vec<GameResult>,
}

impl RoundReport {
    pub fn seasons_closed(&self) -> Vec<Season> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SimEvent::SeasonClosed { season, .. } => Some(*season),
                _ => None,
            })
            .collect()
    }
}

pub struct SimEngine {
    pub clock: SimClock,
    roster:    Vec<Team>,
    tie_break: TieBreak,
    ledger:    SeasonLedger,
    rng:       SimRng,
    store:     Box<dyn LedgerStore>,
}

impl SimEngine {
    /// Wire an engine over an already opened store, loading any saved ledger.
    pub fn new(config: &SimConfig, store: Box<dyn LedgerStore>) -> SimResult<Self> {
        config.validate()?;

        let ledger = match store.load()? {
            Some(snapshot) => {
                log::info!(
                    "Loaded ledger from {} store: season {}, {} games on record",
                    store.name(),
                    snapshot.current_season,
                    snapshot.total_games()
                );
                SeasonLedger::from_snapshot(config.epoch, config.games_per_season, snapshot)?
            }
            None => {
                log::info!("No saved ledger; starting fresh at season {}", config.epoch);
                SeasonLedger::new(config.epoch, config.games_per_season)
            }
        };

        let rng = SimRng::new(config.seed);
        if let Some(seed) = rng.seed() {
            log::info!("Deterministic run with seed {seed}");
        }

        Ok(Self {
            clock: SimClock::new(config.tick_interval_secs, config.end_season),
            roster: config.teams.clone(),
            tie_break: config.tie_break,
            ledger,
            rng,
            store,
        })
    }

    /// Open the configured store and build an engine on top of it.
    pub fn build(config: &SimConfig) -> SimResult<Self> {
        let store = open_store(&config.store)?;
        Self::new(config, store)
    }

    /// Memory-backed engine with the default test config and the given seed.
    pub fn build_test(seed: u64) -> SimResult<Self> {
        let config = SimConfig { seed: Some(seed), ..SimConfig::default_test() };
        Self::new(&config, Box::new(MemoryStore::new()))
    }

    // ── Mutation ───────────────────────────────────────────────

    /// Simulate one round-robin, append it, and persist.
    pub fn simulate_round(&mut self) -> SimResult<RoundReport> {
        let games = game::simulate_round(
            &self.roster,
            self.ledger.current_season(),
            self.tie_break,
            &mut self.rng,
        );
        let count = games.len();
        let mut events = self.ledger.append_round(games);

        for event in &events {
            if let SimEvent::SeasonClosed { season, games } = event {
                log::info!("Season {season} closed with {games} games");
            }
        }
        let season = self.ledger.current_season();
        events.push(SimEvent::RoundSimulated { season, games: count });
        log::debug!(
            "Round simulated: {count} games, season {season} now has {} games",
            self.ledger.current_games().len()
        );

        self.persist()?;
        Ok(RoundReport {
            season,
            games: count,
            events,
            current_games: self.ledger.current_games().to_vec(),
        })
    }

    /// Wipe every season and return to the epoch. A halted bounded run is
    /// released, since the epoch is below its end season again.
    pub fn clear(&mut self) -> SimResult<SimEvent> {
        self.ledger.clear();
        if self.clock.state == SimulatorState::Halted {
            self.clock.state = SimulatorState::Idle;
        }
        let event = SimEvent::LedgerCleared { epoch: self.ledger.epoch() };
        log::info!("{}: back to season {}", event.type_name(), self.ledger.epoch());
        self.persist()?;
        Ok(event)
    }

    /// Raise the end season of a bounded run by one. Returns the new bound.
    pub fn extend(&mut self) -> SimResult<Season> {
        let end_season = self.clock.extend().ok_or(SimError::NotBounded)?;
        if self.clock.state == SimulatorState::Halted {
            self.clock.state = SimulatorState::Idle;
        }
        log::info!("Simulation extended to season {end_season}");
        Ok(end_season)
    }

    /// Write the current ledger to the store.
    pub fn persist(&mut self) -> SimResult<()> {
        let snapshot = self.ledger.snapshot();
        let backend = self.store.name();
        self.store.save(&snapshot).map_err(|e| {
            log::error!("Failed to persist ledger to {backend} store: {e}");
            e
        })
    }

    // ── Queries ────────────────────────────────────────────────

    pub fn roster(&self) -> &[Team] {
        &self.roster
    }

    pub fn ledger(&self) -> &SeasonLedger {
        &self.ledger
    }

    pub fn current_season(&self) -> Season {
        self.ledger.current_season()
    }

    pub fn current_games(&self) -> &[GameResult] {
        self.ledger.current_games()
    }

    pub fn bound_reached(&self) -> bool {
        self.clock.bound_reached(self.ledger.current_season())
    }
}
