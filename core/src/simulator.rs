//! The periodic simulator and the shared handle the HTTP layer uses.
//!
//! RULE: every access to the engine goes through `SimHandle`, which owns the
//! one mutex around it. A round's simulate + append + persist runs entirely
//! under that lock; the timer sleeps outside it, so on-demand requests can
//! run between ticks but never in the middle of one.

use crate::{
    clock::SimulatorState,
    engine::{RoundReport, SimEngine},
    error::SimResult,
    event::SimEvent,
    types::Season,
};
use std::sync::Arc;
use tokio::{
    sync::{Mutex, MutexGuard, Notify},
    task::JoinHandle,
};

/// Result of one timer iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Simulated(RoundReport),
    /// Bounded run is at its end season; nothing was simulated.
    Halted { season: Season, end_season: Season },
}

#[derive(Clone)]
pub struct SimHandle {
    engine: Arc<Mutex<SimEngine>>,
    wake:   Arc<Notify>,
}

impl SimHandle {
    pub fn new(engine: SimEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            wake:   Arc::new(Notify::new()),
        }
    }

    /// Exclusive access for reads and ad-hoc mutation.
    pub async fn lock(&self) -> MutexGuard<'_, SimEngine> {
        self.engine.lock().await
    }

    /// One on-demand round. Ignores the end season: an explicit request
    /// always simulates.
    pub async fn simulate_once(&self) -> SimResult<RoundReport> {
        let mut engine = self.engine.lock().await;
        Self::run_round(&mut engine)
    }

    /// Reset to the epoch and wake a halted timer loop. The loop is woken
    /// even when the save fails: the in-memory ledger is already cleared.
    pub async fn clear(&self) -> SimResult<SimEvent> {
        let result = self.engine.lock().await.clear();
        self.wake.notify_one();
        result
    }

    /// Raise the end season and wake a halted timer loop.
    pub async fn extend(&self) -> SimResult<Season> {
        let end_season = self.engine.lock().await.extend()?;
        self.wake.notify_one();
        Ok(end_season)
    }

    /// One timer iteration: check the bound first, then simulate.
    pub async fn tick(&self) -> SimResult<TickOutcome> {
        let mut engine = self.engine.lock().await;

        if engine.bound_reached() {
            let season = engine.current_season();
            let end_season = engine.clock.end_season.unwrap_or(season);
            if engine.clock.state != SimulatorState::Halted {
                log::info!("Reached end season {end_season}; halting simulation");
            }
            engine.clock.state = SimulatorState::Halted;
            return Ok(TickOutcome::Halted { season, end_season });
        }

        Self::run_round(&mut engine).map(TickOutcome::Simulated)
    }

    /// Spawn the timer loop on the current runtime. It runs until aborted.
    pub fn spawn_periodic(&self) -> JoinHandle<()> {
        let handle = self.clone();
        tokio::spawn(async move { handle.run_periodic().await })
    }

    async fn run_periodic(self) {
        loop {
            match self.tick().await {
                Ok(TickOutcome::Simulated(report)) => {
                    log::debug!("Tick committed {} games in season {}", report.games, report.season);
                }
                Ok(TickOutcome::Halted { .. }) => {
                    // Sleep until the run is extended or cleared.
                    self.wake.notified().await;
                    continue;
                }
                Err(e) => log::error!("Simulation tick failed: {e}"),
            }

            let interval = self.engine.lock().await.clock.interval();
            tokio::time::sleep(interval).await;
        }
    }

    fn run_round(engine: &mut SimEngine) -> SimResult<RoundReport> {
        let resume = match engine.clock.state {
            SimulatorState::Halted => SimulatorState::Halted,
            _ => SimulatorState::Idle,
        };
        engine.clock.state = SimulatorState::Simulating;
        let result = engine.simulate_round();
        engine.clock.state = resume;
        result
    }
}
