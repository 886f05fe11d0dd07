//! Gridiron: a periodic round-robin season simulator.
//!
//! A fixed roster plays a full round-robin every tick. Results accumulate in
//! a season ledger that rolls over to the next season once the per-season
//! quota is met, and the ledger is persisted after every mutation.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod game;
pub mod ledger;
pub mod rng;
pub mod server;
pub mod simulator;
pub mod snapshot;
pub mod store;
pub mod team;
pub mod types;
