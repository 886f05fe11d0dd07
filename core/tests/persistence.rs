//! Store backends: round-trips, reloads, and failure handling.

use gridiron_core::{
    config::SimConfig,
    engine::SimEngine,
    error::{SimError, SimResult},
    snapshot::LedgerSnapshot,
    store::{open_store, JsonFileStore, LedgerStore, MemoryStore, SqliteStore, StoreBackend, StoreConfig},
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

fn played_snapshot(rounds: usize) -> LedgerSnapshot {
    let mut engine = SimEngine::build_test(0xF11E).unwrap();
    for _ in 0..rounds {
        engine.simulate_round().unwrap();
    }
    engine.ledger().snapshot()
}

#[test]
fn json_store_starts_empty_then_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("game_data.json"));

    assert!(store.load().unwrap().is_none());

    let snapshot = played_snapshot(5);
    store.save(&snapshot).unwrap();
    assert_eq!(store.load().unwrap(), Some(snapshot));
    assert!(!dir.path().join("game_data.json.tmp").exists());
}

#[test]
fn json_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game_data.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonFileStore::new(&path).load().unwrap_err();
    assert!(matches!(err, SimError::Serialization(_)));
    assert!(err.is_persistence());
}

#[test]
fn sqlite_store_round_trips() {
    let mut store = SqliteStore::in_memory().unwrap();
    store.migrate().unwrap();

    assert!(store.load().unwrap().is_none());

    let snapshot = played_snapshot(7);
    store.save(&snapshot).unwrap();
    assert_eq!(store.game_count().unwrap(), 7 * 45);
    assert_eq!(store.load().unwrap(), Some(snapshot));

    // A later save replaces, never accumulates.
    let cleared = LedgerSnapshot::empty(1920);
    store.save(&cleared).unwrap();
    assert_eq!(store.game_count().unwrap(), 0);
    assert_eq!(store.load().unwrap(), Some(cleared));
}

#[test]
fn engine_resumes_from_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = SimConfig {
        store: StoreConfig {
            backend: StoreBackend::Sqlite,
            path:    dir.path().join("league.db").to_string_lossy().into_owned(),
        },
        ..SimConfig::default_test()
    };

    let before = {
        let mut engine = SimEngine::build(&config).unwrap();
        for _ in 0..3 {
            engine.simulate_round().unwrap();
        }
        engine.ledger().snapshot()
    };
    assert_eq!(before.current_season, 1921);

    let mut engine = SimEngine::build(&config).unwrap();
    assert_eq!(engine.ledger().snapshot(), before);

    engine.simulate_round().unwrap();
    assert_eq!(engine.current_games().len(), 35 + 45);
}

#[test]
fn engine_resumes_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = SimConfig {
        store: StoreConfig {
            backend: StoreBackend::Json,
            path:    dir.path().join("game_data.json").to_string_lossy().into_owned(),
        },
        ..SimConfig::default_test()
    };

    let before = {
        let mut engine = SimEngine::build(&config).unwrap();
        engine.simulate_round().unwrap();
        engine.clear().unwrap();
        engine.simulate_round().unwrap();
        engine.ledger().snapshot()
    };

    let engine = SimEngine::build(&config).unwrap();
    assert_eq!(engine.ledger().snapshot(), before);
    assert_eq!(engine.current_games().len(), 45);
}

#[test]
fn open_store_builds_memory_backend() {
    let store = open_store(&StoreConfig::memory()).unwrap();
    assert_eq!(store.name(), "memory");
    assert!(store.load().unwrap().is_none());
}

#[test]
fn memory_store_saves_after_every_mutation() {
    let store = MemoryStore::new();
    let config = SimConfig { games_per_season: 100, ..SimConfig::default_test() };
    let mut engine = SimEngine::new(&config, Box::new(store.clone())).unwrap();
    assert_eq!(store.save_count(), 0);

    // Rounds 1 and 2 stay in 1920, round 3 rolls over at game 100.
    for expected in 1..=3 {
        engine.simulate_round().unwrap();
        assert_eq!(store.save_count(), expected);
        assert_eq!(store.last_saved(), Some(engine.ledger().snapshot()));
    }
    assert_eq!(store.last_saved().unwrap().current_season, 1921);

    engine.clear().unwrap();
    assert_eq!(store.save_count(), 4);
    assert_eq!(store.last_saved(), Some(LedgerSnapshot::empty(1920)));
}

#[test]
fn engine_resumes_from_memory_snapshot() {
    let snapshot = played_snapshot(4);
    let store = MemoryStore::with_snapshot(snapshot.clone());

    let mut engine = SimEngine::new(&SimConfig::default_test(), Box::new(store.clone())).unwrap();
    assert_eq!(engine.ledger().snapshot(), snapshot);
    assert_eq!(store.save_count(), 0);

    engine.simulate_round().unwrap();
    assert_eq!(store.save_count(), 1);
    assert_eq!(store.last_saved().unwrap().total_games(), 5 * 45);
}

#[test]
fn legacy_data_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game_data.json");
    let game = |winner: &str| {
        serde_json::json!({
            "team1": "Bills", "team2": "Lions",
            "score1": 21, "score2": 14, "winner": winner,
        })
    };
    let legacy = serde_json::json!({
        "current_year": 1921,
        "current_year_games": [game("Bills")],
        "all_years_data": { "1920": [game("Bills"), game("Lions")] },
    });
    std::fs::write(&path, legacy.to_string()).unwrap();

    let config = SimConfig {
        store: StoreConfig {
            backend: StoreBackend::Json,
            path:    path.to_string_lossy().into_owned(),
        },
        ..SimConfig::default_test()
    };
    let engine = SimEngine::build(&config).unwrap();

    assert_eq!(engine.current_season(), 1921);
    assert_eq!(engine.current_games().len(), 1);
    assert_eq!(engine.current_games()[0].season, 1921);
    let archived = engine.ledger().season_games(1920).unwrap();
    assert_eq!(archived.len(), 2);
    assert!(archived.iter().all(|g| g.season == 1920));
}

#[test]
fn saved_season_out_of_range_is_rejected() {
    let store = MemoryStore::with_snapshot(LedgerSnapshot::empty(u32::MAX));
    let err = SimEngine::new(&SimConfig::default_test(), Box::new(store)).err().unwrap();
    assert!(matches!(err, SimError::InvalidConfig(_)));
}

/// Store that can be switched into a failing mode from the test.
struct FlakyStore {
    failing: Arc<AtomicBool>,
    saved:   Arc<Mutex<Option<LedgerSnapshot>>>,
}

impl LedgerStore for FlakyStore {
    fn name(&self) -> &'static str { "flaky" }

    fn load(&self) -> SimResult<Option<LedgerSnapshot>> {
        Ok(self.saved.lock().unwrap().clone())
    }

    fn save(&mut self, snapshot: &LedgerSnapshot) -> SimResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into());
        }
        *self.saved.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }
}

#[test]
fn failed_persist_keeps_memory_and_recovers() {
    let failing = Arc::new(AtomicBool::new(false));
    let saved = Arc::new(Mutex::new(None));
    let store = FlakyStore { failing: failing.clone(), saved: saved.clone() };
    let mut engine = SimEngine::new(&SimConfig::default_test(), Box::new(store)).unwrap();

    engine.simulate_round().unwrap();

    failing.store(true, Ordering::SeqCst);
    let err = engine.simulate_round().unwrap_err();
    assert!(err.is_persistence(), "unexpected error: {err}");
    // The round still happened in memory.
    assert_eq!(engine.current_games().len(), 90);
    assert_eq!(saved.lock().unwrap().as_ref().unwrap().current_games.len(), 45);

    failing.store(false, Ordering::SeqCst);
    engine.simulate_round().unwrap();
    let stored = saved.lock().unwrap().clone().unwrap();
    assert_eq!(stored, engine.ledger().snapshot());
    assert_eq!(stored.total_games(), 135);
}
