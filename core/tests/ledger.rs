//! Season ledger rollover tests.

use gridiron_core::{
    engine::SimEngine,
    error::SimError,
    game::{simulate_round, TieBreak},
    ledger::SeasonLedger,
    rng::SimRng,
    team::default_roster,
};

/// 10 teams, quota 100: two rounds fill 90 games, the third closes the season
/// at its 10th game and carries 35 games into the next one.
#[test]
fn third_round_rolls_over_mid_round() {
    let mut engine = SimEngine::build_test(0x1920).unwrap();

    let first = engine.simulate_round().unwrap();
    assert_eq!(first.games, 45);
    assert!(first.seasons_closed().is_empty());

    let second = engine.simulate_round().unwrap();
    assert!(second.seasons_closed().is_empty());
    assert_eq!(engine.current_games().len(), 90);
    assert_eq!(engine.current_season(), 1920);

    let third = engine.simulate_round().unwrap();
    assert_eq!(third.seasons_closed(), vec![1920]);
    assert_eq!(third.season, 1921);

    let archived = engine.ledger().season_games(1920).unwrap();
    assert_eq!(archived.len(), 100);
    assert!(archived.iter().all(|g| g.season == 1920));
    // Games 91..=100 are the first ten pairings of the third round.
    assert_eq!((archived[90].team1.as_str(), archived[90].team2.as_str()), ("Commanders", "Texans"));
    assert_eq!((archived[99].team1.as_str(), archived[99].team2.as_str()), ("Texans", "Packers"));

    let current = engine.current_games();
    assert_eq!(current.len(), 35);
    assert!(current.iter().all(|g| g.season == 1921));
    assert_eq!((current[0].team1.as_str(), current[0].team2.as_str()), ("Texans", "Steelers"));
}

#[test]
fn in_progress_stays_below_quota_after_every_append() {
    let roster = default_roster();
    let mut rng = SimRng::seeded(77);

    for quota in [1usize, 7, 44, 45, 46, 100] {
        let mut ledger = SeasonLedger::new(1920, quota);
        for _ in 0..6 {
            for game in simulate_round(&roster, ledger.current_season(), TieBreak::HigherBias, &mut rng) {
                ledger.append_game(game);
                assert!(
                    ledger.current_games().len() < quota,
                    "quota {quota}: in-progress reached {}",
                    ledger.current_games().len()
                );
            }
        }

        // Every closed season holds exactly the quota.
        for (season, games) in ledger.archive() {
            assert_eq!(games.len(), quota, "quota {quota}: season {season} wrong size");
        }
        let total: usize = ledger.archive().values().map(Vec::len).sum::<usize>()
            + ledger.current_games().len();
        assert_eq!(total, 6 * 45);
    }
}

#[test]
fn small_quota_closes_several_seasons_in_one_round() {
    let roster = default_roster();
    let mut rng = SimRng::seeded(8);
    let mut ledger = SeasonLedger::new(1920, 10);

    let events = ledger.append_round(simulate_round(&roster, 1920, TieBreak::HigherBias, &mut rng));

    assert_eq!(events.len(), 4);
    assert_eq!(ledger.current_season(), 1924);
    assert_eq!(ledger.current_games().len(), 5);
    assert_eq!(ledger.archive().keys().copied().collect::<Vec<_>>(), vec![1920, 1921, 1922, 1923]);
}

#[test]
fn quota_equal_to_round_closes_exactly_one_season() {
    let roster = default_roster();
    let mut rng = SimRng::seeded(9);
    let mut ledger = SeasonLedger::new(1920, 45);

    ledger.append_round(simulate_round(&roster, 1920, TieBreak::HigherBias, &mut rng));

    assert_eq!(ledger.current_season(), 1921);
    assert!(ledger.current_games().is_empty());
    assert_eq!(ledger.season_games(1920).unwrap().len(), 45);
}

#[test]
fn clear_returns_to_epoch() {
    let mut engine = SimEngine::build_test(5).unwrap();
    for _ in 0..5 {
        engine.simulate_round().unwrap();
    }
    assert!(engine.current_season() > 1920);

    engine.clear().unwrap();

    assert_eq!(engine.current_season(), 1920);
    assert!(engine.current_games().is_empty());
    assert!(engine.ledger().archive().is_empty());
    assert!(matches!(
        engine.ledger().season_games(1920),
        Err(SimError::SeasonNotFound { season: 1920 })
    ));
}

#[test]
fn never_simulated_season_is_not_found() {
    let mut engine = SimEngine::build_test(6).unwrap();
    engine.simulate_round().unwrap();

    // In progress, not archived.
    assert!(engine.ledger().season_games(1920).is_err());
    assert!(engine.ledger().season_games(1850).is_err());
}
