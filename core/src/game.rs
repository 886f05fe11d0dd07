//! Game simulation: scores, single games and full round-robins.
//!
//! Nothing here touches ledger state. A round is simulated first and handed
//! to the ledger afterwards, so the ledger alone decides season boundaries.

use crate::{
    rng::SimRng,
    team::Team,
    types::{Score, Season},
};
use serde::{Deserialize, Serialize};

/// Highest base value a single score draw can start from.
pub const MAX_BASE_SCORE: u32 = 30;

/// Half-width of the uniform noise added to a team's bias on every draw.
pub const BIAS_NOISE: f64 = 0.2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResult {
    /// Older data files omit this; the ledger restamps it on load.
    #[serde(default)]
    pub season: Season,
    pub team1:  String,
    pub team2:  String,
    pub score1: Score,
    pub score2: Score,
    pub winner: String,
}

impl GameResult {
    pub fn is_tie(&self) -> bool {
        self.score1 == self.score2
    }
}

/// How a game with equal scores gets its winner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Stronger team wins; on equal bias the first-listed team wins.
    #[default]
    HigherBias,
    /// A fair draw from the run's random source.
    CoinFlip,
}

impl TieBreak {
    fn first_team_wins(self, a: &Team, b: &Team, rng: &mut SimRng) -> bool {
        match self {
            TieBreak::HigherBias => a.bias >= b.bias,
            TieBreak::CoinFlip   => rng.chance(0.5),
        }
    }
}

/// Draw one score for a team of the given bias.
///
/// base ∈ [0, 30], factor = bias + noise ∈ [bias - 0.2, bias + 0.2],
/// result = floor(base × factor) clamped at zero.
pub fn generate_score(bias: f64, rng: &mut SimRng) -> Score {
    let base = rng.int_inclusive(0, MAX_BASE_SCORE) as f64;
    let factor = bias + rng.uniform(-BIAS_NOISE, BIAS_NOISE);
    (base * factor).floor().max(0.0) as Score
}

pub fn simulate_game(
    a:         &Team,
    b:         &Team,
    season:    Season,
    tie_break: TieBreak,
    rng:       &mut SimRng,
) -> GameResult {
    let score1 = generate_score(a.bias, rng);
    let score2 = generate_score(b.bias, rng);

    let first_wins = match score1.cmp(&score2) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less    => false,
        std::cmp::Ordering::Equal   => tie_break.first_team_wins(a, b, rng),
    };

    GameResult {
        season,
        team1:  a.name.clone(),
        team2:  b.name.clone(),
        score1,
        score2,
        winner: if first_wins { a.name.clone() } else { b.name.clone() },
    }
}

/// One round-robin: every unordered pair exactly once.
///
/// Order is part of the contract: (0,1), (0,2), .., (0,n-1), (1,2), ..
pub fn simulate_round(
    roster:    &[Team],
    season:    Season,
    tie_break: TieBreak,
    rng:       &mut SimRng,
) -> Vec<GameResult> {
    let n = roster.len();
    let mut games = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            games.push(simulate_game(&roster[i], &roster[j], season, tie_break, rng));
        }
    }
    games
}
