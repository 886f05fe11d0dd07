//! The roster: a fixed set of teams seeded once at startup.

use crate::{
    error::{SimError, SimResult},
    types::TeamId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id:   TeamId,
    pub name: String,
    /// Relative strength in [0.0, 1.0]. Higher skews scores upward.
    pub bias: f64,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>, bias: f64) -> Self {
        Self { id, name: name.into(), bias }
    }
}

/// The ten-team league every fresh server starts with.
pub fn default_roster() -> Vec<Team> {
    [
        "Commanders", "Texans", "Packers", "Steelers", "Vikings",
        "Eagles", "Bills", "Chiefs", "Lions", "Ravens",
    ]
    .iter()
    .enumerate()
    .map(|(i, name)| {
        let id = i as TeamId + 1;
        Team::new(id, *name, id as f64 / 10.0)
    })
    .collect()
}

/// Reject rosters that the simulation cannot run against.
pub fn validate_roster(teams: &[Team]) -> SimResult<()> {
    if teams.len() < 2 {
        return Err(SimError::InvalidConfig(format!(
            "roster needs at least 2 teams, got {}",
            teams.len()
        )));
    }

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for team in teams {
        if !ids.insert(team.id) {
            return Err(SimError::InvalidConfig(format!("duplicate team id {}", team.id)));
        }
        if !names.insert(team.name.as_str()) {
            return Err(SimError::InvalidConfig(format!("duplicate team name '{}'", team.name)));
        }
        if !(0.0..=1.0).contains(&team.bias) {
            return Err(SimError::InvalidConfig(format!(
                "team '{}' has bias {} outside [0, 1]",
                team.name, team.bias
            )));
        }
    }
    Ok(())
}
