//! Shared primitive types used across the entire simulation.

/// A season number. Seasons are counted in calendar years, starting at the epoch.
pub type Season = u32;

/// Stable identifier of a team on the roster.
pub type TeamId = u32;

/// A simulated score. Scores are never negative.
pub type Score = u32;
