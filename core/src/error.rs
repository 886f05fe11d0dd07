use thiserror::Error;

use crate::types::Season;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No data found for season {season}")]
    SeasonNotFound { season: Season },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Simulation has no end season to extend")]
    NotBounded,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    /// True for failures of the durable store. In-memory state is still valid.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            SimError::Database(_) | SimError::Serialization(_) | SimError::Io(_)
        )
    }
}

pub type SimResult<T> = Result<T, SimError>;
