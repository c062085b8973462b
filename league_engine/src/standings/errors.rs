//! Standings error types.

use crate::fixture::{LeagueId, MatchId, TeamId};
use std::time::Duration;
use thiserror::Error;

/// Standings errors
#[derive(Debug, Error)]
pub enum StandingsError {
    /// Match result already counted (idempotency key already used)
    #[error("Match {0} already registered in standings")]
    AlreadyProcessed(MatchId),

    /// No standings row for the team in this league
    #[error("No standings row for team {team_id} in league {league_id}")]
    NotFound { league_id: LeagueId, team_id: TeamId },

    /// Match result is not final yet
    #[error("Match {0} has no final result")]
    NotFinal(MatchId),

    /// Home and away team are the same, or the result differs from the
    /// stored match
    #[error("Match {0} is not a valid fixture")]
    InvalidFixture(MatchId),

    /// Invalid points configuration
    #[error("Invalid points configuration: {0}")]
    InvalidConfig(String),

    /// Match record missing from the store
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    /// Store did not answer in time
    #[error("Standings update timed out after {0:?}")]
    Timeout(Duration),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StandingsError {
    /// Whether the caller should simply skip the match
    pub fn is_already_processed(&self) -> bool {
        matches!(self, StandingsError::AlreadyProcessed(_))
    }

    /// Get a client-safe error message that doesn't leak database details
    pub fn client_message(&self) -> String {
        match self {
            StandingsError::Database(_) => "Internal server error".to_string(),
            StandingsError::Timeout(_) => "Standings temporarily unavailable".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for standings operations
pub type StandingsResult<T> = Result<T, StandingsError>;
