//! Bracket error types.

use crate::fixture::MatchId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a tie cannot be decided yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// Scores are level and no shootout was recorded
    NoShootout,
    /// Shootout recorded with equal penalty counts
    LevelShootout { penalties: u32 },
    /// A leg has no final score yet
    LegNotFinal { match_id: MatchId },
}

impl std::fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnresolvedReason::NoShootout => write!(f, "scores level and no penalty shootout"),
            UnresolvedReason::LevelShootout { penalties } => {
                write!(f, "penalty shootout level at {penalties} - {penalties}")
            }
            UnresolvedReason::LegNotFinal { match_id } => {
                write!(f, "match {match_id} has no final result")
            }
        }
    }
}

/// Bracket errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BracketError {
    /// Legs do not form a consistent pairing of two teams
    #[error("Invalid tie pairing: {0}")]
    InvalidTiePairing(String),

    /// Tie cannot be decided from the data available
    #[error("Tie unresolved: {0}")]
    Unresolved(UnresolvedReason),
}

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;
