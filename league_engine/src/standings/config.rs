//! Point values awarded per match result.

use super::errors::{StandingsError, StandingsResult};
use serde::{Deserialize, Serialize};

/// Largest value accepted for a single result
const MAX_POINTS_PER_RESULT: u32 = 10;

/// Points awarded for a win, a draw and a loss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsConfig {
    /// Points for a win (default: 3)
    pub win: u32,

    /// Points for a draw (default: 1)
    pub draw: u32,

    /// Points for a loss (default: 0)
    pub loss: u32,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

impl PointsConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `POINTS_FOR_WIN` (default: 3)
    /// - `POINTS_FOR_DRAW` (default: 1)
    /// - `POINTS_FOR_LOSS` (default: 0)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            win: std::env::var("POINTS_FOR_WIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.win),
            draw: std::env::var("POINTS_FOR_DRAW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.draw),
            loss: std::env::var("POINTS_FOR_LOSS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.loss),
        }
    }

    /// Two points for a win, as in older league rules
    pub fn two_for_a_win() -> Self {
        Self {
            win: 2,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> StandingsResult<()> {
        if self.win > MAX_POINTS_PER_RESULT {
            return Err(StandingsError::InvalidConfig(format!(
                "win points must be at most {MAX_POINTS_PER_RESULT}"
            )));
        }

        if self.win <= self.draw {
            return Err(StandingsError::InvalidConfig(
                "a win must be worth more than a draw".to_string(),
            ));
        }

        if self.draw < self.loss {
            return Err(StandingsError::InvalidConfig(
                "a draw must be worth at least as much as a loss".to_string(),
            ));
        }

        Ok(())
    }
}
