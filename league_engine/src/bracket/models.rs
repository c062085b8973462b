//! Knockout tie data models.

use crate::fixture::{MatchResult, TeamId};
use serde::{Deserialize, Serialize};

/// Number of legs played between the two teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieFormat {
    /// One match decides the tie
    SingleLeg,
    /// Home and away legs, decided on aggregate
    TwoLegged,
}

/// Penalty shootout score, sides named after the first leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shootout {
    /// Penalties scored by the first leg's home team
    pub first_leg_home: u32,
    /// Penalties scored by the first leg's away team
    pub first_leg_away: u32,
}

/// Two teams paired in a knockout round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTie {
    pub first_leg: MatchResult,
    pub second_leg: Option<MatchResult>,
    pub format: TieFormat,
    /// `None` when no shootout took place
    pub shootout: Option<Shootout>,
}

impl BracketTie {
    /// Tie decided by a single match
    pub fn single_leg(first_leg: MatchResult) -> Self {
        Self {
            first_leg,
            second_leg: None,
            format: TieFormat::SingleLeg,
            shootout: None,
        }
    }

    /// Tie decided on aggregate over two legs
    pub fn two_legged(first_leg: MatchResult, second_leg: MatchResult) -> Self {
        Self {
            first_leg,
            second_leg: Some(second_leg),
            format: TieFormat::TwoLegged,
            shootout: None,
        }
    }

    /// Record a penalty shootout
    pub fn with_shootout(mut self, first_leg_home: u32, first_leg_away: u32) -> Self {
        self.shootout = Some(Shootout {
            first_leg_home,
            first_leg_away,
        });
        self
    }

    /// The two teams, first leg's home team first
    pub fn teams(&self) -> (TeamId, TeamId) {
        (self.first_leg.home_team_id, self.first_leg.away_team_id)
    }
}

/// Goals per team over the whole tie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateScore {
    /// First leg's home team
    pub first_team_id: TeamId,
    pub first_team_goals: u64,
    /// First leg's away team
    pub second_team_id: TeamId,
    pub second_team_goals: u64,
}

impl AggregateScore {
    pub fn is_level(&self) -> bool {
        self.first_team_goals == self.second_team_goals
    }
}

/// What decided the tie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decider {
    /// Single-leg score
    Score,
    /// Two-leg aggregate score
    Aggregate,
    /// Penalty shootout
    Penalties,
}

/// Result of a decided tie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketOutcome {
    pub advancing_team_id: TeamId,
    pub eliminated_team_id: TeamId,
    pub decided_by: Decider,
    pub aggregate: AggregateScore,
}
