//! Standings data models.

use super::config::PointsConfig;
use crate::fixture::{LeagueId, MatchResult, TeamId, TeamResult};
use serde::{Deserialize, Serialize};

/// Accumulated results of one team in one league
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team_id: TeamId,
    pub league_id: LeagueId,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    /// Sums of `u32` match scores
    pub goals_for: u64,
    pub goals_against: u64,
    /// Administrative deduction, not derived from matches
    pub penalty_points: u32,
}

impl StandingsRow {
    /// Create an all-zero row
    pub fn new(league_id: LeagueId, team_id: TeamId) -> Self {
        Self {
            team_id,
            league_id,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            penalty_points: 0,
        }
    }

    pub fn matches_played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    pub fn goal_difference(&self) -> i64 {
        let difference = i128::from(self.goals_for) - i128::from(self.goals_against);
        difference.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    /// Points under the given configuration, after deductions
    pub fn points(&self, config: &PointsConfig) -> i64 {
        i64::from(config.win) * i64::from(self.wins)
            + i64::from(config.draw) * i64::from(self.draws)
            + i64::from(config.loss) * i64::from(self.losses)
            - i64::from(self.penalty_points)
    }

    /// Add one result to the row
    pub fn record(&mut self, result: TeamResult, scored: u32, conceded: u32) {
        match result {
            TeamResult::Win => self.wins += 1,
            TeamResult::Draw => self.draws += 1,
            TeamResult::Loss => self.losses += 1,
        }
        self.goals_for = self.goals_for.saturating_add(u64::from(scored));
        self.goals_against = self.goals_against.saturating_add(u64::from(conceded));
    }

    /// Add the match to this row if the row's team took part in it.
    ///
    /// Returns `false` and leaves the row untouched otherwise.
    pub fn record_match(&mut self, m: &MatchResult) -> bool {
        match (m.result_for(self.team_id), m.goals_of(self.team_id)) {
            (Some(result), Some((scored, conceded))) => {
                self.record(result, scored, conceded);
                true
            }
            _ => false,
        }
    }
}

/// One ranked line of a league table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    /// 1-indexed position
    pub position: usize,
    pub points: i64,
    pub goal_difference: i64,
    pub matches_played: u32,
    pub row: StandingsRow,
}

impl TableEntry {
    /// Build table entries from rows that are already ranked
    pub fn from_ranked(rows: Vec<StandingsRow>, config: &PointsConfig) -> Vec<Self> {
        rows.into_iter()
            .enumerate()
            .map(|(idx, row)| Self {
                position: idx + 1,
                points: row.points(config),
                goal_difference: row.goal_difference(),
                matches_played: row.matches_played(),
                row,
            })
            .collect()
    }
}
