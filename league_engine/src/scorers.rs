//! Top scorers of a competition.

use crate::fixture::{PlayerId, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How the goal was scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    /// From open play or a set piece other than a penalty
    Open,
    /// Penalty kick during the match (shootouts are not goals)
    Penalty,
}

/// A single goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub scorer_id: PlayerId,
    /// Team the scorer played for, when known
    pub team_id: Option<TeamId>,
    pub kind: GoalKind,
    /// Match minute, when known
    pub minute: Option<u32>,
}

impl GoalRecord {
    pub fn new(scorer_id: PlayerId, team_id: TeamId, kind: GoalKind) -> Self {
        Self {
            scorer_id,
            team_id: Some(team_id),
            kind,
            minute: None,
        }
    }

    pub fn at_minute(mut self, minute: u32) -> Self {
        self.minute = Some(minute);
        self
    }
}

/// Goals of one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerEntry {
    pub scorer_id: PlayerId,
    /// Team of the player's latest goal that names one
    pub team_id: Option<TeamId>,
    pub goals: u32,
    pub penalty_goals: u32,
}

/// Players ranked by goals scored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorersTable {
    entries: Vec<ScorerEntry>,
}

impl ScorersTable {
    /// Group goals by scorer, most goals first, then by scorer ID
    pub fn from_goals<'a, I>(goals: I) -> Self
    where
        I: IntoIterator<Item = &'a GoalRecord>,
    {
        let mut by_scorer: HashMap<PlayerId, ScorerEntry> = HashMap::new();

        for goal in goals {
            let entry = by_scorer
                .entry(goal.scorer_id)
                .or_insert_with(|| ScorerEntry {
                    scorer_id: goal.scorer_id,
                    team_id: None,
                    goals: 0,
                    penalty_goals: 0,
                });

            entry.goals += 1;
            if goal.kind == GoalKind::Penalty {
                entry.penalty_goals += 1;
            }
            if goal.team_id.is_some() {
                entry.team_id = goal.team_id;
            }
        }

        let mut entries: Vec<ScorerEntry> = by_scorer.into_values().collect();
        entries.sort_by(|a, b| {
            b.goals
                .cmp(&a.goals)
                .then_with(|| a.scorer_id.cmp(&b.scorer_id))
        });

        Self { entries }
    }

    pub fn entries(&self) -> &[ScorerEntry] {
        &self.entries
    }

    /// Leading `n` scorers
    pub fn top(&self, n: usize) -> &[ScorerEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
