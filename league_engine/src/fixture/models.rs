//! Match result data models shared by the standings and bracket components.

use serde::{Deserialize, Serialize};

/// Team ID type
pub type TeamId = i64;

/// League (tournament) ID type
pub type LeagueId = i64;

/// Cup ID type
pub type CupId = i64;

/// Match ID type
pub type MatchId = i64;

/// Player ID type
pub type PlayerId = i64;

/// Which competition consumes a match result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchContext {
    /// Result feeds a league standings table
    LeagueFixture {
        league_id: LeagueId,
        /// Matchday ("tour") within the league calendar
        round: Option<u32>,
    },
    /// Result feeds a knockout tie
    KnockoutLeg { cup_id: CupId },
}

/// Result of a match seen from the home side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

/// Result of a match seen from one participating team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamResult {
    Win,
    Draw,
    Loss,
}

impl std::fmt::Display for TeamResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamResult::Win => write!(f, "win"),
            TeamResult::Draw => write!(f, "draw"),
            TeamResult::Loss => write!(f, "loss"),
        }
    }
}

/// Final (or pending) score of a single match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Match ID, also the idempotency key for standings updates
    pub id: MatchId,
    /// Home team
    pub home_team_id: TeamId,
    /// Away team
    pub away_team_id: TeamId,
    /// Goals scored by the home team
    pub home_goals: u32,
    /// Goals scored by the away team
    pub away_goals: u32,
    /// Whether the score is final
    pub is_final: bool,
    /// Set once the result has been counted in a standings table
    pub already_registered: bool,
    /// Result awarded administratively rather than played
    pub technical: bool,
    /// Competition the match belongs to
    pub context: MatchContext,
}

impl MatchResult {
    /// Create a final league fixture result
    pub fn league(
        id: MatchId,
        league_id: LeagueId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        home_goals: u32,
        away_goals: u32,
    ) -> Self {
        Self {
            id,
            home_team_id,
            away_team_id,
            home_goals,
            away_goals,
            is_final: true,
            already_registered: false,
            technical: false,
            context: MatchContext::LeagueFixture {
                league_id,
                round: None,
            },
        }
    }

    /// Create a final knockout leg result
    pub fn knockout(
        id: MatchId,
        cup_id: CupId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        home_goals: u32,
        away_goals: u32,
    ) -> Self {
        Self {
            id,
            home_team_id,
            away_team_id,
            home_goals,
            away_goals,
            is_final: true,
            already_registered: false,
            technical: false,
            context: MatchContext::KnockoutLeg { cup_id },
        }
    }

    /// Mark the result as not yet final
    pub fn pending(mut self) -> Self {
        self.is_final = false;
        self
    }

    /// Set the matchday of a league fixture
    pub fn in_round(mut self, round: u32) -> Self {
        if let MatchContext::LeagueFixture { round: r, .. } = &mut self.context {
            *r = Some(round);
        }
        self
    }

    /// Mark the result as awarded administratively
    pub fn awarded(mut self) -> Self {
        self.technical = true;
        self
    }

    /// League the fixture belongs to, if it is a league fixture
    pub fn league_id(&self) -> Option<LeagueId> {
        match self.context {
            MatchContext::LeagueFixture { league_id, .. } => Some(league_id),
            MatchContext::KnockoutLeg { .. } => None,
        }
    }

    /// Classify the score; strictly more goals wins, equal goals is a draw
    pub fn outcome(&self) -> Outcome {
        match self.home_goals.cmp(&self.away_goals) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Less => Outcome::AwayWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Winning team, `None` on a draw
    pub fn winner(&self) -> Option<TeamId> {
        match self.outcome() {
            Outcome::HomeWin => Some(self.home_team_id),
            Outcome::AwayWin => Some(self.away_team_id),
            Outcome::Draw => None,
        }
    }

    /// Whether the team took part in the match
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Result for one of the two teams
    pub fn result_for(&self, team_id: TeamId) -> Option<TeamResult> {
        if !self.involves(team_id) {
            return None;
        }

        Some(match self.winner() {
            None => TeamResult::Draw,
            Some(winner) if winner == team_id => TeamResult::Win,
            Some(_) => TeamResult::Loss,
        })
    }

    /// Goals `(scored, conceded)` by one of the two teams
    pub fn goals_of(&self, team_id: TeamId) -> Option<(u32, u32)> {
        if team_id == self.home_team_id {
            Some((self.home_goals, self.away_goals))
        } else if team_id == self.away_team_id {
            Some((self.away_goals, self.home_goals))
        } else {
            None
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_final {
            write!(
                f,
                "{} - {} ({} - {})",
                self.home_team_id, self.away_team_id, self.home_goals, self.away_goals
            )
        } else {
            write!(f, "{} - {}", self.home_team_id, self.away_team_id)
        }
    }
}
