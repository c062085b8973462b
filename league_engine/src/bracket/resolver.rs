//! Knockout tie resolution.

use super::{
    errors::{BracketError, BracketResult, UnresolvedReason},
    models::{AggregateScore, BracketOutcome, BracketTie, Decider, TieFormat},
};
use crate::fixture::{MatchResult, TeamId};
use std::cmp::Ordering;

/// Decides which team of a knockout tie advances.
///
/// Resolution is a pure function of the tie: resolving the same tie twice
/// gives the same outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketResolver;

impl BracketResolver {
    pub fn new() -> Self {
        Self
    }

    /// Goals per team over the tie.
    ///
    /// The two legs swap home and away, so goals are summed per team rather
    /// than per home/away slot.
    ///
    /// # Errors
    ///
    /// * `BracketError::InvalidTiePairing` - Missing second leg, or legs that
    ///   do not pair the same two teams with home and away swapped
    /// * `BracketError::Unresolved` - A leg has no final score
    pub fn aggregate(&self, tie: &BracketTie) -> BracketResult<AggregateScore> {
        let first = &tie.first_leg;

        if first.home_team_id == first.away_team_id {
            return Err(BracketError::InvalidTiePairing(format!(
                "match {} pairs team {} against itself",
                first.id, first.home_team_id
            )));
        }

        let second = match tie.format {
            TieFormat::SingleLeg => None,
            TieFormat::TwoLegged => {
                let second = tie.second_leg.as_ref().ok_or_else(|| {
                    BracketError::InvalidTiePairing(format!(
                        "two-legged tie starting with match {} has no second leg",
                        first.id
                    ))
                })?;

                if second.home_team_id != first.away_team_id
                    || second.away_team_id != first.home_team_id
                {
                    return Err(BracketError::InvalidTiePairing(format!(
                        "match {} ({} - {}) is not the return leg of match {} ({} - {})",
                        second.id,
                        second.home_team_id,
                        second.away_team_id,
                        first.id,
                        first.home_team_id,
                        first.away_team_id
                    )));
                }

                Some(second)
            }
        };

        ensure_final(first)?;
        if let Some(second) = second {
            ensure_final(second)?;
        }

        let (first_team_goals, second_team_goals) = match second {
            None => (u64::from(first.home_goals), u64::from(first.away_goals)),
            Some(second) => (
                u64::from(first.home_goals) + u64::from(second.away_goals),
                u64::from(first.away_goals) + u64::from(second.home_goals),
            ),
        };

        Ok(AggregateScore {
            first_team_id: first.home_team_id,
            first_team_goals,
            second_team_id: first.away_team_id,
            second_team_goals,
        })
    }

    /// Decide the advancing team.
    ///
    /// Level scores go to the penalty shootout; a tie with no shootout or a
    /// level shootout is `Unresolved` and is never defaulted to either team.
    pub fn resolve(&self, tie: &BracketTie) -> BracketResult<BracketOutcome> {
        let aggregate = self.aggregate(tie)?;

        let decided_by = match tie.format {
            TieFormat::SingleLeg => Decider::Score,
            TieFormat::TwoLegged => Decider::Aggregate,
        };

        let outcome = match aggregate
            .first_team_goals
            .cmp(&aggregate.second_team_goals)
        {
            Ordering::Greater => first_team_through(aggregate, decided_by),
            Ordering::Less => second_team_through(aggregate, decided_by),
            Ordering::Equal => self.by_penalties(tie, aggregate)?,
        };

        log::debug!(
            "Tie {} - {} decided by {:?}: team {} advances",
            aggregate.first_team_id,
            aggregate.second_team_id,
            outcome.decided_by,
            outcome.advancing_team_id
        );

        Ok(outcome)
    }

    fn by_penalties(
        &self,
        tie: &BracketTie,
        aggregate: AggregateScore,
    ) -> BracketResult<BracketOutcome> {
        let shootout = tie
            .shootout
            .ok_or(BracketError::Unresolved(UnresolvedReason::NoShootout))?;

        match shootout.first_leg_home.cmp(&shootout.first_leg_away) {
            Ordering::Greater => Ok(first_team_through(aggregate, Decider::Penalties)),
            Ordering::Less => Ok(second_team_through(aggregate, Decider::Penalties)),
            Ordering::Equal => Err(BracketError::Unresolved(
                UnresolvedReason::LevelShootout {
                    penalties: shootout.first_leg_home,
                },
            )),
        }
    }

    /// Team advancing from the tie, if it can be decided
    pub fn advancing_team(&self, tie: &BracketTie) -> BracketResult<TeamId> {
        self.resolve(tie).map(|outcome| outcome.advancing_team_id)
    }
}

fn ensure_final(leg: &MatchResult) -> BracketResult<()> {
    if leg.is_final {
        Ok(())
    } else {
        Err(BracketError::Unresolved(UnresolvedReason::LegNotFinal {
            match_id: leg.id,
        }))
    }
}

fn first_team_through(aggregate: AggregateScore, decided_by: Decider) -> BracketOutcome {
    BracketOutcome {
        advancing_team_id: aggregate.first_team_id,
        eliminated_team_id: aggregate.second_team_id,
        decided_by,
        aggregate,
    }
}

fn second_team_through(aggregate: AggregateScore, decided_by: Decider) -> BracketOutcome {
    BracketOutcome {
        advancing_team_id: aggregate.second_team_id,
        eliminated_team_id: aggregate.first_team_id,
        decided_by,
        aggregate,
    }
}
