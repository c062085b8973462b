//! Match results and competition metadata shared by the standings ledger and
//! the bracket resolver.
//!
//! A single [`MatchResult`] type serves both league play and knockout play;
//! the [`MatchContext`] tag records which component consumes it.

pub mod models;
pub mod season;

pub use models::{
    CupId, LeagueId, MatchContext, MatchId, MatchResult, Outcome, PlayerId, TeamId, TeamResult,
};
pub use season::{Season, SeasonError};
