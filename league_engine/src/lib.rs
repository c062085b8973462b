//! # League Engine
//!
//! Competition-result resolution for a football league backend.
//!
//! The crate turns final match results into two kinds of competition
//! outcome:
//!
//! - **League standings**: one accumulator row per (team, league), updated
//!   exactly once per match, and a table ranked by points, goal difference,
//!   goals scored and finally team ID.
//! - **Knockout ties**: the advancing team of a single-leg or two-legged tie,
//!   decided on score, on aggregate, or by an explicitly recorded penalty
//!   shootout.
//!
//! Persistence, scheduling and presentation belong to the surrounding
//! application. The [`db`] module ships a PostgreSQL store that applies each
//! result in one transaction.
//!
//! ## Core Modules
//!
//! - [`fixture`]: Match results, outcomes, seasons
//! - [`standings`]: Standings ledger, ranking, point values
//! - [`bracket`]: Knockout tie resolution
//! - [`scorers`]: Top scorers table
//! - [`db`]: PostgreSQL connection pool and standings store
//!
//! ## Example
//!
//! ```
//! use league_engine::{BracketResolver, BracketTie, MatchResult, StandingsLedger};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ledger = StandingsLedger::new();
//!     let mut result = MatchResult::league(1, 1, 10, 20, 3, 1);
//!     let (home, away) = ledger.apply(1, &mut result).await?;
//!     assert_eq!(home.wins, 1);
//!     assert_eq!(away.losses, 1);
//!
//!     let tie = BracketTie::single_leg(MatchResult::knockout(2, 1, 10, 20, 1, 1))
//!         .with_shootout(5, 4);
//!     assert_eq!(BracketResolver::new().advancing_team(&tie)?, 10);
//!
//!     Ok(())
//! }
//! ```

/// Knockout tie resolution.
pub mod bracket;
pub use bracket::{BracketError, BracketOutcome, BracketResolver, BracketTie};

/// PostgreSQL persistence.
pub mod db;

/// Match results shared by both components.
pub mod fixture;
pub use fixture::{LeagueId, MatchId, MatchResult, TeamId};

/// Top scorers.
pub mod scorers;

/// League standings.
pub mod standings;
pub use standings::{PointsConfig, StandingsError, StandingsLedger, StandingsRow};
