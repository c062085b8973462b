//! League standings: per-team accumulators and the ranked table.
//!
//! This module provides:
//! - Win/draw/loss and goal accumulation per (team, league)
//! - Exactly-once registration of each match result
//! - A total, deterministic ranking (points, goal difference, goals for, team ID)
//! - Configurable point values and administrative deductions
//!
//! ## Example
//!
//! ```
//! use league_engine::fixture::MatchResult;
//! use league_engine::standings::StandingsLedger;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ledger = StandingsLedger::new();
//!
//!     let mut result = MatchResult::league(1, 100, 7, 8, 3, 1);
//!     ledger.apply(100, &mut result).await?;
//!
//!     let table = ledger.table(100).await;
//!     assert_eq!(table[0].row.team_id, 7);
//!     assert_eq!(table[0].points, 3);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod ranking;

pub use config::PointsConfig;
pub use errors::{StandingsError, StandingsResult};
pub use ledger::StandingsLedger;
pub use models::{StandingsRow, TableEntry};
pub use ranking::{compare_rows, rank_rows};
