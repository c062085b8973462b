//! Knockout ("cup") tie resolution.
//!
//! This module decides which team advances from a single-leg or two-legged
//! tie:
//! - Single leg: the higher score wins
//! - Two legs: goals are aggregated per team across both legs
//! - Level ties go to an explicitly recorded penalty shootout
//! - No shootout, or a level shootout, leaves the tie unresolved
//!
//! ## Example
//!
//! ```
//! use league_engine::bracket::{BracketResolver, BracketTie};
//! use league_engine::fixture::MatchResult;
//!
//! let first = MatchResult::knockout(1, 1, 10, 20, 2, 1);
//! let second = MatchResult::knockout(2, 1, 20, 10, 1, 1);
//! let tie = BracketTie::two_legged(first, second);
//!
//! let outcome = BracketResolver::new().resolve(&tie).unwrap();
//! assert_eq!(outcome.advancing_team_id, 10);
//! ```

pub mod errors;
pub mod models;
pub mod resolver;

pub use errors::{BracketError, BracketResult, UnresolvedReason};
pub use models::{AggregateScore, BracketOutcome, BracketTie, Decider, Shootout, TieFormat};
pub use resolver::BracketResolver;
