//! Knockout tie resolution scenarios

use league_engine::bracket::{
    BracketError, BracketResolver, BracketTie, Decider, UnresolvedReason,
};
use league_engine::fixture::MatchResult;

const CUP: i64 = 7;
const A: i64 = 10;
const B: i64 = 20;

fn resolver() -> BracketResolver {
    BracketResolver::new()
}

#[test]
fn test_two_legged_aggregate_winner() {
    // A 2-1 B, then B 1-1 A: A through 3-2 on aggregate
    let tie = BracketTie::two_legged(
        MatchResult::knockout(1, CUP, A, B, 2, 1),
        MatchResult::knockout(2, CUP, B, A, 1, 1),
    );

    let outcome = resolver().resolve(&tie).unwrap();
    assert_eq!(outcome.advancing_team_id, A);
    assert_eq!(outcome.eliminated_team_id, B);
    assert_eq!(outcome.decided_by, Decider::Aggregate);
    assert_eq!(outcome.aggregate.first_team_goals, 3);
    assert_eq!(outcome.aggregate.second_team_goals, 2);
}

#[test]
fn test_away_side_of_first_leg_can_advance() {
    // A 0-1 B, then B 2-2 A: B through 3-2
    let tie = BracketTie::two_legged(
        MatchResult::knockout(1, CUP, A, B, 0, 1),
        MatchResult::knockout(2, CUP, B, A, 2, 2),
    );
    assert_eq!(resolver().advancing_team(&tie).unwrap(), B);
}

#[test]
fn test_level_aggregate_decided_on_penalties() {
    // 1-1 and 1-1, shootout 5-4 to the first leg's home team
    let tie = BracketTie::two_legged(
        MatchResult::knockout(1, CUP, A, B, 1, 1),
        MatchResult::knockout(2, CUP, B, A, 1, 1),
    )
    .with_shootout(5, 4);

    let outcome = resolver().resolve(&tie).unwrap();
    assert_eq!(outcome.advancing_team_id, A);
    assert_eq!(outcome.decided_by, Decider::Penalties);
    assert!(outcome.aggregate.is_level());
}

#[test]
fn test_shootout_won_by_first_leg_away_team() {
    let tie = BracketTie::two_legged(
        MatchResult::knockout(1, CUP, A, B, 0, 0),
        MatchResult::knockout(2, CUP, B, A, 0, 0),
    )
    .with_shootout(2, 4);

    assert_eq!(resolver().advancing_team(&tie).unwrap(), B);
}

#[test]
fn test_level_shootout_is_unresolved() {
    let tie = BracketTie::single_leg(MatchResult::knockout(1, CUP, A, B, 2, 2)).with_shootout(3, 3);

    assert_eq!(
        resolver().resolve(&tie),
        Err(BracketError::Unresolved(UnresolvedReason::LevelShootout {
            penalties: 3
        }))
    );
}

#[test]
fn test_level_aggregate_with_level_shootout_is_unresolved() {
    // 1-1 and 1-1, shootout 3-3
    let tie = BracketTie::two_legged(
        MatchResult::knockout(1, CUP, A, B, 1, 1),
        MatchResult::knockout(2, CUP, B, A, 1, 1),
    )
    .with_shootout(3, 3);

    assert_eq!(
        resolver().resolve(&tie),
        Err(BracketError::Unresolved(UnresolvedReason::LevelShootout {
            penalties: 3
        }))
    );
    assert!(resolver().aggregate(&tie).unwrap().is_level());
}

#[test]
fn test_aggregate_past_single_score_range() {
    let tie = BracketTie::two_legged(
        MatchResult::knockout(1, CUP, A, B, u32::MAX, 0),
        MatchResult::knockout(2, CUP, B, A, 0, 1),
    );

    let outcome = resolver().resolve(&tie).unwrap();
    assert_eq!(outcome.advancing_team_id, A);
    assert_eq!(outcome.aggregate.first_team_goals, u64::from(u32::MAX) + 1);
}

#[test]
fn test_single_leg_draw_without_shootout_is_unresolved() {
    let tie = BracketTie::single_leg(MatchResult::knockout(1, CUP, A, B, 1, 1));

    assert_eq!(
        resolver().advancing_team(&tie),
        Err(BracketError::Unresolved(UnresolvedReason::NoShootout))
    );
}

#[test]
fn test_single_leg_ignores_shootout_when_decided() {
    let tie = BracketTie::single_leg(MatchResult::knockout(1, CUP, A, B, 0, 1)).with_shootout(9, 0);

    let outcome = resolver().resolve(&tie).unwrap();
    assert_eq!(outcome.advancing_team_id, B);
    assert_eq!(outcome.decided_by, Decider::Score);
}

#[test]
fn test_pending_second_leg_is_unresolved() {
    let tie = BracketTie::two_legged(
        MatchResult::knockout(1, CUP, A, B, 3, 0),
        MatchResult::knockout(2, CUP, B, A, 0, 0).pending(),
    );

    assert_eq!(
        resolver().resolve(&tie),
        Err(BracketError::Unresolved(UnresolvedReason::LegNotFinal {
            match_id: 2
        }))
    );
}

#[test]
fn test_mismatched_legs_are_rejected() {
    let tie = BracketTie::two_legged(
        MatchResult::knockout(1, CUP, A, B, 1, 0),
        MatchResult::knockout(2, CUP, 30, A, 0, 0),
    );
    assert!(matches!(
        resolver().resolve(&tie),
        Err(BracketError::InvalidTiePairing(_))
    ));

    // Same home team twice is not a return leg
    let tie = BracketTie::two_legged(
        MatchResult::knockout(1, CUP, A, B, 1, 0),
        MatchResult::knockout(2, CUP, A, B, 0, 0),
    );
    assert!(matches!(
        resolver().resolve(&tie),
        Err(BracketError::InvalidTiePairing(_))
    ));
}

#[test]
fn test_resolution_is_repeatable() {
    let tie = BracketTie::two_legged(
        MatchResult::knockout(1, CUP, A, B, 2, 3),
        MatchResult::knockout(2, CUP, B, A, 0, 1),
    )
    .with_shootout(4, 2);

    let first = resolver().resolve(&tie);
    for _ in 0..5 {
        assert_eq!(resolver().resolve(&tie), first);
    }
    assert_eq!(first.unwrap().advancing_team_id, A);
}

#[test]
fn test_outcome_serializes() {
    let tie = BracketTie::single_leg(MatchResult::knockout(1, CUP, A, B, 2, 0));
    let outcome = resolver().resolve(&tie).unwrap();

    let json = serde_json::to_value(outcome).unwrap();
    assert_eq!(json["advancing_team_id"], A);
    assert_eq!(json["decided_by"], "score");
}
