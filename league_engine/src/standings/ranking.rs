//! Ranking of standings rows.
//!
//! Rows are ordered by points, goal difference and goals scored, all
//! descending, and finally by team ID ascending. The last key makes the order
//! total, so two rows never compare equal unless they belong to the same team.

use super::{config::PointsConfig, models::StandingsRow};
use std::cmp::Ordering;

type CmpFunc = fn(&StandingsRow, &StandingsRow, &PointsConfig) -> Ordering;

fn compare_points(a: &StandingsRow, b: &StandingsRow, config: &PointsConfig) -> Ordering {
    b.points(config).cmp(&a.points(config))
}

fn compare_goal_difference(a: &StandingsRow, b: &StandingsRow, _config: &PointsConfig) -> Ordering {
    b.goal_difference().cmp(&a.goal_difference())
}

fn compare_goals_for(a: &StandingsRow, b: &StandingsRow, _config: &PointsConfig) -> Ordering {
    b.goals_for.cmp(&a.goals_for)
}

fn compare_team_id(a: &StandingsRow, b: &StandingsRow, _config: &PointsConfig) -> Ordering {
    a.team_id.cmp(&b.team_id)
}

/// Tie-breakers in order of priority
const CRITERIA: [CmpFunc; 4] = [
    compare_points,
    compare_goal_difference,
    compare_goals_for,
    compare_team_id,
];

/// Compare two rows; `Less` means `a` ranks above `b`
pub fn compare_rows(a: &StandingsRow, b: &StandingsRow, config: &PointsConfig) -> Ordering {
    CRITERIA
        .iter()
        .map(|criterion| criterion(a, b, config))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Sort rows into table order
pub fn rank_rows(mut rows: Vec<StandingsRow>, config: &PointsConfig) -> Vec<StandingsRow> {
    rows.sort_by(|a, b| compare_rows(a, b, config));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(team_id: i64, wins: u32, draws: u32, goals_for: u64, goals_against: u64) -> StandingsRow {
        StandingsRow {
            wins,
            draws,
            goals_for,
            goals_against,
            ..StandingsRow::new(1, team_id)
        }
    }

    fn ids(rows: &[StandingsRow]) -> Vec<i64> {
        rows.iter().map(|r| r.team_id).collect()
    }

    #[test]
    fn test_points_first() {
        let ranked = rank_rows(
            vec![row(1, 1, 0, 10, 0), row(2, 2, 0, 2, 5)],
            &PointsConfig::default(),
        );
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn test_goal_difference_breaks_points_tie() {
        let ranked = rank_rows(
            vec![row(1, 1, 0, 3, 2), row(2, 1, 0, 3, 0)],
            &PointsConfig::default(),
        );
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn test_goals_for_breaks_difference_tie() {
        let ranked = rank_rows(
            vec![row(1, 1, 0, 2, 1), row(2, 1, 0, 4, 3)],
            &PointsConfig::default(),
        );
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn test_team_id_is_final_tie_break() {
        let ranked = rank_rows(
            vec![row(9, 1, 0, 2, 1), row(3, 1, 0, 2, 1), row(5, 1, 0, 2, 1)],
            &PointsConfig::default(),
        );
        assert_eq!(ids(&ranked), vec![3, 5, 9]);
    }

    #[test]
    fn test_penalty_points_affect_rank() {
        let mut docked = row(1, 2, 0, 5, 0);
        docked.penalty_points = 4;
        let ranked = rank_rows(vec![docked, row(2, 1, 0, 1, 0)], &PointsConfig::default());
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn test_points_config_changes_order() {
        let winner = row(1, 1, 0, 1, 0);
        let drawer = row(2, 0, 3, 3, 3);

        // 3 points each, winner ahead on goal difference
        let three = rank_rows(vec![winner.clone(), drawer.clone()], &PointsConfig::default());
        assert_eq!(ids(&three), vec![1, 2]);

        // 2 points against 3
        let two = rank_rows(vec![winner, drawer], &PointsConfig::two_for_a_win());
        assert_eq!(ids(&two), vec![2, 1]);
    }

    #[test]
    fn test_compare_same_team_is_equal() {
        let a = row(4, 1, 1, 2, 2);
        assert_eq!(compare_rows(&a, &a.clone(), &PointsConfig::default()), Ordering::Equal);
    }
}
