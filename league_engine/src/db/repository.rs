//! Standings store abstraction and its PostgreSQL implementation.
//!
//! [`StandingsStore`] is implemented both by the in-memory
//! [`StandingsLedger`] and by [`PgStandingsRepository`], so orchestration code
//! can be written once and tested without a database.
#![allow(clippy::needless_raw_string_hashes)]

use super::timeouts::{DEFAULT_TRANSACTION_TIMEOUT, with_deadline, with_query_deadline};
use crate::fixture::{LeagueId, MatchContext, MatchId, MatchResult, TeamId};
use crate::standings::{
    PointsConfig, StandingsError, StandingsLedger, StandingsResult, StandingsRow, TableEntry,
    rank_rows,
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow};
use std::sync::Arc;

/// Trait for standings store operations
#[async_trait]
pub trait StandingsStore: Send + Sync {
    /// Count a final match result exactly once
    async fn apply(
        &self,
        league_id: LeagueId,
        m: &mut MatchResult,
    ) -> StandingsResult<(StandingsRow, StandingsRow)>;

    /// Rows of a league in table order
    async fn rank(&self, league_id: LeagueId) -> StandingsResult<Vec<StandingsRow>>;

    /// Current row of one team
    async fn standings_of(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
    ) -> StandingsResult<StandingsRow>;

    /// Administrative points deduction
    async fn deduct_points(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
        points: u32,
    ) -> StandingsResult<StandingsRow>;

    /// Points configuration in effect for a league
    async fn points_config(&self, league_id: LeagueId) -> StandingsResult<PointsConfig>;

    /// Ranked table with positions and computed points
    async fn table(&self, league_id: LeagueId) -> StandingsResult<Vec<TableEntry>> {
        let points = self.points_config(league_id).await?;
        Ok(TableEntry::from_ranked(self.rank(league_id).await?, &points))
    }
}

#[async_trait]
impl StandingsStore for StandingsLedger {
    async fn apply(
        &self,
        league_id: LeagueId,
        m: &mut MatchResult,
    ) -> StandingsResult<(StandingsRow, StandingsRow)> {
        StandingsLedger::apply(self, league_id, m).await
    }

    async fn rank(&self, league_id: LeagueId) -> StandingsResult<Vec<StandingsRow>> {
        Ok(StandingsLedger::rank(self, league_id).await)
    }

    async fn standings_of(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
    ) -> StandingsResult<StandingsRow> {
        StandingsLedger::standings_of(self, league_id, team_id).await
    }

    async fn deduct_points(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
        points: u32,
    ) -> StandingsResult<StandingsRow> {
        StandingsLedger::deduct_points(self, league_id, team_id, points).await
    }

    async fn points_config(&self, league_id: LeagueId) -> StandingsResult<PointsConfig> {
        Ok(StandingsLedger::points_config(self, league_id).await)
    }
}

const ROW_COLUMNS: &str =
    "league_id, team_id, wins, draws, losses, goals_for, goals_against, penalty_points";

fn row_from(row: &PgRow) -> StandingsRow {
    StandingsRow {
        league_id: row.get("league_id"),
        team_id: row.get("team_id"),
        wins: row.get::<i32, _>("wins") as u32,
        draws: row.get::<i32, _>("draws") as u32,
        losses: row.get::<i32, _>("losses") as u32,
        goals_for: row.get::<i64, _>("goals_for") as u64,
        goals_against: row.get::<i64, _>("goals_against") as u64,
        penalty_points: row.get::<i32, _>("penalty_points") as u32,
    }
}

fn match_from(row: &PgRow) -> MatchResult {
    let context = match row.get::<Option<i64>, _>("league_id") {
        Some(league_id) => MatchContext::LeagueFixture {
            league_id,
            round: row.get::<Option<i32>, _>("round").map(|r| r as u32),
        },
        None => MatchContext::KnockoutLeg {
            cup_id: row.get::<Option<i64>, _>("cup_id").unwrap_or_default(),
        },
    };

    MatchResult {
        id: row.get("id"),
        home_team_id: row.get("home_team_id"),
        away_team_id: row.get("away_team_id"),
        home_goals: row.get::<i64, _>("home_goals") as u32,
        away_goals: row.get::<i64, _>("away_goals") as u32,
        is_final: row.get("is_final"),
        already_registered: row.get("already_registered"),
        technical: row.get("technical"),
        context,
    }
}

fn same_result(stored: &MatchResult, m: &MatchResult) -> bool {
    stored.home_team_id == m.home_team_id
        && stored.away_team_id == m.away_team_id
        && stored.home_goals == m.home_goals
        && stored.away_goals == m.away_goals
}

/// PostgreSQL implementation of `StandingsStore`
#[derive(Clone)]
pub struct PgStandingsRepository {
    pool: Arc<PgPool>,
    default_points: PointsConfig,
}

impl PgStandingsRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            default_points: PointsConfig::from_env(),
        }
    }

    /// Repository awarding the given points in leagues without an override
    pub fn with_points(pool: Arc<PgPool>, default_points: PointsConfig) -> Self {
        Self {
            pool,
            default_points,
        }
    }

    /// Lock a standings row for the rest of the transaction, creating it first
    /// if the team has none yet
    async fn lock_row(
        tx: &mut Transaction<'_, Postgres>,
        league_id: LeagueId,
        team_id: TeamId,
    ) -> StandingsResult<()> {
        sqlx::query(
            "INSERT INTO standings (league_id, team_id) VALUES ($1, $2)
             ON CONFLICT (league_id, team_id) DO NOTHING",
        )
        .bind(league_id)
        .bind(team_id)
        .execute(&mut **tx)
        .await?;

        sqlx::query("SELECT team_id FROM standings WHERE league_id = $1 AND team_id = $2 FOR UPDATE")
            .bind(league_id)
            .bind(team_id)
            .fetch_one(&mut **tx)
            .await?;

        Ok(())
    }

    /// Add the match to one team's row
    async fn record(
        tx: &mut Transaction<'_, Postgres>,
        league_id: LeagueId,
        team_id: TeamId,
        m: &MatchResult,
    ) -> StandingsResult<StandingsRow> {
        let mut delta = StandingsRow::new(league_id, team_id);
        if !delta.record_match(m) {
            return Err(StandingsError::InvalidFixture(m.id));
        }

        let row = sqlx::query(&format!(
            "UPDATE standings
             SET wins = wins + $3, draws = draws + $4, losses = losses + $5,
                 goals_for = goals_for + $6, goals_against = goals_against + $7,
                 updated_at = NOW()
             WHERE league_id = $1 AND team_id = $2
             RETURNING {ROW_COLUMNS}"
        ))
        .bind(league_id)
        .bind(team_id)
        .bind(delta.wins as i32)
        .bind(delta.draws as i32)
        .bind(delta.losses as i32)
        .bind(delta.goals_for as i64)
        .bind(delta.goals_against as i64)
        .fetch_one(&mut **tx)
        .await?;

        Ok(row_from(&row))
    }

    async fn apply_in_transaction(
        &self,
        league_id: LeagueId,
        m: &MatchResult,
    ) -> StandingsResult<(StandingsRow, StandingsRow)> {
        let mut tx = self.pool.begin().await?;

        // The match row is the idempotency key; lock it first
        let stored = sqlx::query(
            r#"
            SELECT id, league_id, cup_id, round, home_team_id, away_team_id, home_goals,
                   away_goals, is_final, already_registered, technical
            FROM matches
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(m.id)
        .fetch_optional(&mut *tx)
        .await?
        .map(|row| match_from(&row))
        .ok_or(StandingsError::MatchNotFound(m.id))?;

        if !stored.is_final {
            return Err(StandingsError::NotFinal(m.id));
        }

        if stored.already_registered {
            return Err(StandingsError::AlreadyProcessed(m.id));
        }

        if !same_result(&stored, m) || stored.league_id() != Some(league_id) {
            log::warn!(
                "Match {} does not match its stored result ({}), rejecting",
                m.id,
                stored
            );
            return Err(StandingsError::InvalidFixture(m.id));
        }

        // Count the stored result from here on
        let m = &stored;

        // Lock in ascending team order
        let mut teams = [m.home_team_id, m.away_team_id];
        teams.sort_unstable();
        for team_id in teams {
            Self::lock_row(&mut tx, league_id, team_id).await?;
        }

        let home = Self::record(&mut tx, league_id, m.home_team_id, m).await?;
        let away = Self::record(&mut tx, league_id, m.away_team_id, m).await?;

        sqlx::query("UPDATE matches SET already_registered = TRUE WHERE id = $1")
            .bind(m.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((home, away))
    }

    fn points_from(&self, config: Option<serde_json::Value>) -> StandingsResult<PointsConfig> {
        match config {
            Some(config) => Ok(serde_json::from_value(config)?),
            None => Ok(self.default_points),
        }
    }

    /// Ranked rows together with the points configuration they were ranked
    /// under, both read by one statement
    async fn ranked_snapshot(
        &self,
        league_id: LeagueId,
    ) -> StandingsResult<(Vec<StandingsRow>, PointsConfig)> {
        let rows = with_query_deadline(async {
            let rows = sqlx::query(&format!(
                "SELECT {ROW_COLUMNS},
                        (SELECT config FROM league_points lp WHERE lp.league_id = standings.league_id)
                            AS config
                 FROM standings
                 WHERE league_id = $1"
            ))
            .bind(league_id)
            .fetch_all(self.pool.as_ref())
            .await?;
            Ok::<_, StandingsError>(rows)
        })
        .await?;

        let config = rows
            .first()
            .and_then(|row| row.get::<Option<serde_json::Value>, _>("config"));
        let points = self.points_from(config)?;

        Ok((rank_rows(rows.iter().map(row_from).collect(), &points), points))
    }

    /// Override the points awarded in one league
    pub async fn configure_points(
        &self,
        league_id: LeagueId,
        points: PointsConfig,
    ) -> StandingsResult<()> {
        points.validate()?;
        let config_json = serde_json::to_value(points)?;

        sqlx::query(
            r#"
            INSERT INTO league_points (league_id, config)
            VALUES ($1, $2)
            ON CONFLICT (league_id) DO UPDATE SET config = EXCLUDED.config
            "#,
        )
        .bind(league_id)
        .bind(config_json)
        .execute(self.pool.as_ref())
        .await?;

        log::info!("League {} points configuration updated", league_id);
        Ok(())
    }

    /// Final league matches not yet counted in the standings
    pub async fn pending_matches(&self, league_id: LeagueId) -> StandingsResult<Vec<MatchResult>> {
        let rows = sqlx::query(
            r#"
            SELECT id, league_id, cup_id, round, home_team_id, away_team_id, home_goals,
                   away_goals, is_final, already_registered, technical
            FROM matches
            WHERE league_id = $1 AND is_final AND NOT already_registered
            ORDER BY id
            "#,
        )
        .bind(league_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(match_from).collect())
    }

    /// Count every pending final match of the league
    ///
    /// # Returns
    ///
    /// * `StandingsResult<usize>` - Number of matches applied
    pub async fn refresh(&self, league_id: LeagueId) -> StandingsResult<usize> {
        let mut applied = 0;

        for mut m in self.pending_matches(league_id).await? {
            match StandingsStore::apply(self, league_id, &mut m).await {
                Ok(_) => applied += 1,
                Err(StandingsError::AlreadyProcessed(id)) => {
                    log::debug!("Match {} registered concurrently, skipping", id);
                }
                Err(e) => return Err(e),
            }
        }

        if applied > 0 {
            log::info!("League {}: refreshed {} match results", league_id, applied);
        }

        Ok(applied)
    }

    /// Whether the match has already been counted
    pub async fn is_registered(&self, match_id: MatchId) -> StandingsResult<bool> {
        let row = sqlx::query("SELECT already_registered FROM matches WHERE id = $1")
            .bind(match_id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(StandingsError::MatchNotFound(match_id))?;

        Ok(row.get("already_registered"))
    }
}

#[async_trait]
impl StandingsStore for PgStandingsRepository {
    async fn apply(
        &self,
        league_id: LeagueId,
        m: &mut MatchResult,
    ) -> StandingsResult<(StandingsRow, StandingsRow)> {
        if !m.is_final {
            return Err(StandingsError::NotFinal(m.id));
        }

        if m.already_registered {
            return Err(StandingsError::AlreadyProcessed(m.id));
        }

        if m.home_team_id == m.away_team_id {
            return Err(StandingsError::InvalidFixture(m.id));
        }

        let rows = with_deadline(
            DEFAULT_TRANSACTION_TIMEOUT,
            self.apply_in_transaction(league_id, m),
        )
        .await?;

        m.already_registered = true;
        log::debug!("League {}: registered match {} ({})", league_id, m.id, m);

        Ok(rows)
    }

    async fn rank(&self, league_id: LeagueId) -> StandingsResult<Vec<StandingsRow>> {
        let (rows, _) = self.ranked_snapshot(league_id).await?;
        Ok(rows)
    }

    async fn table(&self, league_id: LeagueId) -> StandingsResult<Vec<TableEntry>> {
        let (rows, points) = self.ranked_snapshot(league_id).await?;
        Ok(TableEntry::from_ranked(rows, &points))
    }

    async fn standings_of(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
    ) -> StandingsResult<StandingsRow> {
        let row = sqlx::query(&format!(
            "SELECT {ROW_COLUMNS} FROM standings WHERE league_id = $1 AND team_id = $2"
        ))
        .bind(league_id)
        .bind(team_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(StandingsError::NotFound { league_id, team_id })?;

        Ok(row_from(&row))
    }

    async fn deduct_points(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
        points: u32,
    ) -> StandingsResult<StandingsRow> {
        let row = sqlx::query(&format!(
            "INSERT INTO standings (league_id, team_id, penalty_points) VALUES ($1, $2, $3)
             ON CONFLICT (league_id, team_id)
             DO UPDATE SET
                penalty_points = standings.penalty_points + EXCLUDED.penalty_points,
                updated_at = NOW()
             RETURNING {ROW_COLUMNS}"
        ))
        .bind(league_id)
        .bind(team_id)
        .bind(points as i32)
        .fetch_one(self.pool.as_ref())
        .await?;

        log::info!(
            "League {}: deducted {} points from team {}",
            league_id,
            points,
            team_id
        );

        Ok(row_from(&row))
    }

    async fn points_config(&self, league_id: LeagueId) -> StandingsResult<PointsConfig> {
        let config = sqlx::query("SELECT config FROM league_points WHERE league_id = $1")
            .bind(league_id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .map(|row| row.get("config"));

        self.points_from(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn play_round<S: StandingsStore + ?Sized>(
        store: &S,
        league_id: LeagueId,
        matches: &mut [MatchResult],
    ) -> StandingsResult<usize> {
        let mut applied = 0;
        for m in matches.iter_mut() {
            match store.apply(league_id, m).await {
                Ok(_) => applied += 1,
                Err(e) if e.is_already_processed() => {}
                Err(e) => return Err(e),
            }
        }
        Ok(applied)
    }

    #[tokio::test]
    async fn test_ledger_through_store_trait() {
        let ledger = StandingsLedger::new();
        let store: &dyn StandingsStore = &ledger;

        let mut matches = vec![
            MatchResult::league(1, 1, 10, 20, 2, 0),
            MatchResult::league(2, 1, 30, 10, 1, 1),
        ];
        assert_eq!(play_round(store, 1, &mut matches).await.unwrap(), 2);
        assert_eq!(play_round(store, 1, &mut matches).await.unwrap(), 0);

        let table = store.table(1).await.unwrap();
        assert_eq!(table[0].row.team_id, 10);
        assert_eq!(table[0].points, 4);
        assert_eq!(table.len(), 3);
    }

    #[tokio::test]
    async fn test_store_trait_deduction_and_lookup() {
        let ledger = StandingsLedger::new();
        let store: &dyn StandingsStore = &ledger;

        store.deduct_points(1, 10, 2).await.unwrap();
        let row = store.standings_of(1, 10).await.unwrap();
        assert_eq!(row.penalty_points, 2);
        assert!(store.standings_of(1, 99).await.is_err());
        assert_eq!(store.points_config(1).await.unwrap(), PointsConfig::default());
    }
}
