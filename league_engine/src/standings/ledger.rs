//! In-memory standings ledger.
//!
//! Rows live behind per-row mutexes so that applications touching disjoint
//! team pairs run in parallel. Each league also has a snapshot gate: writers
//! hold it shared, `rank` and `table` hold it exclusively while copying rows,
//! which gives them a consistent point-in-time view of the league.

use super::{
    config::PointsConfig,
    errors::{StandingsError, StandingsResult},
    models::{StandingsRow, TableEntry},
    ranking::rank_rows,
};
use crate::fixture::{LeagueId, MatchId, MatchResult, TeamId};
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};
use tokio::sync::{Mutex, RwLock};

type RowHandle = Arc<Mutex<StandingsRow>>;

/// Rows and settings of a single league
struct LeagueBook {
    league_id: LeagueId,
    gate: RwLock<()>,
    rows: RwLock<BTreeMap<TeamId, RowHandle>>,
    points: RwLock<PointsConfig>,
}

impl LeagueBook {
    fn new(league_id: LeagueId, points: PointsConfig) -> Self {
        Self {
            league_id,
            gate: RwLock::new(()),
            rows: RwLock::new(BTreeMap::new()),
            points: RwLock::new(points),
        }
    }

    async fn existing_row(&self, team_id: TeamId) -> Option<RowHandle> {
        self.rows.read().await.get(&team_id).cloned()
    }

    /// Get the row handle, creating an all-zero row on first use
    async fn row(&self, team_id: TeamId) -> RowHandle {
        if let Some(handle) = self.existing_row(team_id).await {
            return handle;
        }

        let mut rows = self.rows.write().await;
        rows.entry(team_id)
            .or_insert_with(|| {
                log::debug!(
                    "Creating standings row for team {} in league {}",
                    team_id,
                    self.league_id
                );
                Arc::new(Mutex::new(StandingsRow::new(self.league_id, team_id)))
            })
            .clone()
    }

    /// Copy every row while no application is in flight
    async fn snapshot(&self) -> Vec<StandingsRow> {
        let _gate = self.gate.write().await;
        let rows = self.rows.read().await;

        let mut snapshot = Vec::with_capacity(rows.len());
        for handle in rows.values() {
            snapshot.push(handle.lock().await.clone());
        }
        snapshot
    }
}

/// Standings ledger
#[derive(Clone)]
pub struct StandingsLedger {
    /// Points used for leagues without an override
    default_points: PointsConfig,

    /// Books by league
    leagues: Arc<RwLock<HashMap<LeagueId, Arc<LeagueBook>>>>,

    /// Matches already counted in some league
    registered: Arc<Mutex<HashSet<MatchId>>>,
}

impl Default for StandingsLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl StandingsLedger {
    /// Create a ledger awarding 3/1/0 points
    pub fn new() -> Self {
        Self {
            default_points: PointsConfig::default(),
            leagues: Arc::new(RwLock::new(HashMap::new())),
            registered: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Create a ledger with a custom default points configuration
    pub fn with_points(points: PointsConfig) -> StandingsResult<Self> {
        points.validate()?;
        Ok(Self {
            default_points: points,
            ..Self::new()
        })
    }

    /// Create a ledger with points read from the environment
    pub fn from_env() -> StandingsResult<Self> {
        Self::with_points(PointsConfig::from_env())
    }

    async fn existing_book(&self, league_id: LeagueId) -> Option<Arc<LeagueBook>> {
        self.leagues.read().await.get(&league_id).cloned()
    }

    async fn book(&self, league_id: LeagueId) -> Arc<LeagueBook> {
        if let Some(book) = self.existing_book(league_id).await {
            return book;
        }

        let mut leagues = self.leagues.write().await;
        leagues
            .entry(league_id)
            .or_insert_with(|| Arc::new(LeagueBook::new(league_id, self.default_points)))
            .clone()
    }

    /// Override the points awarded in one league
    pub async fn configure_points(
        &self,
        league_id: LeagueId,
        points: PointsConfig,
    ) -> StandingsResult<()> {
        points.validate()?;
        let book = self.book(league_id).await;
        *book.points.write().await = points;

        log::info!(
            "League {} now awards {}/{}/{} points",
            league_id,
            points.win,
            points.draw,
            points.loss
        );
        Ok(())
    }

    /// Points configuration in effect for a league
    pub async fn points_config(&self, league_id: LeagueId) -> PointsConfig {
        match self.existing_book(league_id).await {
            Some(book) => *book.points.read().await,
            None => self.default_points,
        }
    }

    /// Whether the match has already been counted
    pub async fn is_registered(&self, match_id: MatchId) -> bool {
        self.registered.lock().await.contains(&match_id)
    }

    /// Count a final match result in the league table.
    ///
    /// Both rows and the match's registration are updated together: either
    /// the whole update happens or nothing changes.
    ///
    /// # Errors
    ///
    /// * `StandingsError::NotFinal` - The match has no final score
    /// * `StandingsError::AlreadyProcessed` - The match was already counted
    /// * `StandingsError::InvalidFixture` - Home and away team are the same
    pub async fn apply(
        &self,
        league_id: LeagueId,
        m: &mut MatchResult,
    ) -> StandingsResult<(StandingsRow, StandingsRow)> {
        if !m.is_final {
            return Err(StandingsError::NotFinal(m.id));
        }

        if m.already_registered || self.is_registered(m.id).await {
            return Err(StandingsError::AlreadyProcessed(m.id));
        }

        if m.home_team_id == m.away_team_id {
            return Err(StandingsError::InvalidFixture(m.id));
        }

        let book = self.book(league_id).await;
        let _gate = book.gate.read().await;

        let home = book.row(m.home_team_id).await;
        let away = book.row(m.away_team_id).await;

        // Lock in ascending team order
        let (mut home_row, mut away_row) = if m.home_team_id < m.away_team_id {
            let h = home.lock().await;
            let a = away.lock().await;
            (h, a)
        } else {
            let a = away.lock().await;
            let h = home.lock().await;
            (h, a)
        };

        let mut next_home = home_row.clone();
        let mut next_away = away_row.clone();
        next_home.record_match(m);
        next_away.record_match(m);

        // A concurrent retry of the same match may have won the race
        if !self.registered.lock().await.insert(m.id) {
            return Err(StandingsError::AlreadyProcessed(m.id));
        }

        *home_row = next_home.clone();
        *away_row = next_away.clone();
        m.already_registered = true;

        log::debug!("League {}: registered match {} ({})", league_id, m.id, m);

        Ok((next_home, next_away))
    }

    /// Apply every final, unregistered match of the slice.
    ///
    /// Matches that are not final are left for a later refresh; matches
    /// another caller registered in the meantime are flagged and skipped.
    ///
    /// # Returns
    ///
    /// * `StandingsResult<usize>` - Number of matches applied
    pub async fn refresh(
        &self,
        league_id: LeagueId,
        matches: &mut [MatchResult],
    ) -> StandingsResult<usize> {
        let mut applied = 0;

        for m in matches.iter_mut() {
            if !m.is_final || m.already_registered {
                continue;
            }

            match self.apply(league_id, m).await {
                Ok(_) => applied += 1,
                Err(StandingsError::AlreadyProcessed(_)) => m.already_registered = true,
                Err(e) => return Err(e),
            }
        }

        if applied > 0 {
            log::info!("League {}: refreshed {} match results", league_id, applied);
        }

        Ok(applied)
    }

    /// Ranked rows of a league; an unknown league ranks as empty
    pub async fn rank(&self, league_id: LeagueId) -> Vec<StandingsRow> {
        let Some(book) = self.existing_book(league_id).await else {
            return Vec::new();
        };

        let rows = book.snapshot().await;
        let points = *book.points.read().await;
        rank_rows(rows, &points)
    }

    /// Ranked table with positions and computed points
    pub async fn table(&self, league_id: LeagueId) -> Vec<TableEntry> {
        let points = self.points_config(league_id).await;
        TableEntry::from_ranked(self.rank(league_id).await, &points)
    }

    /// Current row of one team
    ///
    /// # Errors
    ///
    /// * `StandingsError::NotFound` - The team has no row in this league yet
    pub async fn standings_of(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
    ) -> StandingsResult<StandingsRow> {
        let not_found = || StandingsError::NotFound { league_id, team_id };

        let book = self.existing_book(league_id).await.ok_or_else(not_found)?;
        let handle = book.existing_row(team_id).await.ok_or_else(not_found)?;

        let row = handle.lock().await.clone();
        Ok(row)
    }

    /// Deduct points from a team as an administrative sanction
    pub async fn deduct_points(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
        points: u32,
    ) -> StandingsResult<StandingsRow> {
        let book = self.book(league_id).await;
        let _gate = book.gate.read().await;

        let handle = book.row(team_id).await;
        let mut row = handle.lock().await;
        row.penalty_points += points;

        log::info!(
            "League {}: deducted {} points from team {} (total deduction {})",
            league_id,
            points,
            team_id,
            row.penalty_points
        );

        Ok(row.clone())
    }

    /// Load rows persisted elsewhere, replacing rows of the same team.
    ///
    /// A replaced row is overwritten in place while the league's gate is
    /// held exclusively, so an application either completes before the load
    /// or runs against the loaded row.
    pub async fn load_rows<I>(&self, rows: I) -> usize
    where
        I: IntoIterator<Item = StandingsRow>,
    {
        let mut loaded = 0;

        for row in rows {
            let book = self.book(row.league_id).await;
            let _gate = book.gate.write().await;

            let existing = book.existing_row(row.team_id).await;
            match existing {
                Some(handle) => *handle.lock().await = row,
                None => {
                    book.rows
                        .write()
                        .await
                        .insert(row.team_id, Arc::new(Mutex::new(row)));
                }
            }
            loaded += 1;
        }

        loaded
    }

    /// Record matches counted elsewhere so they are never applied again
    pub async fn mark_registered<I>(&self, match_ids: I)
    where
        I: IntoIterator<Item = MatchId>,
    {
        self.registered.lock().await.extend(match_ids);
    }
}
