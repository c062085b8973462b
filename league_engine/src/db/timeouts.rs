//! Deadlines for standings transactions.
//!
//! A transaction future dropped at its deadline drops its `sqlx::Transaction`,
//! which rolls back and releases every row lock it held.

use crate::standings::{StandingsError, StandingsResult};
use std::time::Duration;
use tokio::time::timeout;

/// Default timeout for single queries (5 seconds)
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Default timeout for transactions (10 seconds)
pub const DEFAULT_TRANSACTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Run a standings operation, failing with `StandingsError::Timeout` once the
/// duration has passed
pub async fn with_deadline<F, T>(duration: Duration, future: F) -> StandingsResult<T>
where
    F: std::future::Future<Output = StandingsResult<T>>,
{
    match timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(StandingsError::Timeout(duration)),
    }
}

/// Run a standings query with the default query timeout
pub async fn with_query_deadline<F, T>(future: F) -> StandingsResult<T>
where
    F: std::future::Future<Output = StandingsResult<T>>,
{
    with_deadline(DEFAULT_QUERY_TIMEOUT, future).await
}
