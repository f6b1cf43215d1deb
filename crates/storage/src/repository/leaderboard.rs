use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::{Result, StorageError};
use crate::models::{LeaderboardRow, NewLeaderboardRow};

/// Rows per INSERT statement; 7 binds per row keeps each statement well
/// under the Postgres limit of 65535 bind parameters.
const INSERT_BATCH_SIZE: usize = 1000;

/// Repository for leaderboard database operations
pub struct LeaderboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeaderboardRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Deletes every row of `season` and inserts `rows` in one transaction.
    ///
    /// Imports of the same season are serialized with a transaction-scoped
    /// advisory lock. If any statement fails the transaction is dropped
    /// without commit and readers keep seeing the previous rows.
    pub async fn replace_season(&self, season: &str, rows: &[NewLeaderboardRow]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(season)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM leaderboard WHERE season = $1")
            .bind(season)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut inserted = 0;
        for chunk in rows.chunks(INSERT_BATCH_SIZE) {
            let mut query = QueryBuilder::<Postgres>::new(
                "INSERT INTO leaderboard (season, username, display_name, prize, bet, rank, created_at_utc) ",
            );
            query.push_values(chunk, |mut b, row| {
                b.push_bind(season)
                    .push_bind(&row.username)
                    .push_bind(&row.display_name)
                    .push_bind(row.prize)
                    .push_bind(row.bet)
                    .push_bind(row.rank)
                    .push_bind(row.created_at_utc);
            });

            inserted += query
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| StorageError::from(e).for_season(season))?
                .rows_affected();
        }

        tx.commit().await?;

        tracing::debug!(season, deleted, inserted, "Replaced season rows");

        Ok(inserted)
    }

    /// Season of the most recently created row, if any row exists.
    pub async fn latest_season(&self) -> Result<Option<String>> {
        let season = sqlx::query_scalar::<_, String>(
            r#"
            SELECT season
            FROM leaderboard
            ORDER BY created_at_utc DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(season)
    }

    /// All rows of a season ordered by rank.
    pub async fn find_by_season(&self, season: &str) -> Result<Vec<LeaderboardRow>> {
        let rows = sqlx::query_as::<_, LeaderboardRow>(
            r#"
            SELECT id, season, username, display_name, prize, bet, rank, created_at_utc
            FROM leaderboard
            WHERE season = $1
            ORDER BY rank ASC
            "#,
        )
        .bind(season)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
