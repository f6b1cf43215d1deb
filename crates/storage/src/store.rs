use async_trait::async_trait;

use crate::Database;
use crate::error::Result;
use crate::models::{LeaderboardRow, NewLeaderboardRow};
use crate::repository::leaderboard::LeaderboardRepository;

/// Persistence seam for leaderboard rows.
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Replaces the whole season with `rows`, all or nothing. Returns the
    /// number of inserted rows.
    async fn replace_season(&self, season: &str, rows: &[NewLeaderboardRow]) -> Result<u64>;

    /// Season of the most recently created row across all seasons.
    async fn latest_season(&self) -> Result<Option<String>>;

    /// Rows of `season` ordered by rank ascending.
    async fn season_rows(&self, season: &str) -> Result<Vec<LeaderboardRow>>;
}

#[async_trait]
impl LeaderboardStore for Database {
    async fn replace_season(&self, season: &str, rows: &[NewLeaderboardRow]) -> Result<u64> {
        LeaderboardRepository::new(self.pool())
            .replace_season(season, rows)
            .await
    }

    async fn latest_season(&self) -> Result<Option<String>> {
        LeaderboardRepository::new(self.pool()).latest_season().await
    }

    async fn season_rows(&self, season: &str) -> Result<Vec<LeaderboardRow>> {
        LeaderboardRepository::new(self.pool())
            .find_by_season(season)
            .await
    }
}
