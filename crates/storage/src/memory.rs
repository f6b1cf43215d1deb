use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{LeaderboardRow, NewLeaderboardRow};
use crate::store::LeaderboardStore;

/// In-process store for tests and local runs without Postgres.
///
/// Enforces the same `(season, username)` uniqueness as the database and
/// swaps a season's rows under one write lock, so readers observe either the
/// old or the new set.
#[derive(Debug, Default)]
pub struct MemoryStore {
    seasons: RwLock<HashMap<String, Vec<LeaderboardRow>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored rows across all seasons.
    pub async fn len(&self) -> usize {
        self.seasons.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl LeaderboardStore for MemoryStore {
    async fn replace_season(&self, season: &str, rows: &[NewLeaderboardRow]) -> Result<u64> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in rows {
            if !seen.insert(row.username.as_str()) {
                return Err(StorageError::ConstraintViolation(format!(
                    "duplicate username '{}' in season '{}'",
                    row.username, season
                )));
            }
        }

        let replacement: Vec<LeaderboardRow> = rows
            .iter()
            .map(|row| LeaderboardRow {
                id: Uuid::new_v4(),
                season: season.to_string(),
                username: row.username.clone(),
                display_name: row.display_name.clone(),
                prize: row.prize,
                bet: row.bet,
                rank: row.rank,
                created_at_utc: row.created_at_utc,
            })
            .collect();
        let inserted = replacement.len() as u64;

        let mut seasons = self.seasons.write().await;
        if replacement.is_empty() {
            seasons.remove(season);
        } else {
            seasons.insert(season.to_string(), replacement);
        }

        Ok(inserted)
    }

    async fn latest_season(&self) -> Result<Option<String>> {
        let seasons = self.seasons.read().await;

        Ok(seasons
            .values()
            .flatten()
            .max_by_key(|row| row.created_at_utc)
            .map(|row| row.season.clone()))
    }

    async fn season_rows(&self, season: &str) -> Result<Vec<LeaderboardRow>> {
        let seasons = self.seasons.read().await;

        let mut rows = seasons.get(season).cloned().unwrap_or_default();
        rows.sort_by_key(|row| row.rank);

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, 10, 0, 0).unwrap()
    }

    fn new_row(username: &str, rank: i32, created_at_utc: DateTime<Utc>) -> NewLeaderboardRow {
        NewLeaderboardRow {
            username: username.to_string(),
            display_name: username.to_string(),
            prize: Decimal::from(100 - rank),
            bet: Decimal::ZERO,
            rank,
            created_at_utc,
        }
    }

    #[tokio::test]
    async fn test_replace_season_swaps_rows() {
        let store = MemoryStore::new();
        store
            .replace_season("2025-W1", &[new_row("a", 1, at(1)), new_row("b", 2, at(1))])
            .await
            .unwrap();

        let inserted = store
            .replace_season("2025-W1", &[new_row("c", 1, at(2))])
            .await
            .unwrap();

        assert_eq!(inserted, 1);
        let rows = store.season_rows("2025-W1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].username, "c");
        assert_eq!(rows[0].season, "2025-W1");
    }

    #[tokio::test]
    async fn test_failed_replacement_keeps_previous_rows() {
        let store = MemoryStore::new();
        store
            .replace_season("2025-W1", &[new_row("a", 1, at(1))])
            .await
            .unwrap();

        let result = store
            .replace_season("2025-W1", &[new_row("x", 1, at(2)), new_row("x", 2, at(2))])
            .await;

        assert!(matches!(result, Err(StorageError::ConstraintViolation(_))));
        let rows = store.season_rows("2025-W1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].username, "a");
    }

    #[tokio::test]
    async fn test_same_username_allowed_across_seasons() {
        let store = MemoryStore::new();
        store
            .replace_season("2025-W1", &[new_row("a", 1, at(1))])
            .await
            .unwrap();
        store
            .replace_season("2025-W2", &[new_row("a", 1, at(2))])
            .await
            .unwrap();

        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_latest_season_uses_newest_timestamp() {
        let store = MemoryStore::new();
        assert_eq!(store.latest_season().await.unwrap(), None);

        store
            .replace_season("2025-W9", &[new_row("a", 1, at(1))])
            .await
            .unwrap();
        store
            .replace_season("2025-W2", &[new_row("b", 1, at(3))])
            .await
            .unwrap();

        assert_eq!(
            store.latest_season().await.unwrap().as_deref(),
            Some("2025-W2")
        );
    }

    #[tokio::test]
    async fn test_season_rows_ordered_by_rank() {
        let store = MemoryStore::new();
        store
            .replace_season(
                "2025-W1",
                &[new_row("c", 3, at(1)), new_row("a", 1, at(1)), new_row("b", 2, at(1))],
            )
            .await
            .unwrap();

        let ranks: Vec<i32> = store
            .season_rows("2025-W1")
            .await
            .unwrap()
            .iter()
            .map(|row| row.rank)
            .collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert!(store.season_rows("unknown").await.unwrap().is_empty());
    }
}
