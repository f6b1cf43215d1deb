//! Runs against the database named by `DATABASE_URL`; each test returns early
//! when the variable is unset.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use storage::Database;
use storage::error::StorageError;
use storage::models::NewLeaderboardRow;
use storage::repository::leaderboard::LeaderboardRepository;
use uuid::Uuid;

async fn database() -> Option<Database> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let db = Database::new(&url).await.unwrap();
    db.run_migrations().await.unwrap();
    Some(db)
}

fn unique_season() -> String {
    format!("test-{}", Uuid::new_v4())
}

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 6, 12, minute, 0).unwrap()
}

fn row(username: &str, rank: i32, created_at_utc: DateTime<Utc>) -> NewLeaderboardRow {
    NewLeaderboardRow {
        username: username.to_string(),
        display_name: username.to_uppercase(),
        prize: Decimal::new(1_000_000 - i64::from(rank), 2),
        bet: Decimal::new(123456789012345678, 2),
        rank,
        created_at_utc,
    }
}

#[tokio::test]
async fn test_replace_season_swaps_rows() {
    let Some(db) = database().await else { return };
    let repo = LeaderboardRepository::new(db.pool());
    let season = unique_season();

    repo.replace_season(&season, &[row("a", 1, at(0)), row("b", 2, at(0))])
        .await
        .unwrap();
    let inserted = repo
        .replace_season(&season, &[row("c", 1, at(1))])
        .await
        .unwrap();

    assert_eq!(inserted, 1);
    let rows = repo.find_by_season(&season).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].username, "c");
    assert_eq!(rows[0].bet, Decimal::new(123456789012345678, 2));
    assert_eq!(rows[0].created_at_utc, at(1));

    repo.replace_season(&season, &[]).await.unwrap();
    assert!(repo.find_by_season(&season).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_insert_keeps_previous_rows() {
    let Some(db) = database().await else { return };
    let repo = LeaderboardRepository::new(db.pool());
    let season = unique_season();

    repo.replace_season(&season, &[row("a", 1, at(0)), row("b", 2, at(0))])
        .await
        .unwrap();

    let err = repo
        .replace_season(&season, &[row("x", 1, at(1)), row("x", 2, at(1))])
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ConstraintViolation(_)), "{err:?}");

    let usernames: Vec<String> = repo
        .find_by_season(&season)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.username)
        .collect();
    assert_eq!(usernames, vec!["a", "b"]);

    repo.replace_season(&season, &[]).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_replacements_leave_one_complete_set() {
    let Some(db) = database().await else { return };
    let season = unique_season();
    let first: Vec<_> = (1..=50).map(|i| row(&format!("a{i}"), i, at(2))).collect();
    let second: Vec<_> = (1..=30).map(|i| row(&format!("b{i}"), i, at(3))).collect();

    let repo = LeaderboardRepository::new(db.pool());
    let (left, right) = tokio::join!(
        repo.replace_season(&season, &first),
        repo.replace_season(&season, &second)
    );
    left.unwrap();
    right.unwrap();

    let rows = repo.find_by_season(&season).await.unwrap();
    assert!(rows.len() == 50 || rows.len() == 30, "got {} rows", rows.len());
    let prefix = &rows[0].username[..1];
    assert!(rows.iter().all(|r| r.username.starts_with(prefix)));
    let ranks: Vec<i32> = rows.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, (1..=rows.len() as i32).collect::<Vec<_>>());

    repo.replace_season(&season, &[]).await.unwrap();
}

#[tokio::test]
async fn test_latest_season_follows_newest_import() {
    let Some(db) = database().await else { return };
    let repo = LeaderboardRepository::new(db.pool());
    let season = unique_season();
    let newest = Utc::now();

    repo.replace_season(&season, &[row("a", 1, newest)])
        .await
        .unwrap();

    assert_eq!(repo.latest_season().await.unwrap(), Some(season.clone()));

    repo.replace_season(&season, &[]).await.unwrap();
}
