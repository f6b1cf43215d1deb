use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A stored leaderboard entry. Rows are written in bulk by a season import
/// and never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaderboardRow {
    pub id: Uuid,
    pub season: String,
    pub username: String,
    pub display_name: String,
    pub prize: Decimal,
    pub bet: Decimal,
    pub rank: i32,
    pub created_at_utc: DateTime<Utc>,
}

/// Insert-side shape of a leaderboard row. The season is supplied by the
/// replacement call and the id by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeaderboardRow {
    pub username: String,
    pub display_name: String,
    pub prize: Decimal,
    pub bet: Decimal,
    pub rank: i32,
    pub created_at_utc: DateTime<Utc>,
}
