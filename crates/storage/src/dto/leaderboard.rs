use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::LeaderboardRow;

/// Number of rows surfaced as the podium in a leaderboard response.
pub const TOP_COUNT: usize = 3;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardFilter {
    /// Season to read. Blank or omitted resolves to the most recently imported season.
    pub season: Option<String>,
}

impl LeaderboardFilter {
    /// The trimmed season, or `None` when omitted or blank.
    pub fn season(&self) -> Option<&str> {
        self.season
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Public view of a single leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub rank: i32,
    pub username: String,
    pub display_name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub prize: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub bet: Decimal,
}

impl From<LeaderboardRow> for RowView {
    fn from(row: LeaderboardRow) -> Self {
        Self {
            rank: row.rank,
            username: row.username,
            display_name: row.display_name,
            prize: row.prize,
            bet: row.bet,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub season: String,
    pub updated_at_utc: Option<DateTime<Utc>>,
    pub top: Vec<RowView>,
    pub rows: Vec<RowView>,
}

impl LeaderboardResponse {
    /// Builds the response from rows already ordered by rank.
    pub fn from_ranked(season: String, rows: Vec<LeaderboardRow>) -> Self {
        let updated_at_utc = rows.iter().map(|row| row.created_at_utc).max();
        let rows: Vec<RowView> = rows.into_iter().map(RowView::from).collect();
        let top = rows.iter().take(TOP_COUNT).cloned().collect();

        Self {
            season,
            updated_at_utc,
            top,
            rows,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentSeasonResponse {
    pub season: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Admin import payload.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ImportRequest {
    /// Target season. Blank or omitted uses the configured default season.
    pub season: Option<String>,
    /// Raw CSV text with a `username,displayName,prize,bet` header.
    pub csv: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub ok: bool,
    pub season: String,
    pub imported: usize,
    pub updated_at_utc: DateTime<Utc>,
}
