use std::collections::HashSet;

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use storage::LeaderboardStore;
use storage::models::NewLeaderboardRow;
use tracing::info;

use crate::csv::{self, ParsedRow};
use crate::ranking;
use crate::{ImporterError, Result};

/// Timestamps are stored with microsecond precision.
const TIMESTAMP_PRECISION: u16 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub imported: usize,
    pub season: String,
    pub updated_at_utc: DateTime<Utc>,
}

/// Replaces a season's leaderboard with freshly ranked rows.
pub struct ImportService<'a> {
    store: &'a dyn LeaderboardStore,
    default_season: &'a str,
}

impl<'a> ImportService<'a> {
    pub fn new(store: &'a dyn LeaderboardStore, default_season: &'a str) -> Self {
        Self {
            store,
            default_season,
        }
    }

    /// Trimmed `season`, or the default season when blank.
    pub fn resolve_season(&self, season: &str) -> String {
        match season.trim() {
            "" => self.default_season.to_string(),
            season => season.to_string(),
        }
    }

    /// Parses `text` and imports the rows into `season`.
    pub async fn import_csv(
        &self,
        season: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<ImportResult> {
        let rows = csv::parse(text)?;
        self.import(season, rows, now).await
    }

    /// Ranks `rows` and swaps them in as the complete contents of `season`.
    pub async fn import(
        &self,
        season: &str,
        rows: Vec<ParsedRow>,
        now: DateTime<Utc>,
    ) -> Result<ImportResult> {
        let season = self.resolve_season(season);
        let updated_at_utc = now.trunc_subsecs(TIMESTAMP_PRECISION);

        let ranked = prepare_rows(rows, updated_at_utc)?;
        let imported = self.store.replace_season(&season, &ranked).await?;

        info!(season = %season, imported, "Imported season leaderboard");

        Ok(ImportResult {
            imported: imported as usize,
            season,
            updated_at_utc,
        })
    }
}

/// Validates parsed rows and ranks them for insertion.
pub fn prepare_rows(
    rows: Vec<ParsedRow>,
    created_at_utc: DateTime<Utc>,
) -> Result<Vec<NewLeaderboardRow>> {
    if rows.is_empty() {
        return Err(ImporterError::NoRows);
    }

    let mut usernames = HashSet::with_capacity(rows.len());
    for row in &rows {
        if !usernames.insert(row.username.as_str()) {
            return Err(ImporterError::DuplicateUsername(row.username.clone()));
        }
    }

    Ok(ranking::rank_rows(rows, created_at_utc))
}
