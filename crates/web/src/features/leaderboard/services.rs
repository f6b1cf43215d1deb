use storage::{LeaderboardStore, dto::leaderboard::LeaderboardResponse, error::Result};

/// Resolves the season a read refers to: the requested one when given,
/// otherwise the season of the most recent import, otherwise `default_season`.
pub async fn resolve_season(
    store: &dyn LeaderboardStore,
    requested: Option<&str>,
    default_season: &str,
) -> Result<String> {
    if let Some(season) = requested {
        return Ok(season.to_string());
    }

    Ok(store
        .latest_season()
        .await?
        .unwrap_or_else(|| default_season.to_string()))
}

/// Get the ranked leaderboard of a season
pub async fn get_leaderboard(
    store: &dyn LeaderboardStore,
    requested: Option<&str>,
    default_season: &str,
) -> Result<LeaderboardResponse> {
    let season = resolve_season(store, requested, default_season).await?;
    let rows = store.season_rows(&season).await?;

    Ok(LeaderboardResponse::from_ranked(season, rows))
}
