use axum::{
    Json,
    extract::{Query, State},
};
use storage::dto::leaderboard::{CurrentSeasonResponse, LeaderboardFilter, LeaderboardResponse};

use crate::{error::WebResult, state::AppState};

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(LeaderboardFilter),
    responses(
        (status = 200, description = "Ranked leaderboard of the requested or latest season", body = LeaderboardResponse)
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(filter): Query<LeaderboardFilter>,
) -> WebResult<Json<LeaderboardResponse>> {
    let response = services::get_leaderboard(
        state.store.as_ref(),
        filter.season(),
        &state.default_season,
    )
    .await?;

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/season/current",
    responses(
        (status = 200, description = "Season of the most recent import, or the default season", body = CurrentSeasonResponse)
    ),
    tag = "leaderboard"
)]
pub async fn get_current_season(
    State(state): State<AppState>,
) -> WebResult<Json<CurrentSeasonResponse>> {
    let season =
        services::resolve_season(state.store.as_ref(), None, &state.default_season).await?;

    Ok(Json(CurrentSeasonResponse { season }))
}
