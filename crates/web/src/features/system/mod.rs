use axum::{Json, Router, routing::get};
use storage::dto::leaderboard::HealthResponse;

use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
