use axum::{Router, routing::get};

use super::handlers::{get_current_season, get_leaderboard};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leaderboard", get(get_leaderboard))
        .route("/season/current", get(get_current_season))
}
