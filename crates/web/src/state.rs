use std::sync::Arc;

use storage::LeaderboardStore;

/// Shared handler state. Holds no leaderboard data itself: every request
/// reads through to the store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LeaderboardStore>,
    pub default_season: String,
}

impl AppState {
    pub fn new(store: Arc<dyn LeaderboardStore>, default_season: impl Into<String>) -> Self {
        Self {
            store,
            default_season: default_season.into(),
        }
    }
}
