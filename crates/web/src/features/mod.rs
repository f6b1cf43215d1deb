use axum::Router;

use crate::middleware::auth::AdminKey;
use crate::state::AppState;

pub mod admin;
pub mod leaderboard;
pub mod system;

pub fn router(state: AppState, admin_key: AdminKey) -> Router {
    Router::new()
        .merge(system::routes())
        .nest("/api", leaderboard::routes::routes())
        .merge(admin::routes::routes(admin_key))
        .with_state(state)
}
