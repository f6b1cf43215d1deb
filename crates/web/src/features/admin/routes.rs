use axum::{Router, middleware, routing::post};

use super::handlers::import_leaderboard;
use crate::middleware::auth::{AdminKey, require_admin_key};
use crate::state::AppState;

/// Admin import, reachable directly and under `/api` for the frontend proxy.
pub fn routes(admin_key: AdminKey) -> Router<AppState> {
    Router::new()
        .route("/admin/import", post(import_leaderboard))
        .route("/api/admin/import", post(import_leaderboard))
        .route_layer(middleware::from_fn_with_state(admin_key, require_admin_key))
}
