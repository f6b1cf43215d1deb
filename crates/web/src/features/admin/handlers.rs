use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use importer::ImportService;
use storage::dto::leaderboard::{ImportRequest, ImportResponse};

use crate::{
    error::{WebError, WebResult},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/admin/import",
    request_body = ImportRequest,
    security(
        ("admin_key" = [])
    ),
    responses(
        (status = 200, description = "Season leaderboard replaced", body = ImportResponse),
        (status = 400, description = "Invalid body or CSV"),
        (status = 401, description = "Missing or wrong x-admin-key"),
        (status = 500, description = "Admin key not configured")
    ),
    tag = "admin"
)]
pub async fn import_leaderboard(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> WebResult<Json<ImportResponse>> {
    let Json(payload) = payload.map_err(|rejection| {
        WebError::BadRequest(format!(
            "Invalid body (JSON required): {}",
            rejection.body_text()
        ))
    })?;

    let csv = payload.csv.as_deref().unwrap_or_default();
    if csv.trim().is_empty() {
        return Err(WebError::BadRequest("Missing 'csv'.".to_string()));
    }

    let service = ImportService::new(state.store.as_ref(), &state.default_season);
    let result = service
        .import_csv(
            payload.season.as_deref().unwrap_or_default(),
            csv,
            Utc::now(),
        )
        .await?;

    Ok(Json(ImportResponse {
        ok: true,
        season: result.season,
        imported: result.imported,
        updated_at_utc: result.updated_at_utc,
    }))
}
