use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{error::Result, AppState};

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is up"))
)]
#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "ok",
    });
    (StatusCode::OK, Json(body))
}

/// Probes both backing stores.
#[utoipa::path(
    get,
    path = "/healthchecker",
    responses(
        (status = 200, description = "Database and cache reachable"),
        (status = 500, description = "Database unreachable"),
        (status = 503, description = "Cache unreachable")
    )
)]
#[axum::debug_handler]
pub async fn health_checker(State(state): State<AppState>) -> Result<impl IntoResponse> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;
    state.stores.transcripts.ping().await?;
    Ok(Json(json!({
        "status": "ok",
        "database": "ok",
        "cache": "ok",
    })))
}
