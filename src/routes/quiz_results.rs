use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::result_dto::AggregateScoreResponse, error::Result, middleware::auth::Claims,
    routes::ensure_self, AppState,
};

#[utoipa::path(
    get,
    path = "/api/results/users/{user_id}/companies/{company_id}/average",
    params(
        ("user_id" = i64, Path, description = "User ID"),
        ("company_id" = i64, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "Share of correct answers within the company", body = AggregateScoreResponse),
        (status = 403, description = "Not the caller's own results")
    )
)]
pub async fn average_in_company(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((user_id, company_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    ensure_self(&claims, user_id)?;
    let average_score = state
        .analytics_service
        .average_score_in_company(user_id, company_id)
        .await?;
    Ok(Json(AggregateScoreResponse {
        user_id,
        company_id: Some(company_id),
        average_score,
    }))
}

#[utoipa::path(
    get,
    path = "/api/results/users/{user_id}/average",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Share of correct answers across every company", body = AggregateScoreResponse),
        (status = 403, description = "Not the caller's own results")
    )
)]
pub async fn average_systemwide(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse> {
    ensure_self(&claims, user_id)?;
    let average_score = state
        .analytics_service
        .average_score_systemwide(user_id)
        .await?;
    Ok(Json(AggregateScoreResponse {
        user_id,
        company_id: None,
        average_score,
    }))
}
