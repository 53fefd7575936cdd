use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::analytics_dto::{
        AverageScoreResponse, DateRangeQuery, MemberCompletion, QuizCompletion, QuizScoreSummary,
        UserQuizWeeklyScores, WeeklyScores,
    },
    error::Result,
    middleware::auth::Claims,
    routes::ensure_self,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/analytics/users/{user_id}/average-score",
    params(("user_id" = i64, Path, description = "User ID")),
    responses((status = 200, description = "Mean score, null without results", body = AverageScoreResponse))
)]
pub async fn user_average_score(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse> {
    ensure_self(&claims, user_id)?;
    let average_score = state.analytics_service.user_average_score(user_id).await?;
    Ok(Json(AverageScoreResponse {
        user_id,
        average_score,
    }))
}

#[utoipa::path(
    get,
    path = "/api/analytics/users/{user_id}/quiz-scores",
    params(("user_id" = i64, Path, description = "User ID"), DateRangeQuery),
    responses((status = 200, description = "Per-quiz mean with first and last completion", body = [QuizScoreSummary]))
)]
pub async fn user_quiz_scores(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<i64>,
    Query(range): Query<DateRangeQuery>,
) -> Result<impl IntoResponse> {
    ensure_self(&claims, user_id)?;
    let scores = state
        .analytics_service
        .user_quiz_scores(user_id, range.into())
        .await?;
    Ok(Json(scores))
}

#[utoipa::path(
    get,
    path = "/api/analytics/users/{user_id}/completions",
    params(("user_id" = i64, Path, description = "User ID")),
    responses((status = 200, description = "Last completion per quiz", body = [QuizCompletion]))
)]
pub async fn user_quiz_completions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse> {
    ensure_self(&claims, user_id)?;
    let completions = state
        .analytics_service
        .user_quiz_completions(user_id)
        .await?;
    Ok(Json(completions))
}

#[utoipa::path(
    get,
    path = "/api/analytics/companies/{company_id}/completions",
    params(("company_id" = i64, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Last completion per member", body = [MemberCompletion]),
        (status = 403, description = "Caller is not a company admin")
    )
)]
pub async fn company_quiz_completions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(company_id): Path<i64>,
) -> Result<impl IntoResponse> {
    state
        .quiz_service
        .require_admin(company_id, claims.user_id()?)
        .await?;
    let completions = state
        .analytics_service
        .company_quiz_completions(company_id)
        .await?;
    Ok(Json(completions))
}

#[utoipa::path(
    get,
    path = "/api/analytics/companies/{company_id}/weekly-scores",
    params(("company_id" = i64, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Per-member mean score for each Monday-Sunday week", body = [WeeklyScores]),
        (status = 403, description = "Caller is not a company admin")
    )
)]
#[axum::debug_handler]
pub async fn company_weekly_scores(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(company_id): Path<i64>,
) -> Result<impl IntoResponse> {
    state
        .quiz_service
        .require_admin(company_id, claims.user_id()?)
        .await?;
    let weeks = state
        .analytics_service
        .company_weekly_scores(company_id)
        .await?;
    Ok(Json(weeks))
}

/// Members may read their own trend; admins may read anyone's.
#[utoipa::path(
    get,
    path = "/api/analytics/companies/{company_id}/users/{user_id}/weekly-scores",
    params(
        ("company_id" = i64, Path, description = "Company ID"),
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Per-quiz mean score for each Monday-Sunday week", body = [UserQuizWeeklyScores]),
        (status = 404, description = "User is not a member of the company")
    )
)]
pub async fn user_quiz_weekly_scores(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((company_id, user_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    let caller = claims.user_id()?;
    if caller != user_id {
        state.quiz_service.require_admin(company_id, caller).await?;
    }
    let weeks = state
        .analytics_service
        .user_quiz_weekly_scores(user_id, company_id)
        .await?;
    Ok(Json(weeks))
}
