use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::quiz_dto::QuestionPayload, error::Result, middleware::auth::Claims,
    models::question::Question, AppState,
};

#[utoipa::path(
    post,
    path = "/api/companies/{company_id}/questions",
    params(("company_id" = i64, Path, description = "Company ID")),
    request_body = QuestionPayload,
    responses(
        (status = 201, description = "Question created", body = Question),
        (status = 400, description = "Invalid answer key"),
        (status = 403, description = "Caller is not a company admin")
    )
)]
#[axum::debug_handler]
pub async fn create_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(company_id): Path<i64>,
    Json(payload): Json<QuestionPayload>,
) -> Result<impl IntoResponse> {
    let actor = claims.user_id()?;
    let question = state
        .quiz_service
        .create_question(company_id, actor, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(question)))
}

#[utoipa::path(
    put,
    path = "/api/companies/{company_id}/questions/{question_id}",
    params(
        ("company_id" = i64, Path, description = "Company ID"),
        ("question_id" = i64, Path, description = "Question ID")
    ),
    request_body = QuestionPayload,
    responses(
        (status = 200, description = "Question updated", body = Question),
        (status = 404, description = "Question not found in this company")
    )
)]
pub async fn update_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((company_id, question_id)): Path<(i64, i64)>,
    Json(payload): Json<QuestionPayload>,
) -> Result<impl IntoResponse> {
    let actor = claims.user_id()?;
    let question = state
        .quiz_service
        .update_question(company_id, question_id, actor, payload)
        .await?;
    Ok(Json(question))
}

#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/questions",
    params(("company_id" = i64, Path, description = "Company ID")),
    responses((status = 200, description = "Company question bank", body = [Question]))
)]
pub async fn list_questions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(company_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let actor = claims.user_id()?;
    let questions = state.quiz_service.list_questions(company_id, actor).await?;
    Ok(Json(questions))
}
