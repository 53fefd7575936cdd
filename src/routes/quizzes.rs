use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::quiz_dto::{
        CreateQuizPayload, PageQuery, QuizListResponse, QuizWithQuestions, RunQuizPayload,
        UpdateQuizPayload,
    },
    error::Result,
    middleware::auth::Claims,
    models::{quiz::Quiz, quiz_result::QuizResult, submission::QuizSubmission},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/companies/{company_id}/quizzes",
    params(("company_id" = i64, Path, description = "Company ID")),
    request_body = CreateQuizPayload,
    responses(
        (status = 201, description = "Quiz created and members notified", body = Quiz),
        (status = 400, description = "Fewer than two questions or foreign questions"),
        (status = 403, description = "Caller is not a company admin")
    )
)]
#[axum::debug_handler]
pub async fn create_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(company_id): Path<i64>,
    Json(payload): Json<CreateQuizPayload>,
) -> Result<impl IntoResponse> {
    let actor = claims.user_id()?;
    let quiz = state
        .quiz_service
        .create_quiz(company_id, actor, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/quizzes",
    params(("company_id" = i64, Path, description = "Company ID"), PageQuery),
    responses((status = 200, description = "Page of quizzes", body = QuizListResponse))
)]
pub async fn list_quizzes(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(company_id): Path<i64>,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let actor = claims.user_id()?;
    let items = state
        .quiz_service
        .list_quizzes(company_id, actor, &page)
        .await?;
    let (skip, limit) = page.bounds();
    Ok(Json(QuizListResponse { items, skip, limit }))
}

#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/quizzes/{quiz_id}",
    params(
        ("company_id" = i64, Path, description = "Company ID"),
        ("quiz_id" = i64, Path, description = "Quiz ID")
    ),
    responses(
        (status = 200, description = "Quiz with its questions in order", body = QuizWithQuestions),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn get_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((company_id, quiz_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    let actor = claims.user_id()?;
    let quiz = state
        .quiz_service
        .get_quiz_with_questions(company_id, quiz_id, actor)
        .await?;
    Ok(Json(quiz))
}

#[utoipa::path(
    patch,
    path = "/api/companies/{company_id}/quizzes/{quiz_id}",
    params(
        ("company_id" = i64, Path, description = "Company ID"),
        ("quiz_id" = i64, Path, description = "Quiz ID")
    ),
    request_body = UpdateQuizPayload,
    responses(
        (status = 200, description = "Quiz updated", body = Quiz),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn update_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((company_id, quiz_id)): Path<(i64, i64)>,
    Json(payload): Json<UpdateQuizPayload>,
) -> Result<impl IntoResponse> {
    let actor = claims.user_id()?;
    let quiz = state
        .quiz_service
        .update_quiz(company_id, quiz_id, actor, payload)
        .await?;
    Ok(Json(quiz))
}

#[utoipa::path(
    delete,
    path = "/api/companies/{company_id}/quizzes/{quiz_id}",
    params(
        ("company_id" = i64, Path, description = "Company ID"),
        ("quiz_id" = i64, Path, description = "Quiz ID")
    ),
    responses(
        (status = 204, description = "Quiz deleted"),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn delete_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((company_id, quiz_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    let actor = claims.user_id()?;
    state
        .quiz_service
        .delete_quiz(company_id, quiz_id, actor)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Grades one attempt by the calling user.
#[utoipa::path(
    post,
    path = "/api/quizzes/{quiz_id}/run",
    params(("quiz_id" = i64, Path, description = "Quiz ID")),
    request_body = RunQuizPayload,
    responses(
        (status = 201, description = "Attempt graded and recorded", body = QuizResult),
        (status = 400, description = "Answer count does not match the quiz"),
        (status = 403, description = "Caller is not a member of the quiz's company"),
        (status = 404, description = "Quiz not found"),
        (status = 422, description = "Nothing to grade")
    )
)]
#[axum::debug_handler]
pub async fn run_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<i64>,
    Json(payload): Json<RunQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user_id = claims.user_id()?;
    state.quiz_service.check_member(user_id, quiz_id).await?;

    let result = state
        .grading_service
        .grade(QuizSubmission {
            quiz_id,
            user_id,
            responses: payload.responses,
        })
        .await?;

    let quizzes = state.quiz_service.clone();
    tokio::spawn(async move {
        if let Err(e) = quizzes.record_usage(quiz_id).await {
            tracing::warn!(quiz_id, error = %e, "failed to bump quiz usage counter");
        }
    });

    Ok((StatusCode::CREATED, Json(result)))
}
