use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::result_dto::{CompanyTranscriptQuery, ExportQuery, TranscriptQuery},
    error::Result,
    middleware::auth::Claims,
    services::export_service::ExportFile,
    AppState,
};

fn download(file: ExportFile) -> impl IntoResponse {
    let disposition = format!("attachment; filename=\"{}\"", file.file_name);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
}

#[utoipa::path(
    get,
    path = "/api/transcripts",
    params(TranscriptQuery),
    responses(
        (status = 200, description = "Caller's cached attempt transcripts"),
        (status = 404, description = "No cached transcripts")
    )
)]
pub async fn my_transcripts(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<TranscriptQuery>,
) -> Result<impl IntoResponse> {
    let transcripts = state
        .transcript_service
        .user_transcripts(claims.user_id()?, query.quiz_id)
        .await?;
    Ok(Json(transcripts))
}

#[utoipa::path(
    get,
    path = "/api/transcripts/export",
    params(ExportQuery),
    responses(
        (status = 200, description = "Summaries as a JSON or XLSX download"),
        (status = 404, description = "No cached transcripts")
    )
)]
pub async fn export_my_transcripts(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let transcripts = state
        .transcript_service
        .user_transcripts(user_id, query.quiz_id)
        .await?;
    let file = state
        .export_service
        .export(&transcripts, query.format, &format!("user_{}", user_id))
        .await?;
    Ok(download(file))
}

#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/quizzes/{quiz_id}/transcripts",
    params(
        ("company_id" = i64, Path, description = "Company ID"),
        ("quiz_id" = i64, Path, description = "Quiz ID"),
        CompanyTranscriptQuery
    ),
    responses(
        (status = 200, description = "Cached transcripts of the quiz within the company"),
        (status = 403, description = "Caller is not a company admin"),
        (status = 404, description = "No cached transcripts")
    )
)]
pub async fn company_transcripts(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((company_id, quiz_id)): Path<(i64, i64)>,
    Query(query): Query<CompanyTranscriptQuery>,
) -> Result<impl IntoResponse> {
    state
        .quiz_service
        .require_admin(company_id, claims.user_id()?)
        .await?;
    let transcripts = state
        .transcript_service
        .company_transcripts(company_id, quiz_id, query.user_id)
        .await?;
    Ok(Json(transcripts))
}

#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/quizzes/{quiz_id}/transcripts/export",
    params(
        ("company_id" = i64, Path, description = "Company ID"),
        ("quiz_id" = i64, Path, description = "Quiz ID"),
        ExportQuery
    ),
    responses(
        (status = 200, description = "Summaries as a JSON or XLSX download"),
        (status = 403, description = "Caller is not a company admin"),
        (status = 404, description = "No cached transcripts")
    )
)]
pub async fn export_company_transcripts(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((company_id, quiz_id)): Path<(i64, i64)>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    state
        .quiz_service
        .require_admin(company_id, claims.user_id()?)
        .await?;
    let transcripts = state
        .transcript_service
        .company_transcripts(company_id, quiz_id, query.user_id)
        .await?;
    let file = state
        .export_service
        .export(
            &transcripts,
            query.format,
            &format!("company_{}_quiz_{}", company_id, quiz_id),
        )
        .await?;
    Ok(download(file))
}
