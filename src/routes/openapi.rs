use axum::Json;
use utoipa::OpenApi;

use crate::dto::analytics_dto::{
    AverageScoreResponse, MemberCompletion, QuizCompletion, QuizScore, QuizScoreSummary,
    UserQuizWeeklyScores, UserScore, WeeklyScores,
};
use crate::dto::quiz_dto::{
    CreateQuizPayload, QuestionPayload, QuizListResponse, QuizWithQuestions, RunQuizPayload,
    UpdateQuizPayload,
};
use crate::dto::result_dto::AggregateScoreResponse;
use crate::models::notification::Notification;
use crate::models::question::Question;
use crate::models::quiz::Quiz;
use crate::models::quiz_result::QuizResult;
use crate::models::submission::{AnswerSet, SelectedAnswer};
use crate::models::transcript::QuizSummary;
use crate::routes;
use crate::services::export_service::ExportFormat;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health,
        routes::health::health_checker,
        routes::questions::create_question,
        routes::questions::update_question,
        routes::questions::list_questions,
        routes::quizzes::create_quiz,
        routes::quizzes::list_quizzes,
        routes::quizzes::get_quiz,
        routes::quizzes::update_quiz,
        routes::quizzes::delete_quiz,
        routes::quizzes::run_quiz,
        routes::quiz_results::average_in_company,
        routes::quiz_results::average_systemwide,
        routes::analytics::user_average_score,
        routes::analytics::user_quiz_scores,
        routes::analytics::user_quiz_completions,
        routes::analytics::company_quiz_completions,
        routes::analytics::company_weekly_scores,
        routes::analytics::user_quiz_weekly_scores,
        routes::transcripts::my_transcripts,
        routes::transcripts::export_my_transcripts,
        routes::transcripts::company_transcripts,
        routes::transcripts::export_company_transcripts,
        routes::notifications::list_notifications,
        routes::notifications::mark_read,
    ),
    components(schemas(
        Question,
        Quiz,
        QuizResult,
        Notification,
        AnswerSet,
        SelectedAnswer,
        QuizSummary,
        QuestionPayload,
        CreateQuizPayload,
        UpdateQuizPayload,
        QuizListResponse,
        QuizWithQuestions,
        RunQuizPayload,
        AverageScoreResponse,
        QuizScoreSummary,
        QuizCompletion,
        MemberCompletion,
        UserScore,
        WeeklyScores,
        QuizScore,
        UserQuizWeeklyScores,
        AggregateScoreResponse,
        ExportFormat,
    )),
    info(title = "Quiz backend", description = "Company quizzes, scoring and trend analytics")
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
