pub mod analytics;
pub mod health;
pub mod notifications;
pub mod openapi;
pub mod questions;
pub mod quiz_results;
pub mod quizzes;
pub mod transcripts;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::{Error, Result};
use crate::middleware::auth::{require_bearer_auth, Claims};
use crate::AppState;

/// Rejects access to another user's personal data.
pub fn ensure_self(claims: &Claims, user_id: i64) -> Result<()> {
    if claims.user_id()? != user_id {
        return Err(Error::Forbidden(
            "You can only view your own results".to_string(),
        ));
    }
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/api/companies/:company_id/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route(
            "/api/companies/:company_id/questions/:question_id",
            put(questions::update_question),
        )
        .route(
            "/api/companies/:company_id/quizzes",
            get(quizzes::list_quizzes).post(quizzes::create_quiz),
        )
        .route(
            "/api/companies/:company_id/quizzes/:quiz_id",
            get(quizzes::get_quiz)
                .patch(quizzes::update_quiz)
                .delete(quizzes::delete_quiz),
        )
        .route(
            "/api/companies/:company_id/quizzes/:quiz_id/transcripts",
            get(transcripts::company_transcripts),
        )
        .route(
            "/api/companies/:company_id/quizzes/:quiz_id/transcripts/export",
            get(transcripts::export_company_transcripts),
        )
        .route("/api/quizzes/:quiz_id/run", post(quizzes::run_quiz))
        .route(
            "/api/results/users/:user_id/average",
            get(quiz_results::average_systemwide),
        )
        .route(
            "/api/results/users/:user_id/companies/:company_id/average",
            get(quiz_results::average_in_company),
        )
        .route(
            "/api/analytics/users/:user_id/average-score",
            get(analytics::user_average_score),
        )
        .route(
            "/api/analytics/users/:user_id/quiz-scores",
            get(analytics::user_quiz_scores),
        )
        .route(
            "/api/analytics/users/:user_id/completions",
            get(analytics::user_quiz_completions),
        )
        .route(
            "/api/analytics/companies/:company_id/completions",
            get(analytics::company_quiz_completions),
        )
        .route(
            "/api/analytics/companies/:company_id/weekly-scores",
            get(analytics::company_weekly_scores),
        )
        .route(
            "/api/analytics/companies/:company_id/users/:user_id/weekly-scores",
            get(analytics::user_quiz_weekly_scores),
        )
        .route("/api/transcripts", get(transcripts::my_transcripts))
        .route(
            "/api/transcripts/export",
            get(transcripts::export_my_transcripts),
        )
        .route(
            "/api/notifications",
            get(notifications::list_notifications),
        )
        .route(
            "/api/notifications/:notification_id/read",
            post(notifications::mark_read),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_bearer_auth,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/healthchecker", get(health::health_checker))
        .route("/api/openapi.json", get(openapi::openapi_json))
        .merge(api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
