use std::sync::Arc;

use sqlx::PgPool;

use crate::dto::analytics_dto::{
    MemberCompletion, QuizCompletion, QuizScoreSummary, UserQuizWeeklyScores, WeeklyScores,
};
use crate::error::{Error, Result};
use crate::models::quiz_result::{DateRange, ResultScope};
use crate::services::weekly_aggregator;
use crate::stores::{MemberStore, ResultStore};

/// `correct / total * 100`, or 0 when nothing was answered.
pub fn ratio_score(correct: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    correct as f64 / total as f64 * 100.0
}

#[derive(Clone)]
pub struct AnalyticsService {
    pool: PgPool,
    results: Arc<dyn ResultStore>,
    members: Arc<dyn MemberStore>,
}

impl AnalyticsService {
    pub fn new(pool: PgPool, results: Arc<dyn ResultStore>, members: Arc<dyn MemberStore>) -> Self {
        Self {
            pool,
            results,
            members,
        }
    }

    pub async fn average_score_in_company(&self, user_id: i64, company_id: i64) -> Result<f64> {
        let (correct, total): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(correct_answers), 0)::BIGINT,
                   COALESCE(SUM(total_questions), 0)::BIGINT
            FROM quiz_results
            WHERE user_id = $1 AND company_id = $2
            "#,
        )
        .bind(user_id)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(ratio_score(correct, total))
    }

    pub async fn average_score_systemwide(&self, user_id: i64) -> Result<f64> {
        let (correct, total): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(correct_answers), 0)::BIGINT,
                   COALESCE(SUM(total_questions), 0)::BIGINT
            FROM quiz_results
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(ratio_score(correct, total))
    }

    /// Mean of the user's scores; `None` if they have no results.
    pub async fn user_average_score(&self, user_id: i64) -> Result<Option<f64>> {
        let avg: Option<f64> =
            sqlx::query_scalar(r#"SELECT AVG(score) FROM quiz_results WHERE user_id = $1"#)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(avg)
    }

    pub async fn user_quiz_scores(
        &self,
        user_id: i64,
        range: DateRange,
    ) -> Result<Vec<QuizScoreSummary>> {
        let rows = sqlx::query_as::<_, QuizScoreSummary>(
            r#"
            SELECT quiz_id,
                   AVG(score) AS average_score,
                   MIN(completed_at) AS first_completed_at,
                   MAX(completed_at) AS last_completed_at
            FROM quiz_results
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR completed_at >= $2)
              AND ($3::timestamptz IS NULL OR completed_at <= $3)
            GROUP BY quiz_id
            ORDER BY quiz_id
            "#,
        )
        .bind(user_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn user_quiz_completions(&self, user_id: i64) -> Result<Vec<QuizCompletion>> {
        let rows = sqlx::query_as::<_, QuizCompletion>(
            r#"
            SELECT quiz_id, MAX(completed_at) AS last_completed_at
            FROM quiz_results
            WHERE user_id = $1
            GROUP BY quiz_id
            ORDER BY quiz_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn company_quiz_completions(&self, company_id: i64) -> Result<Vec<MemberCompletion>> {
        let rows = sqlx::query_as::<_, MemberCompletion>(
            r#"
            SELECT qr.user_id, MAX(qr.completed_at) AS last_completed_at
            FROM quiz_results qr
            JOIN members m ON m.user_id = qr.user_id AND m.company_id = qr.company_id
            WHERE qr.company_id = $1
            GROUP BY qr.user_id
            ORDER BY qr.user_id
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Per-member weekly means across the company's whole history.
    pub async fn company_weekly_scores(&self, company_id: i64) -> Result<Vec<WeeklyScores>> {
        let records = self
            .results
            .all_for(ResultScope::Company(company_id), DateRange::default())
            .await?;
        Ok(weekly_aggregator::aggregate(&records)
            .into_iter()
            .map(WeeklyScores::from)
            .collect())
    }

    /// Per-quiz weekly means for one member of `company_id`.
    pub async fn user_quiz_weekly_scores(
        &self,
        user_id: i64,
        company_id: i64,
    ) -> Result<Vec<UserQuizWeeklyScores>> {
        if self.members.find_member(user_id, company_id).await?.is_none() {
            return Err(Error::NotFound(
                "User is not a member of this company".to_string(),
            ));
        }
        let records = self
            .results
            .all_for(
                ResultScope::User {
                    user_id,
                    company_id: Some(company_id),
                },
                DateRange::default(),
            )
            .await?;
        Ok(weekly_aggregator::aggregate(&records)
            .into_iter()
            .map(UserQuizWeeklyScores::from)
            .collect())
    }
}
