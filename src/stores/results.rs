use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::ResultStore;
use crate::error::Result;
use crate::models::quiz_result::{DateRange, NewQuizResult, QuizResult, ResultScope, ScoreRecord};

#[derive(Clone)]
pub struct PgResultStore {
    pool: PgPool,
}

impl PgResultStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultStore for PgResultStore {
    async fn append(&self, result: NewQuizResult) -> Result<QuizResult> {
        let row = sqlx::query_as::<_, QuizResult>(
            r#"
            INSERT INTO quiz_results (user_id, company_id, quiz_id, correct_answers, total_questions, score)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, company_id, quiz_id, correct_answers, total_questions, score, completed_at
            "#,
        )
        .bind(result.user_id)
        .bind(result.company_id)
        .bind(result.quiz_id)
        .bind(result.correct_answers)
        .bind(result.total_questions)
        .bind(result.score)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn latest_completion(&self, user_id: i64, quiz_id: i64) -> Result<Option<DateTime<Utc>>> {
        let last: Option<DateTime<Utc>> = sqlx::query_scalar(
            r#"SELECT MAX(completed_at) FROM quiz_results WHERE user_id = $1 AND quiz_id = $2"#,
        )
        .bind(user_id)
        .bind(quiz_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(last)
    }

    async fn all_for(&self, scope: ResultScope, range: DateRange) -> Result<Vec<ScoreRecord>> {
        let rows = match scope {
            ResultScope::Company(company_id) => {
                sqlx::query_as::<_, ScoreRecord>(
                    r#"
                    SELECT qr.user_id AS subject_id, qr.completed_at, qr.score
                    FROM quiz_results qr
                    JOIN members m ON m.user_id = qr.user_id AND m.company_id = qr.company_id
                    WHERE qr.company_id = $1
                      AND ($2::timestamptz IS NULL OR qr.completed_at >= $2)
                      AND ($3::timestamptz IS NULL OR qr.completed_at <= $3)
                    ORDER BY qr.user_id, qr.completed_at
                    "#,
                )
                .bind(company_id)
                .bind(range.from)
                .bind(range.to)
                .fetch_all(&self.pool)
                .await?
            }
            ResultScope::User { user_id, company_id } => {
                sqlx::query_as::<_, ScoreRecord>(
                    r#"
                    SELECT quiz_id AS subject_id, completed_at, score
                    FROM quiz_results
                    WHERE user_id = $1
                      AND ($2::bigint IS NULL OR company_id = $2)
                      AND ($3::timestamptz IS NULL OR completed_at >= $3)
                      AND ($4::timestamptz IS NULL OR completed_at <= $4)
                    ORDER BY completed_at
                    "#,
                )
                .bind(user_id)
                .bind(company_id)
                .bind(range.from)
                .bind(range.to)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }
}
