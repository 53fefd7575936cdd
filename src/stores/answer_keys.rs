use async_trait::async_trait;
use sqlx::PgPool;

use super::AnswerKeyStore;
use crate::error::Result;
use crate::models::question::Question;
use crate::models::quiz::Quiz;

#[derive(Clone)]
pub struct PgAnswerKeyStore {
    pool: PgPool,
}

impl PgAnswerKeyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnswerKeyStore for PgAnswerKeyStore {
    async fn get_quiz(&self, quiz_id: i64) -> Result<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(
            r#"SELECT id, title, description, question_ids, usage_count, company_id
               FROM quizzes WHERE id = $1"#,
        )
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(quiz)
    }

    async fn get_questions(&self, ids: &[i64]) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"SELECT id, text, answer_options, correct_answers, company_id
               FROM questions WHERE id = ANY($1)"#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(
            r#"SELECT id, title, description, question_ids, usage_count, company_id
               FROM quizzes ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(quizzes)
    }
}
