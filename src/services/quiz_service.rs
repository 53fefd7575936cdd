use std::sync::Arc;

use sqlx::PgPool;
use validator::Validate;

use crate::dto::quiz_dto::{
    CreateQuizPayload, PageQuery, QuestionPayload, QuizWithQuestions, UpdateQuizPayload,
};
use crate::error::{Error, Result};
use crate::models::member::Member;
use crate::models::question::{validate_answer_key, Question};
use crate::models::quiz::{validate_question_ids, Quiz};
use crate::services::grading_service::order_questions;
use crate::stores::{AnswerKeyStore, MemberStore, Notifier};

const QUIZ_COLUMNS: &str = "id, title, description, question_ids, usage_count, company_id";
const QUESTION_COLUMNS: &str = "id, text, answer_options, correct_answers, company_id";

/// Question bank and quiz catalog of each company.
#[derive(Clone)]
pub struct QuizService {
    pool: PgPool,
    answer_keys: Arc<dyn AnswerKeyStore>,
    members: Arc<dyn MemberStore>,
    notifier: Arc<dyn Notifier>,
}

impl QuizService {
    pub fn new(
        pool: PgPool,
        answer_keys: Arc<dyn AnswerKeyStore>,
        members: Arc<dyn MemberStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            pool,
            answer_keys,
            members,
            notifier,
        }
    }

    pub async fn require_member(&self, company_id: i64, user_id: i64) -> Result<Member> {
        self.members
            .find_member(user_id, company_id)
            .await?
            .ok_or_else(|| Error::Forbidden("You are not a member of this company".to_string()))
    }

    pub async fn require_admin(&self, company_id: i64, user_id: i64) -> Result<Member> {
        let member = self.require_member(company_id, user_id).await?;
        if !member.is_admin {
            return Err(Error::Forbidden(
                "Only company admins can manage quizzes".to_string(),
            ));
        }
        Ok(member)
    }

    pub async fn create_question(
        &self,
        company_id: i64,
        actor: i64,
        payload: QuestionPayload,
    ) -> Result<Question> {
        self.require_admin(company_id, actor).await?;
        payload.validate()?;
        let correct_answers =
            validate_answer_key(&payload.answer_options, &payload.correct_answers)
                .map_err(Error::Invalid)?;

        let question = sqlx::query_as::<_, Question>(&format!(
            "INSERT INTO questions (text, answer_options, correct_answers, company_id)
             VALUES ($1, $2, $3, $4) RETURNING {}",
            QUESTION_COLUMNS
        ))
        .bind(&payload.text)
        .bind(&payload.answer_options)
        .bind(&correct_answers)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(question_id = question.id, company_id, "question created");
        Ok(question)
    }

    pub async fn update_question(
        &self,
        company_id: i64,
        question_id: i64,
        actor: i64,
        payload: QuestionPayload,
    ) -> Result<Question> {
        self.require_admin(company_id, actor).await?;
        payload.validate()?;
        let correct_answers =
            validate_answer_key(&payload.answer_options, &payload.correct_answers)
                .map_err(Error::Invalid)?;

        sqlx::query_as::<_, Question>(&format!(
            "UPDATE questions SET text = $1, answer_options = $2, correct_answers = $3
             WHERE id = $4 AND company_id = $5 RETURNING {}",
            QUESTION_COLUMNS
        ))
        .bind(&payload.text)
        .bind(&payload.answer_options)
        .bind(&correct_answers)
        .bind(question_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Question not found".to_string()))
    }

    pub async fn list_questions(&self, company_id: i64, actor: i64) -> Result<Vec<Question>> {
        self.require_member(company_id, actor).await?;
        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {} FROM questions WHERE company_id = $1 ORDER BY id",
            QUESTION_COLUMNS
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    /// Every id must name an existing question of `company_id`, once.
    async fn ensure_questions_owned(&self, company_id: i64, question_ids: &[i64]) -> Result<()> {
        validate_question_ids(question_ids).map_err(Error::Invalid)?;
        let owned: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM questions WHERE id = ANY($1) AND company_id = $2",
        )
        .bind(question_ids)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;
        if owned as usize != question_ids.len() {
            return Err(Error::Invalid(
                "Every question must exist and belong to the quiz's company.".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn create_quiz(
        &self,
        company_id: i64,
        actor: i64,
        payload: CreateQuizPayload,
    ) -> Result<Quiz> {
        self.require_admin(company_id, actor).await?;
        payload.validate()?;
        self.ensure_questions_owned(company_id, &payload.question_ids)
            .await?;

        let quiz = sqlx::query_as::<_, Quiz>(&format!(
            "INSERT INTO quizzes (title, description, question_ids, company_id)
             VALUES ($1, $2, $3, $4) RETURNING {}",
            QUIZ_COLUMNS
        ))
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.question_ids)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;

        self.notifier.notify_new_quiz(company_id, quiz.id).await?;
        tracing::info!(quiz_id = quiz.id, company_id, "quiz created");
        Ok(quiz)
    }

    pub async fn list_quizzes(
        &self,
        company_id: i64,
        actor: i64,
        page: &PageQuery,
    ) -> Result<Vec<Quiz>> {
        self.require_member(company_id, actor).await?;
        let (skip, limit) = page.bounds();
        let quizzes = sqlx::query_as::<_, Quiz>(&format!(
            "SELECT {} FROM quizzes WHERE company_id = $1 ORDER BY id OFFSET $2 LIMIT $3",
            QUIZ_COLUMNS
        ))
        .bind(company_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(quizzes)
    }

    async fn find_company_quiz(&self, company_id: i64, quiz_id: i64) -> Result<Quiz> {
        sqlx::query_as::<_, Quiz>(&format!(
            "SELECT {} FROM quizzes WHERE id = $1 AND company_id = $2",
            QUIZ_COLUMNS
        ))
        .bind(quiz_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))
    }

    pub async fn get_quiz_with_questions(
        &self,
        company_id: i64,
        quiz_id: i64,
        actor: i64,
    ) -> Result<QuizWithQuestions> {
        self.require_member(company_id, actor).await?;
        let quiz = self.find_company_quiz(company_id, quiz_id).await?;
        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {} FROM questions WHERE id = ANY($1)",
            QUESTION_COLUMNS
        ))
        .bind(&quiz.question_ids)
        .fetch_all(&self.pool)
        .await?;
        let questions = order_questions(&quiz, questions)?;
        Ok(QuizWithQuestions::new(quiz, questions))
    }

    pub async fn update_quiz(
        &self,
        company_id: i64,
        quiz_id: i64,
        actor: i64,
        payload: UpdateQuizPayload,
    ) -> Result<Quiz> {
        self.require_admin(company_id, actor).await?;
        payload.validate()?;
        if let Some(ids) = &payload.question_ids {
            self.ensure_questions_owned(company_id, ids).await?;
        }
        let current = self.find_company_quiz(company_id, quiz_id).await?;
        let updated = apply_quiz_patch(current, payload);

        let quiz = sqlx::query_as::<_, Quiz>(&format!(
            "UPDATE quizzes SET title = $1, description = $2, question_ids = $3
             WHERE id = $4 AND company_id = $5 RETURNING {}",
            QUIZ_COLUMNS
        ))
        .bind(&updated.title)
        .bind(&updated.description)
        .bind(&updated.question_ids)
        .bind(quiz_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))?;
        Ok(quiz)
    }

    pub async fn delete_quiz(&self, company_id: i64, quiz_id: i64, actor: i64) -> Result<()> {
        self.require_admin(company_id, actor).await?;
        let deleted = sqlx::query("DELETE FROM quizzes WHERE id = $1 AND company_id = $2")
            .bind(quiz_id)
            .bind(company_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(Error::NotFound("Quiz not found".to_string()));
        }
        tracing::info!(quiz_id, company_id, "quiz deleted");
        Ok(())
    }

    /// Returns the quiz's company if `user_id` belongs to it.
    pub async fn check_member(&self, user_id: i64, quiz_id: i64) -> Result<i64> {
        let quiz = self
            .answer_keys
            .get_quiz(quiz_id)
            .await?
            .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))?;
        self.require_member(quiz.company_id, user_id).await?;
        Ok(quiz.company_id)
    }

    /// Bumps the usage counter. Routes call this from a detached task, so an
    /// increment still in flight at shutdown is lost.
    pub async fn record_usage(&self, quiz_id: i64) -> Result<()> {
        sqlx::query("UPDATE quizzes SET usage_count = usage_count + 1 WHERE id = $1")
            .bind(quiz_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn apply_quiz_patch(mut quiz: Quiz, patch: UpdateQuizPayload) -> Quiz {
    if let Some(title) = patch.title {
        quiz.title = title;
    }
    if let Some(description) = patch.description {
        quiz.description = description;
    }
    if let Some(question_ids) = patch.question_ids {
        quiz.question_ids = question_ids;
    }
    quiz
}
