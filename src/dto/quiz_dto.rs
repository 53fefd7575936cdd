use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::question::Question;
use crate::models::quiz::Quiz;
use crate::models::submission::AnswerSet;

pub const DEFAULT_PAGE_LIMIT: i64 = 10;
pub const MAX_PAGE_LIMIT: i64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct QuestionPayload {
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(length(min = 2, max = 4))]
    pub answer_options: Vec<String>,
    #[validate(length(min = 1))]
    pub correct_answers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateQuizPayload {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 2))]
    pub question_ids: Vec<i64>,
}

/// Partial update; absent fields are left as stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateQuizPayload {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 2))]
    pub question_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    /// `(offset, limit)` with defaults applied and the limit clamped.
    pub fn bounds(&self) -> (i64, i64) {
        let skip = self.skip.unwrap_or(0).max(0);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        (skip, limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizListResponse {
    pub items: Vec<Quiz>,
    pub skip: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizWithQuestions {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub usage_count: i32,
    pub company_id: i64,
    pub questions: Vec<Question>,
}

impl QuizWithQuestions {
    pub fn new(quiz: Quiz, questions: Vec<Question>) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            usage_count: quiz.usage_count,
            company_id: quiz.company_id,
            questions,
        }
    }
}

/// Answers for a quiz run, one set per question in quiz order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RunQuizPayload {
    #[validate(length(min = 1))]
    pub responses: Vec<AnswerSet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_apply_defaults_and_clamp() {
        assert_eq!(PageQuery::default().bounds(), (0, DEFAULT_PAGE_LIMIT));
        let wild = PageQuery {
            skip: Some(-5),
            limit: Some(10_000),
        };
        assert_eq!(wild.bounds(), (0, MAX_PAGE_LIMIT));
    }

    #[test]
    fn quiz_payload_needs_two_questions() {
        let payload = CreateQuizPayload {
            title: "Onboarding".into(),
            description: String::new(),
            question_ids: vec![1],
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn run_payload_accepts_indices_and_strings() {
        let payload: RunQuizPayload =
            serde_json::from_str(r#"{"responses":[{"selected_answers":[0,"2"]}]}"#).unwrap();
        let expected = AnswerSet {
            selected_answers: vec![0.into(), "2".into()],
        };
        assert_eq!(payload.responses[0], expected);
    }
}
