use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const MIN_QUIZ_QUESTIONS: usize = 2;

/// A quiz lists at least two questions, each exactly once.
pub fn validate_question_ids(question_ids: &[i64]) -> Result<(), String> {
    let mut seen = std::collections::HashSet::with_capacity(question_ids.len());
    if let Some(dup) = question_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(format!("Question {} is listed more than once.", dup));
    }
    if question_ids.len() < MIN_QUIZ_QUESTIONS {
        return Err(format!(
            "A quiz needs at least {} distinct questions.",
            MIN_QUIZ_QUESTIONS
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Question ids in presentation order; submissions are graded in this order.
    pub question_ids: Vec<i64>,
    pub usage_count: i32,
    pub company_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_ids_are_rejected() {
        let err = validate_question_ids(&[1, 2, 1]).unwrap_err();
        assert!(err.contains("Question 1"));
    }

    #[test]
    fn needs_two_questions() {
        assert!(validate_question_ids(&[4]).is_err());
        assert!(validate_question_ids(&[4, 5]).is_ok());
    }
}
