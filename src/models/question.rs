use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const MIN_ANSWER_OPTIONS: usize = 2;
pub const MAX_ANSWER_OPTIONS: usize = 4;

/// A company-owned question. `correct_answers` holds option positions
/// rendered as strings (`"0"`, `"2"`, ...), which is also the form the
/// grader compares submissions against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub answer_options: Vec<String>,
    pub correct_answers: Vec<String>,
    pub company_id: i64,
}

/// Checks the structural invariants of an answer key: 2-4 options, at least
/// one correct entry, and every correct entry naming an existing option.
/// Returns the key in canonical form (`" 01"` becomes `"1"`), which is what
/// gets stored.
pub fn validate_answer_key(
    answer_options: &[String],
    correct_answers: &[String],
) -> Result<Vec<String>, String> {
    if answer_options.len() < MIN_ANSWER_OPTIONS || answer_options.len() > MAX_ANSWER_OPTIONS {
        return Err(format!(
            "Number of answer options must be between {} and {}.",
            MIN_ANSWER_OPTIONS, MAX_ANSWER_OPTIONS
        ));
    }
    if correct_answers.is_empty() {
        return Err("At least one correct answer is required.".to_string());
    }
    correct_answers
        .iter()
        .map(|entry| match entry.trim().parse::<usize>() {
            Ok(idx) if idx < answer_options.len() => Ok(idx.to_string()),
            _ => Err(format!(
                "Correct answer '{}' is not a valid index of the answer options.",
                entry
            )),
        })
        .collect()
}
