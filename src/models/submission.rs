use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// A selected answer as the client sent it: an option index or its string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SelectedAnswer {
    Index(i64),
    Text(String),
}

impl fmt::Display for SelectedAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectedAnswer::Index(i) => write!(f, "{}", i),
            SelectedAnswer::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for SelectedAnswer {
    fn from(value: i64) -> Self {
        SelectedAnswer::Index(value)
    }
}

impl From<&str> for SelectedAnswer {
    fn from(value: &str) -> Self {
        SelectedAnswer::Text(value.to_string())
    }
}

/// The answers chosen for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnswerSet {
    pub selected_answers: Vec<SelectedAnswer>,
}

impl AnswerSet {
    pub fn new<I, A>(answers: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<SelectedAnswer>,
    {
        Self {
            selected_answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

/// One user's attempt at one quiz; lives only for the duration of a grading call.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSubmission {
    pub quiz_id: i64,
    pub user_id: i64,
    /// One answer set per question, in the quiz's question order.
    pub responses: Vec<AnswerSet>,
}
