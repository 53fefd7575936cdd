use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One graded attempt. Rows are append-only: never updated, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct QuizResult {
    pub id: i64,
    pub user_id: i64,
    pub company_id: i64,
    pub quiz_id: i64,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub score: f64,
    pub completed_at: DateTime<Utc>,
}

/// A result before the store has assigned its id and completion time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuizResult {
    pub user_id: i64,
    pub company_id: i64,
    pub quiz_id: i64,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub score: f64,
}

/// A `(subject, completed_at, score)` triple fed to the weekly aggregator.
/// The subject is a user id or a quiz id depending on the query scope.
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct ScoreRecord {
    pub subject_id: i64,
    pub completed_at: DateTime<Utc>,
    pub score: f64,
}

/// Which slice of the ledger to read for trend reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultScope {
    /// Results of every member of a company, keyed by user id.
    Company(i64),
    /// Results of a single user, keyed by quiz id, optionally limited to one company.
    User { user_id: i64, company_id: Option<i64> },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
