//! Collaborators the scoring, analytics and sweep code depend on.
//!
//! Each trait is implemented by a Postgres or Redis adapter in this module and
//! injected into the services as `Arc<dyn Trait>` by [`crate::AppState`].

pub mod answer_keys;
pub mod members;
pub mod results;
pub mod transcripts;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::member::Member;
use crate::models::question::Question;
use crate::models::quiz::Quiz;
use crate::models::quiz_result::{DateRange, NewQuizResult, QuizResult, ResultScope, ScoreRecord};
use crate::models::transcript::{AttemptTranscript, TranscriptKey};

/// Read-only source of quizzes and their answer keys.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerKeyStore: Send + Sync {
    async fn get_quiz(&self, quiz_id: i64) -> Result<Option<Quiz>>;

    /// Returns the questions with the given ids in no particular order.
    async fn get_questions(&self, ids: &[i64]) -> Result<Vec<Question>>;

    async fn list_quizzes(&self) -> Result<Vec<Quiz>>;
}

/// Append-only ledger of graded attempts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persists a result, assigning its id and completion time.
    async fn append(&self, result: NewQuizResult) -> Result<QuizResult>;

    async fn latest_completion(&self, user_id: i64, quiz_id: i64) -> Result<Option<DateTime<Utc>>>;

    async fn all_for(&self, scope: ResultScope, range: DateRange) -> Result<Vec<ScoreRecord>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn list_members(&self, company_id: i64) -> Result<Vec<Member>>;

    async fn find_member(&self, user_id: i64, company_id: i64) -> Result<Option<Member>>;

    async fn user_exists(&self, user_id: i64) -> Result<bool>;
}

/// Short-lived store of attempt transcripts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptCache: Send + Sync {
    /// Writes the transcript under its key, replacing any previous one.
    async fn put(&self, transcript: &AttemptTranscript, ttl: Duration) -> Result<()>;

    async fn get(&self, key: TranscriptKey) -> Result<Option<AttemptTranscript>>;

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<AttemptTranscript>>;

    async fn list_for_quiz(&self, quiz_id: i64) -> Result<Vec<AttemptTranscript>>;

    async fn ping(&self) -> Result<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_incomplete(&self, user_id: i64, quiz_id: i64) -> Result<()>;

    async fn notify_new_quiz(&self, company_id: i64, quiz_id: i64) -> Result<()>;
}

/// The collaborator handles shared by every service.
#[derive(Clone)]
pub struct Stores {
    pub answer_keys: Arc<dyn AnswerKeyStore>,
    pub results: Arc<dyn ResultStore>,
    pub members: Arc<dyn MemberStore>,
    pub transcripts: Arc<dyn TranscriptCache>,
    pub notifier: Arc<dyn Notifier>,
}
