use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::transcript::{AttemptTranscript, TranscriptKey};
use crate::stores::TranscriptCache;

/// Read side of the transcript cache.
#[derive(Clone)]
pub struct TranscriptService {
    transcripts: Arc<dyn TranscriptCache>,
}

impl TranscriptService {
    pub fn new(transcripts: Arc<dyn TranscriptCache>) -> Self {
        Self { transcripts }
    }

    /// The user's transcript for one quiz, or all of theirs still cached.
    pub async fn user_transcripts(
        &self,
        user_id: i64,
        quiz_id: Option<i64>,
    ) -> Result<Vec<AttemptTranscript>> {
        let found = match quiz_id {
            Some(quiz_id) => self
                .transcripts
                .get(TranscriptKey { user_id, quiz_id })
                .await?
                .into_iter()
                .collect(),
            None => self.transcripts.list_for_user(user_id).await?,
        };
        non_empty(found)
    }

    /// Cached transcripts of `quiz_id` taken within `company_id`, optionally for one user.
    pub async fn company_transcripts(
        &self,
        company_id: i64,
        quiz_id: i64,
        user_id: Option<i64>,
    ) -> Result<Vec<AttemptTranscript>> {
        let found = self
            .transcripts
            .list_for_quiz(quiz_id)
            .await?
            .into_iter()
            .filter(|t| t.summary.company_id == company_id)
            .filter(|t| user_id.map_or(true, |u| t.summary.user_id == u))
            .collect();
        non_empty(found)
    }
}

fn non_empty(transcripts: Vec<AttemptTranscript>) -> Result<Vec<AttemptTranscript>> {
    if transcripts.is_empty() {
        return Err(Error::NotFound("No quiz responses found".to_string()));
    }
    Ok(transcripts)
}
