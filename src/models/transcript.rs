use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Cache key of a transcript; renders as `{user_id}:{quiz_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TranscriptKey {
    pub user_id: i64,
    pub quiz_id: i64,
}

impl fmt::Display for TranscriptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.user_id, self.quiz_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub selected_answers: Vec<String>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionTranscript {
    pub question_text: String,
    pub question_answer_options: Vec<String>,
    pub response: TranscriptResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuizSummary {
    pub quiz_id: i64,
    pub title: String,
    pub description: String,
    pub company_id: i64,
    pub user_id: i64,
    pub correct_answers: i32,
    pub total_questions: i32,
}

/// One element of the cached list. Readers of the cache depend on the
/// list-of-maps layout, with the `quiz_data` map always last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranscriptEntry {
    Question(QuestionTranscript),
    Summary { quiz_data: QuizSummary },
}

/// Per-question record of a single attempt plus its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<TranscriptEntry>", try_from = "Vec<TranscriptEntry>")]
pub struct AttemptTranscript {
    pub questions: Vec<QuestionTranscript>,
    pub summary: QuizSummary,
}

impl AttemptTranscript {
    pub fn key(&self) -> TranscriptKey {
        TranscriptKey {
            user_id: self.summary.user_id,
            quiz_id: self.summary.quiz_id,
        }
    }
}

impl From<AttemptTranscript> for Vec<TranscriptEntry> {
    fn from(transcript: AttemptTranscript) -> Self {
        let mut entries: Vec<TranscriptEntry> = transcript
            .questions
            .into_iter()
            .map(TranscriptEntry::Question)
            .collect();
        entries.push(TranscriptEntry::Summary {
            quiz_data: transcript.summary,
        });
        entries
    }
}

impl TryFrom<Vec<TranscriptEntry>> for AttemptTranscript {
    type Error = String;

    fn try_from(mut entries: Vec<TranscriptEntry>) -> Result<Self, Self::Error> {
        let summary = match entries.pop() {
            Some(TranscriptEntry::Summary { quiz_data }) => quiz_data,
            _ => return Err("transcript must end with a quiz_data summary".to_string()),
        };
        let questions = entries
            .into_iter()
            .map(|entry| match entry {
                TranscriptEntry::Question(q) => Ok(q),
                TranscriptEntry::Summary { .. } => {
                    Err("quiz_data summary may only appear last".to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { questions, summary })
    }
}
