use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::SubmissionPolicy;
use crate::error::{Error, Result};
use crate::models::question::Question;
use crate::models::quiz::Quiz;
use crate::models::quiz_result::{NewQuizResult, QuizResult};
use crate::models::submission::{AnswerSet, QuizSubmission};
use crate::models::transcript::{
    AttemptTranscript, QuestionTranscript, QuizSummary, TranscriptResponse,
};
use crate::stores::{AnswerKeyStore, ResultStore, TranscriptCache};

/// Outcome of matching one submission against its answer key.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedAttempt {
    pub correct_answers: usize,
    pub total_questions: usize,
    pub score: f64,
    pub questions: Vec<QuestionTranscript>,
}

/// Stringifies and sorts a set of answers so that selection order does not
/// matter but duplicates and extra selections do.
fn normalize<I, T>(answers: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: ToString,
{
    let mut normalized: Vec<String> = answers.into_iter().map(|a| a.to_string()).collect();
    normalized.sort();
    normalized
}

pub fn is_correct(question: &Question, response: &AnswerSet) -> bool {
    normalize(&question.correct_answers) == normalize(&response.selected_answers)
}

/// Grades `responses` against `questions`, both in quiz order.
///
/// Under [`SubmissionPolicy::Strict`] the counts must match. Under
/// [`SubmissionPolicy::Truncate`] only the overlapping prefix is graded and the
/// score is taken over the graded pairs. Zero graded pairs is an error.
pub fn grade_responses(
    questions: &[Question],
    responses: &[AnswerSet],
    policy: SubmissionPolicy,
) -> Result<GradedAttempt> {
    if policy == SubmissionPolicy::Strict && responses.len() != questions.len() {
        return Err(Error::Invalid(format!(
            "Expected {} answer sets, got {}.",
            questions.len(),
            responses.len()
        )));
    }

    let mut correct_answers = 0;
    let mut graded = Vec::with_capacity(questions.len().min(responses.len()));
    for (question, response) in questions.iter().zip(responses) {
        let correct = is_correct(question, response);
        if correct {
            correct_answers += 1;
        }
        graded.push(QuestionTranscript {
            question_text: question.text.clone(),
            question_answer_options: question.answer_options.clone(),
            response: TranscriptResponse {
                selected_answers: response
                    .selected_answers
                    .iter()
                    .map(|a| a.to_string())
                    .collect(),
                is_correct: correct,
            },
        });
    }

    let total_questions = graded.len();
    if total_questions == 0 {
        return Err(Error::NoGradedQuestions);
    }

    Ok(GradedAttempt {
        correct_answers,
        total_questions,
        score: correct_answers as f64 / total_questions as f64 * 100.0,
        questions: graded,
    })
}

/// Re-keys questions fetched in arbitrary order into the quiz's order.
pub fn order_questions(quiz: &Quiz, questions: Vec<Question>) -> Result<Vec<Question>> {
    let by_id: HashMap<i64, Question> = questions.into_iter().map(|q| (q.id, q)).collect();
    quiz.question_ids
        .iter()
        .map(|id| {
            by_id
                .get(id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Question {} not found", id)))
        })
        .collect()
}

#[derive(Clone)]
pub struct GradingService {
    answer_keys: Arc<dyn AnswerKeyStore>,
    results: Arc<dyn ResultStore>,
    transcripts: Arc<dyn TranscriptCache>,
    policy: SubmissionPolicy,
    transcript_ttl: Duration,
}

impl GradingService {
    pub fn new(
        answer_keys: Arc<dyn AnswerKeyStore>,
        results: Arc<dyn ResultStore>,
        transcripts: Arc<dyn TranscriptCache>,
        policy: SubmissionPolicy,
        transcript_ttl: Duration,
    ) -> Self {
        Self {
            answer_keys,
            results,
            transcripts,
            policy,
            transcript_ttl,
        }
    }

    /// Grades one attempt, appends its result to the ledger and caches the
    /// transcript. Nothing is written when grading itself fails.
    pub async fn grade(&self, submission: QuizSubmission) -> Result<QuizResult> {
        let quiz = self
            .answer_keys
            .get_quiz(submission.quiz_id)
            .await?
            .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))?;

        let fetched = self.answer_keys.get_questions(&quiz.question_ids).await?;
        let questions = order_questions(&quiz, fetched)?;
        let graded = grade_responses(&questions, &submission.responses, self.policy)?;

        let result = self
            .results
            .append(NewQuizResult {
                user_id: submission.user_id,
                company_id: quiz.company_id,
                quiz_id: quiz.id,
                correct_answers: graded.correct_answers as i32,
                total_questions: graded.total_questions as i32,
                score: graded.score,
            })
            .await?;

        let transcript = AttemptTranscript {
            questions: graded.questions,
            summary: QuizSummary {
                quiz_id: quiz.id,
                title: quiz.title,
                description: quiz.description,
                company_id: quiz.company_id,
                user_id: submission.user_id,
                correct_answers: result.correct_answers,
                total_questions: result.total_questions,
            },
        };
        if let Err(e) = self.transcripts.put(&transcript, self.transcript_ttl).await {
            tracing::error!(
                result_id = result.id,
                user_id = submission.user_id,
                quiz_id = quiz.id,
                error = %e,
                "result persisted but transcript cache write failed"
            );
            return Err(e);
        }

        tracing::info!(
            result_id = result.id,
            user_id = result.user_id,
            quiz_id = result.quiz_id,
            score = result.score,
            "quiz attempt graded"
        );
        Ok(result)
    }
}
