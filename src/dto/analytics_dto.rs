use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::models::quiz_result::DateRange;
use crate::services::weekly_aggregator::WeeklyBucket;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DateRangeQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl From<DateRangeQuery> for DateRange {
    fn from(q: DateRangeQuery) -> Self {
        DateRange { from: q.from, to: q.to }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AverageScoreResponse {
    pub user_id: i64,
    pub average_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct QuizScoreSummary {
    pub quiz_id: i64,
    pub average_score: f64,
    pub first_completed_at: DateTime<Utc>,
    pub last_completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct QuizCompletion {
    pub quiz_id: i64,
    pub last_completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MemberCompletion {
    pub user_id: i64,
    pub last_completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserScore {
    pub user_id: i64,
    pub average_score: f64,
}

/// One week of a company's per-member trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeeklyScores {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub user_scores: Vec<UserScore>,
}

impl From<WeeklyBucket<i64>> for WeeklyScores {
    fn from(bucket: WeeklyBucket<i64>) -> Self {
        Self {
            week_start: bucket.week_start,
            week_end: bucket.week_end,
            user_scores: bucket
                .averages
                .into_iter()
                .map(|a| UserScore {
                    user_id: a.subject,
                    average_score: a.average_score,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuizScore {
    pub quiz_id: i64,
    pub average_score: f64,
}

/// One week of a single user's per-quiz trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserQuizWeeklyScores {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub quiz_scores: Vec<QuizScore>,
}

impl From<WeeklyBucket<i64>> for UserQuizWeeklyScores {
    fn from(bucket: WeeklyBucket<i64>) -> Self {
        Self {
            week_start: bucket.week_start,
            week_end: bucket.week_end,
            quiz_scores: bucket
                .averages
                .into_iter()
                .map(|a| QuizScore {
                    quiz_id: a.subject,
                    average_score: a.average_score,
                })
                .collect(),
        }
    }
}
