//! Monday-to-Sunday trend bucketing shared by every weekly report.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::models::quiz_result::ScoreRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectAverage<S> {
    pub subject: S,
    pub average_score: f64,
    pub samples: usize,
}

/// One calendar week, `week_start` a Monday and `week_end` the following Sunday.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyBucket<S> {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    /// Sorted by subject.
    pub averages: Vec<SubjectAverage<S>>,
}

pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Every week from the Monday on or before `first` up to the week containing
/// `last`, as inclusive `(monday, sunday)` pairs.
pub fn week_spans(first: NaiveDate, last: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    let mut spans = Vec::new();
    let mut start = monday_of(first);
    while start <= last {
        spans.push((start, start + Duration::days(6)));
        start += Duration::weeks(1);
    }
    spans
}

/// Buckets `records` into calendar weeks and averages scores per subject.
///
/// `observe` pulls `(subject, completed_at, score)` out of a record; it is the
/// only thing that differs between the per-member and per-quiz reports.
/// Records are placed by their UTC calendar date, so a completion late on a
/// Sunday stays in that Sunday's week. Weeks with no records are omitted.
pub fn aggregate_by<T, S, F>(records: &[T], observe: F) -> Vec<WeeklyBucket<S>>
where
    S: Ord + Clone,
    F: Fn(&T) -> (S, DateTime<Utc>, f64),
{
    let observed: Vec<(S, NaiveDate, f64)> = records
        .iter()
        .map(|r| {
            let (subject, at, score) = observe(r);
            (subject, at.date_naive(), score)
        })
        .collect();

    let (Some(first), Some(last)) = (
        observed.iter().map(|(_, d, _)| *d).min(),
        observed.iter().map(|(_, d, _)| *d).max(),
    ) else {
        return Vec::new();
    };

    let spans = week_spans(first, last);
    let origin = spans[0].0;
    let mut weeks: Vec<BTreeMap<S, (f64, usize)>> = vec![BTreeMap::new(); spans.len()];
    for (subject, date, score) in observed {
        let index = ((date - origin).num_days() / 7) as usize;
        let acc = weeks[index].entry(subject).or_insert((0.0, 0));
        acc.0 += score;
        acc.1 += 1;
    }

    spans
        .into_iter()
        .zip(weeks)
        .filter(|(_, subjects)| !subjects.is_empty())
        .map(|((week_start, week_end), subjects)| WeeklyBucket {
            week_start,
            week_end,
            averages: subjects
                .into_iter()
                .map(|(subject, (sum, samples))| SubjectAverage {
                    subject,
                    average_score: sum / samples as f64,
                    samples,
                })
                .collect(),
        })
        .collect()
}

pub fn aggregate(records: &[ScoreRecord]) -> Vec<WeeklyBucket<i64>> {
    aggregate_by(records, |r| (r.subject_id, r.completed_at, r.score))
}
