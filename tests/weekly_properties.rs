use chrono::{Datelike, Duration, TimeZone, Utc, Weekday};
use proptest::prelude::*;
use proptest::test_runner::Config;
use quiz_backend::models::quiz_result::ScoreRecord;
use quiz_backend::services::weekly_aggregator::{aggregate, week_spans};

fn records() -> impl Strategy<Value = Vec<ScoreRecord>> {
    let origin = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    prop::collection::vec(
        (1_i64..6, 0_i64..(400 * 86_400), 0.0_f64..=100.0),
        1..60,
    )
    .prop_map(move |rows| {
        rows.into_iter()
            .map(|(subject_id, secs, score)| ScoreRecord {
                subject_id,
                completed_at: origin + Duration::seconds(secs),
                score,
            })
            .collect()
    })
}

#[test]
fn empty_input_is_empty_output() {
    assert!(aggregate(&[]).is_empty());
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn every_record_lands_in_exactly_one_week(rows in records()) {
        let buckets = aggregate(&rows);
        for r in &rows {
            let day = r.completed_at.date_naive();
            let hits = buckets
                .iter()
                .filter(|b| b.week_start <= day && day <= b.week_end)
                .count();
            prop_assert_eq!(hits, 1);
        }
        let samples: usize = buckets
            .iter()
            .flat_map(|b| b.averages.iter().map(|a| a.samples))
            .sum();
        prop_assert_eq!(samples, rows.len());
    }

    #[test]
    fn weeks_are_monday_to_sunday_and_ordered(rows in records()) {
        let buckets = aggregate(&rows);
        for b in &buckets {
            prop_assert_eq!(b.week_start.weekday(), Weekday::Mon);
            prop_assert_eq!(b.week_end - b.week_start, Duration::days(6));
        }
        for pair in buckets.windows(2) {
            prop_assert!(pair[0].week_end < pair[1].week_start);
            prop_assert_eq!((pair[1].week_start - pair[0].week_start).num_days() % 7, 0);
        }
    }

    #[test]
    fn spans_are_contiguous(rows in records()) {
        let first = rows.iter().map(|r| r.completed_at.date_naive()).min().unwrap();
        let last = rows.iter().map(|r| r.completed_at.date_naive()).max().unwrap();
        let spans = week_spans(first, last);
        prop_assert!(spans[0].0 <= first);
        prop_assert!(last <= spans[spans.len() - 1].1);
        for pair in spans.windows(2) {
            prop_assert_eq!(pair[0].1 + Duration::days(1), pair[1].0);
        }
    }

    #[test]
    fn averages_are_plain_means(rows in records()) {
        for bucket in aggregate(&rows) {
            for avg in &bucket.averages {
                let scores: Vec<f64> = rows
                    .iter()
                    .filter(|r| r.subject_id == avg.subject)
                    .filter(|r| {
                        let d = r.completed_at.date_naive();
                        bucket.week_start <= d && d <= bucket.week_end
                    })
                    .map(|r| r.score)
                    .collect();
                let mean = scores.iter().sum::<f64>() / scores.len() as f64;
                prop_assert_eq!(scores.len(), avg.samples);
                prop_assert!((mean - avg.average_score).abs() < 1e-9);
            }
        }
    }
}
