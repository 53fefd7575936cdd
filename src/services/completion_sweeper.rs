use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::error::Result;
use crate::stores::{AnswerKeyStore, MemberStore, Notifier, ResultStore};

/// Reminds company members about quizzes they have not completed recently.
#[derive(Clone)]
pub struct CompletionSweeper {
    answer_keys: Arc<dyn AnswerKeyStore>,
    members: Arc<dyn MemberStore>,
    results: Arc<dyn ResultStore>,
    notifier: Arc<dyn Notifier>,
    window: Duration,
}

/// A reminder is due when the user never completed the quiz or the last
/// completion is strictly older than `window`.
pub fn is_due(last_completion: Option<DateTime<Utc>>, now: DateTime<Utc>, window: Duration) -> bool {
    match last_completion {
        None => true,
        Some(last) => now - last > window,
    }
}

impl CompletionSweeper {
    pub fn new(
        answer_keys: Arc<dyn AnswerKeyStore>,
        members: Arc<dyn MemberStore>,
        results: Arc<dyn ResultStore>,
        notifier: Arc<dyn Notifier>,
        window: Duration,
    ) -> Self {
        Self {
            answer_keys,
            members,
            results,
            notifier,
            window,
        }
    }

    pub async fn sweep(&self) -> Result<usize> {
        self.sweep_at(Utc::now()).await
    }

    /// Runs one cycle as of `now` and returns the number of reminders sent.
    ///
    /// Any store or notifier error aborts the cycle; reminders already sent
    /// in this cycle are not rolled back.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> Result<usize> {
        let quizzes = self.answer_keys.list_quizzes().await?;
        let mut sent = 0;

        for quiz in &quizzes {
            let members = self.members.list_members(quiz.company_id).await?;
            for member in members {
                if !self.members.user_exists(member.user_id).await? {
                    tracing::warn!(
                        user_id = member.user_id,
                        company_id = member.company_id,
                        "membership references a missing user, skipping"
                    );
                    continue;
                }

                let last = self
                    .results
                    .latest_completion(member.user_id, quiz.id)
                    .await?;
                if is_due(last, now, self.window) {
                    self.notifier
                        .notify_incomplete(member.user_id, quiz.id)
                        .await?;
                    sent += 1;
                }
            }
        }

        tracing::info!(quizzes = quizzes.len(), reminders = sent, "completion sweep finished");
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::member::Member;
    use crate::models::quiz::Quiz;
    use crate::stores::{MockAnswerKeyStore, MockMemberStore, MockNotifier, MockResultStore};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 0, 1, 0).unwrap()
    }

    fn one_quiz() -> MockAnswerKeyStore {
        let mut keys = MockAnswerKeyStore::new();
        keys.expect_list_quizzes().returning(|| {
            Ok(vec![Quiz {
                id: 5,
                title: "Safety".into(),
                description: "Yearly refresher".into(),
                question_ids: vec![1, 2],
                usage_count: 0,
                company_id: 9,
            }])
        });
        keys
    }

    fn one_member(exists: bool) -> MockMemberStore {
        let mut members = MockMemberStore::new();
        members.expect_list_members().returning(|company_id| {
            Ok(vec![Member {
                id: 1,
                company_id,
                user_id: 77,
                is_admin: false,
                status: "active".into(),
                member_type: "member".into(),
            }])
        });
        members.expect_user_exists().returning(move |_| Ok(exists));
        members
    }

    fn completed(at: Option<DateTime<Utc>>) -> MockResultStore {
        let mut results = MockResultStore::new();
        results
            .expect_latest_completion()
            .returning(move |_, _| Ok(at));
        results
    }

    fn sweeper(
        members: MockMemberStore,
        results: MockResultStore,
        notifier: MockNotifier,
    ) -> CompletionSweeper {
        CompletionSweeper::new(
            Arc::new(one_quiz()),
            Arc::new(members),
            Arc::new(results),
            Arc::new(notifier),
            Duration::hours(24),
        )
    }

    #[tokio::test]
    async fn never_completed_is_notified_once() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_incomplete()
            .withf(|user, quiz| *user == 77 && *quiz == 5)
            .times(1)
            .returning(|_, _| Ok(()));
        let sent = sweeper(one_member(true), completed(None), notifier)
            .sweep_at(now())
            .await
            .unwrap();
        assert_eq!(sent, 1);
    }

    #[tokio::test]
    async fn completed_an_hour_ago_is_not_notified() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify_incomplete().never();
        let sent = sweeper(
            one_member(true),
            completed(Some(now() - Duration::hours(1))),
            notifier,
        )
        .sweep_at(now())
        .await
        .unwrap();
        assert_eq!(sent, 0);
    }

    #[tokio::test]
    async fn completed_25_hours_ago_is_notified() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_incomplete()
            .times(1)
            .returning(|_, _| Ok(()));
        let sent = sweeper(
            one_member(true),
            completed(Some(now() - Duration::hours(25))),
            notifier,
        )
        .sweep_at(now())
        .await
        .unwrap();
        assert_eq!(sent, 1);
    }

    #[tokio::test]
    async fn missing_user_is_skipped() {
        let mut results = MockResultStore::new();
        results.expect_latest_completion().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_notify_incomplete().never();
        let sent = sweeper(one_member(false), results, notifier)
            .sweep_at(now())
            .await
            .unwrap();
        assert_eq!(sent, 0);
    }

    #[tokio::test]
    async fn store_failure_aborts_the_cycle() {
        let mut results = MockResultStore::new();
        results
            .expect_latest_completion()
            .returning(|_, _| Err(Error::Internal("connection reset".into())));
        let mut notifier = MockNotifier::new();
        notifier.expect_notify_incomplete().never();
        let err = sweeper(one_member(true), results, notifier)
            .sweep_at(now())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }

    #[test]
    fn exactly_one_window_old_is_not_due() {
        let window = Duration::hours(24);
        assert!(!is_due(Some(now() - window), now(), window));
        assert!(is_due(Some(now() - window - Duration::seconds(1)), now(), window));
    }
}
