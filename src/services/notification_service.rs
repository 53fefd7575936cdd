use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{Error, Result};
use crate::models::notification::Notification;
use crate::stores::Notifier;

const NOTIFICATION_COLUMNS: &str = "id, user_id, message, created_at, is_read";

pub fn incomplete_quiz_message(quiz_id: i64, window_hours: i64) -> String {
    format!(
        "Please complete the quiz with ID {}. You have not completed it in the last {} hours.",
        quiz_id, window_hours
    )
}

pub fn new_quiz_message(quiz_id: i64) -> String {
    format!(
        "A new quiz with ID {} is available in your company. Please complete it.",
        quiz_id
    )
}

/// In-app notifications stored in Postgres.
#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
    reminder_window_hours: i64,
}

impl NotificationService {
    pub fn new(pool: PgPool, reminder_window_hours: i64) -> Self {
        Self {
            pool,
            reminder_window_hours,
        }
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Notification>> {
        let rows = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {} FROM notifications WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
            NOTIFICATION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn mark_read(&self, notification_id: i64, user_id: i64) -> Result<Notification> {
        sqlx::query_as::<_, Notification>(&format!(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2 RETURNING {}",
            NOTIFICATION_COLUMNS
        ))
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Notification not found".to_string()))
    }
}

#[async_trait]
impl Notifier for NotificationService {
    async fn notify_incomplete(&self, user_id: i64, quiz_id: i64) -> Result<()> {
        sqlx::query("INSERT INTO notifications (user_id, message) VALUES ($1, $2)")
            .bind(user_id)
            .bind(incomplete_quiz_message(quiz_id, self.reminder_window_hours))
            .execute(&self.pool)
            .await?;
        tracing::debug!(user_id, quiz_id, "incomplete quiz reminder stored");
        Ok(())
    }

    async fn notify_new_quiz(&self, company_id: i64, quiz_id: i64) -> Result<()> {
        let sent = sqlx::query(
            "INSERT INTO notifications (user_id, message)
             SELECT user_id, $2 FROM members WHERE company_id = $1",
        )
        .bind(company_id)
        .bind(new_quiz_message(quiz_id))
        .execute(&self.pool)
        .await?
        .rows_affected();
        tracing::info!(company_id, quiz_id, recipients = sent, "new quiz announced");
        Ok(())
    }
}
