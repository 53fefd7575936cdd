use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}
