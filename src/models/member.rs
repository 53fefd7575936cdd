use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub id: i64,
    pub company_id: i64,
    pub user_id: i64,
    pub is_admin: bool,
    pub status: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub member_type: String,
}
