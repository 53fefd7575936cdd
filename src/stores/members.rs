use async_trait::async_trait;
use sqlx::PgPool;

use super::MemberStore;
use crate::error::Result;
use crate::models::member::Member;

#[derive(Clone)]
pub struct PgMemberStore {
    pool: PgPool,
}

impl PgMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberStore for PgMemberStore {
    async fn list_members(&self, company_id: i64) -> Result<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            r#"SELECT id, company_id, user_id, is_admin, status, type
               FROM members WHERE company_id = $1 ORDER BY id"#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    async fn find_member(&self, user_id: i64, company_id: i64) -> Result<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(
            r#"SELECT id, company_id, user_id, is_admin, status, type
               FROM members WHERE user_id = $1 AND company_id = $2"#,
        )
        .bind(user_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(member)
    }

    async fn user_exists(&self, user_id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)"#)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}
