use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use crate::db::PgStore;
use crate::profiles::repo_types::{Profile, ProfileStatus};

#[async_trait]
pub trait ProfileRepo: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Profile>>;

    /// Newest first.
    async fn list_by_status(
        &self,
        status: ProfileStatus,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Profile>>;

    async fn set_status(&self, id: Uuid, status: ProfileStatus) -> anyhow::Result<Option<Profile>>;
}

#[async_trait]
impl ProfileRepo for PgStore {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, kind, contact_phone, contact_email, status,
                   created_at, updated_at
              FROM profiles
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find profile by id")?;
        Ok(profile)
    }

    async fn list_by_status(
        &self,
        status: ProfileStatus,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Profile>> {
        let rows = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, kind, contact_phone, contact_email, status,
                   created_at, updated_at
              FROM profiles
             WHERE status = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("list profiles by status")?;
        Ok(rows)
    }

    async fn set_status(&self, id: Uuid, status: ProfileStatus) -> anyhow::Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
               SET status = $2, updated_at = now()
             WHERE id = $1
            RETURNING id, user_id, kind, contact_phone, contact_email, status,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.db)
        .await
        .context("set profile status")?;
        Ok(profile)
    }
}
