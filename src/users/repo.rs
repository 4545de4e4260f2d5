use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use crate::db::PgStore;
use crate::profiles::repo_types::NewProfile;
use crate::users::repo_types::{CreateUserError, NewUser, User, UserPatch};

/// Credential store.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    /// Insert the user and, when given, its profile in one unit. The returned
    /// record already carries the linked profile id.
    async fn create(
        &self,
        user: NewUser,
        profile: Option<NewProfile>,
    ) -> Result<User, CreateUserError>;

    async fn update(&self, id: Uuid, patch: UserPatch) -> anyhow::Result<Option<User>>;
}

#[async_trait]
impl UserRepo for PgStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, phone, profile_picture,
                   profile_id, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, phone, profile_picture,
                   profile_id, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    async fn create(
        &self,
        user: NewUser,
        profile: Option<NewProfile>,
    ) -> Result<User, CreateUserError> {
        let mut tx = self.db.begin().await.context("begin tx")?;

        let mut created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, role, phone, profile_picture,
                      profile_id, created_at, updated_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.phone)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(p) = profile {
            let profile_id: Uuid = sqlx::query_scalar(
                r#"
                INSERT INTO profiles (user_id, kind, contact_phone, contact_email)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(created.id)
            .bind(p.kind)
            .bind(p.contact_phone)
            .bind(p.contact_email)
            .fetch_one(&mut *tx)
            .await
            .context("insert profile")?;

            created = sqlx::query_as::<_, User>(
                r#"
                UPDATE users
                   SET profile_id = $2, updated_at = now()
                 WHERE id = $1
                RETURNING id, name, email, password_hash, role, phone, profile_picture,
                          profile_id, created_at, updated_at
                "#,
            )
            .bind(created.id)
            .bind(profile_id)
            .fetch_one(&mut *tx)
            .await
            .context("link profile to user")?;
        }

        tx.commit().await.context("commit tx")?;
        Ok(created)
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET name = COALESCE($2, name),
                   phone = CASE WHEN $3 THEN $4 ELSE phone END,
                   profile_picture = CASE WHEN $5 THEN $6 ELSE profile_picture END,
                   updated_at = now()
             WHERE id = $1
            RETURNING id, name, email, password_hash, role, phone, profile_picture,
                      profile_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.phone.is_some())
        .bind(patch.phone.flatten())
        .bind(patch.profile_picture.is_some())
        .bind(patch.profile_picture.flatten())
        .fetch_optional(&self.db)
        .await
        .context("update user")?;
        Ok(user)
    }
}
