//! In-memory repositories for router tests.

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::profiles::{
    repo::ProfileRepo,
    repo_types::{NewProfile, Profile, ProfileStatus},
};
use crate::users::{
    repo::UserRepo,
    repo_types::{CreateUserError, NewUser, User, UserPatch},
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    profiles: Vec<Profile>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(
        &self,
        user: NewUser,
        profile: Option<NewProfile>,
    ) -> Result<User, CreateUserError> {
        let mut t = self.tables.write().await;
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(CreateUserError::EmailTaken);
        }

        let now = OffsetDateTime::now_utc();
        let mut created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            phone: user.phone,
            profile_picture: None,
            profile_id: None,
            created_at: now,
            updated_at: now,
        };

        if let Some(p) = profile {
            let profile = Profile {
                id: Uuid::new_v4(),
                user_id: created.id,
                kind: p.kind,
                contact_phone: p.contact_phone,
                contact_email: p.contact_email,
                status: ProfileStatus::Pending,
                created_at: now,
                updated_at: now,
            };
            created.profile_id = Some(profile.id);
            t.profiles.push(profile);
        }

        t.users.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> anyhow::Result<Option<User>> {
        let mut t = self.tables.write().await;
        let Some(user) = t.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(phone) = patch.phone {
            user.phone = phone;
        }
        if let Some(picture) = patch.profile_picture {
            user.profile_picture = picture;
        }
        user.updated_at = OffsetDateTime::now_utc();
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl ProfileRepo for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Profile>> {
        let t = self.tables.read().await;
        Ok(t.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn list_by_status(
        &self,
        status: ProfileStatus,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Profile>> {
        let t = self.tables.read().await;
        let mut rows: Vec<Profile> = t
            .profiles
            .iter()
            .filter(|p| p.status == status)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn set_status(&self, id: Uuid, status: ProfileStatus) -> anyhow::Result<Option<Profile>> {
        let mut t = self.tables.write().await;
        let Some(profile) = t.profiles.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        profile.status = status;
        profile.updated_at = OffsetDateTime::now_utc();
        Ok(Some(profile.clone()))
    }
}
