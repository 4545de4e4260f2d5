use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "profile_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    PrivateTutor,
    Institute,
}

/// Admin review state. New profiles start out `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "profile_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    Pending,
    Approved,
    Rejected,
}

/// Public tutor/institute record, owned by exactly one user.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: ProfileKind,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub status: ProfileStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewProfile {
    pub kind: ProfileKind,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
}

impl NewProfile {
    pub fn private_tutor(phone: Option<String>, email: String) -> Self {
        Self {
            kind: ProfileKind::PrivateTutor,
            contact_phone: phone,
            contact_email: Some(email),
        }
    }
}
