use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::auth::dto::RegisterRequest;
use crate::error::AppError;
use crate::users::repo_types::Role;

pub(crate) const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim, and treat blank as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// For clearable fields: absent keeps the stored value, blank clears it.
pub(crate) fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| non_blank(Some(v)))
}

/// Registration input after validation; the password is still plain text.
#[derive(Debug)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub phone: Option<String>,
}

pub fn validate_registration(
    payload: RegisterRequest,
    allow_admin: bool,
) -> Result<Registration, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".into()));
    }

    let email = normalize_email(&payload.email);
    if !is_valid_email(&email) {
        return Err(AppError::BadRequest("Invalid email".into()));
    }

    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest("Password too short".into()));
    }

    let role: Role = payload
        .role
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid role".into()))?;
    if role == Role::Admin && !allow_admin {
        return Err(AppError::BadRequest("Invalid role".into()));
    }

    Ok(Registration {
        name,
        email,
        password: payload.password,
        role,
        phone: non_blank(payload.phone),
    })
}

/// Where the frontend goes right after registering.
pub fn register_redirect(role: Role, user_id: Uuid) -> String {
    match role {
        Role::Tutor => format!("/dashboard/{}", user_id),
        _ => "/".to_string(),
    }
}

/// Where the frontend goes right after logging in.
pub fn login_redirect(role: Role, user_id: Uuid) -> String {
    match role {
        Role::Admin => "/admin/sageup-dashboard".to_string(),
        Role::Tutor | Role::Institute => format!("/dashboard/{}", user_id),
        Role::Student => "/student/dashboard".to_string(),
    }
}
