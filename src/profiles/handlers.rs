use axum::{
    extract::State,
    routing::{get, patch},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::AdminUser,
    error::{AppError, AppResult},
    extract::{AppJson, AppPath, AppQuery},
    state::AppState,
};

use super::{
    dto::{AdminListQuery, Pagination, SetStatusRequest},
    repo_types::{Profile, ProfileStatus},
};

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/profiles", get(list_profiles))
        .route("/profiles/:id", get(get_profile))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/profiles", get(admin_list_profiles))
        .route("/admin/profiles/:id/status", patch(set_profile_status))
}

/// Approved profiles only.
#[instrument(skip(state))]
pub async fn list_profiles(
    State(state): State<AppState>,
    AppQuery(p): AppQuery<Pagination>,
) -> AppResult<Json<Vec<Profile>>> {
    let (limit, offset) = p.bounds();
    let rows = state
        .profiles
        .list_by_status(ProfileStatus::Approved, limit, offset)
        .await?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<Profile>> {
    match state.profiles.find_by_id(id).await? {
        Some(p) if p.status == ProfileStatus::Approved => Ok(Json(p)),
        _ => Err(AppError::NotFound("Profile not found")),
    }
}

#[instrument(skip(state))]
pub async fn admin_list_profiles(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    AppQuery(q): AppQuery<AdminListQuery>,
) -> AppResult<Json<Vec<Profile>>> {
    let status = q.status.unwrap_or(ProfileStatus::Pending);
    let (limit, offset) = q.pagination().bounds();
    let rows = state.profiles.list_by_status(status, limit, offset).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, admin, body))]
pub async fn set_profile_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<SetStatusRequest>,
) -> AppResult<Json<Profile>> {
    let profile = state
        .profiles
        .set_status(id, body.status)
        .await?
        .ok_or(AppError::NotFound("Profile not found"))?;

    info!(admin_id = %admin.id, profile_id = %profile.id, status = ?profile.status, "profile reviewed");
    Ok(Json(profile))
}
