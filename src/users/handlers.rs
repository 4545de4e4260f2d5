use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        extractors::CurrentUser,
        services::{clearable, non_blank},
    },
    error::{AppError, AppResult},
    extract::AppJson,
    state::AppState,
};

use super::{
    dto::{UpdateProfileRequest, UserResponse},
    repo_types::UserPatch,
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).patch(update_profile))
}

#[instrument(skip_all)]
pub async fn get_profile(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse {
        message: "Profile data",
        user,
    })
}

#[instrument(skip_all)]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    if matches!(&payload.name, Some(n) if n.trim().is_empty()) {
        return Err(AppError::BadRequest("Name must not be blank".into()));
    }

    let patch = UserPatch {
        name: non_blank(payload.name),
        phone: clearable(payload.phone),
        profile_picture: clearable(payload.profile_picture),
    };

    let updated = state
        .users
        .update(user.id, patch)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    info!(user_id = %updated.id, "user details updated");
    Ok(Json(UserResponse {
        message: "Profile updated",
        user: updated,
    }))
}
