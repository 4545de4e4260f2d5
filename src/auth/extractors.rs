use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use super::{cookie::session_token, jwt::JwtKeys};
use crate::{
    error::AppError,
    state::AppState,
    users::repo_types::{Role, User},
};

/// The user behind the `authToken` cookie. Rejects with 401 when the cookie is
/// missing, the token does not verify, or the user no longer exists.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = session_token(&jar).ok_or(AppError::Unauthorized("Authentication required"))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(&token).map_err(|e| {
            warn!(error = %e, "auth token rejected");
            AppError::Unauthorized("Not authorized, token failed or expired")
        })?;

        let user = state.users.find_by_id(claims.id).await?.ok_or_else(|| {
            warn!(user_id = %claims.id, "auth token for unknown user");
            AppError::Unauthorized("User not found")
        })?;

        Ok(CurrentUser(user))
    }
}

/// A `CurrentUser` with the admin role; anyone else gets 403.
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            warn!(user_id = %user.id, role = user.role.as_str(), "admin route denied");
            return Err(AppError::Forbidden);
        }
        Ok(AdminUser(user))
    }
}
