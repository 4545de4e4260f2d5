use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        cookie::{cleared_session_cookie, session_cookie},
        dto::{
            LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
            RegisteredUser, SessionUser,
        },
        jwt::JwtKeys,
        password::{hash_password, verify_decoy, verify_password},
        services::{login_redirect, normalize_email, register_redirect, validate_registration},
    },
    error::{AppError, AppResult},
    extract::AppJson,
    profiles::repo_types::NewProfile,
    state::AppState,
    users::repo_types::{CreateUserError, NewUser, Role},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/refresh-token", post(refresh_token))
}

#[instrument(skip(state, jar, payload))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<RegisterResponse>)> {
    let reg = validate_registration(payload, state.config.allow_admin_registration).map_err(|e| {
        warn!(error = %e, "invalid registration");
        e
    })?;

    if state.users.find_by_email(&reg.email).await?.is_some() {
        warn!(email = %reg.email, "email already registered");
        return Err(AppError::BadRequest("User already exists".into()));
    }

    let password_hash = hash_password(&reg.password)?;
    let profile = (reg.role == Role::Tutor)
        .then(|| NewProfile::private_tutor(reg.phone.clone(), reg.email.clone()));

    let new_user = NewUser {
        name: reg.name,
        email: reg.email,
        password_hash,
        role: reg.role,
        phone: reg.phone,
    };
    let user = match state.users.create(new_user, profile).await {
        Ok(u) => u,
        Err(CreateUserError::EmailTaken) => {
            warn!("email registered concurrently");
            return Err(AppError::BadRequest("User already exists".into()));
        }
        Err(CreateUserError::Other(e)) => return Err(e.into()),
    };

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, user.role)?;
    let jar = jar.add(session_cookie(token, keys.ttl, state.config.production));

    info!(user_id = %user.id, role = user.role.as_str(), "user registered");
    Ok((
        StatusCode::CREATED,
        jar,
        Json(RegisterResponse {
            message: "User registered successfully and logged in",
            redirect_to: register_redirect(user.role, user.id),
            user: RegisteredUser {
                id: user.id,
                name: user.name,
                role: user.role,
                profile: user.profile_id,
            },
        }),
    ))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let email = normalize_email(&payload.email);

    let Some(user) = state.users.find_by_email(&email).await? else {
        verify_decoy(&payload.password);
        warn!(email = %email, "login unknown email");
        return Err(AppError::Unauthorized("Invalid credentials"));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid credentials"));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, user.role)?;
    let jar = jar.add(session_cookie(token, keys.ttl, state.config.production));

    info!(user_id = %user.id, role = user.role.as_str(), "user logged in");
    Ok((
        jar,
        Json(LoginResponse {
            message: "Login success",
            redirect_to: login_redirect(user.role, user.id),
            user: SessionUser {
                id: user.id,
                name: user.name,
                role: user.role,
            },
        }),
    ))
}

/// Sessions are stateless: logging out only expires the cookie.
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(cleared_session_cookie(state.config.production));
    (
        jar,
        Json(MessageResponse {
            message: "Logged out successfully",
        }),
    )
}

/// There is only one long-lived session cookie, so nothing can be refreshed.
pub async fn refresh_token() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse {
            message: "Token refresh is not supported. The authToken cookie is the session.",
        }),
    )
}
