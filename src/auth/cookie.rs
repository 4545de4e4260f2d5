use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

pub const AUTH_COOKIE_NAME: &str = "authToken";

fn base(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .build()
}

/// Session cookie holding `token`; lives as long as the token does.
pub fn session_cookie(token: String, ttl: Duration, secure: bool) -> Cookie<'static> {
    let mut cookie = base(token, secure);
    cookie.set_max_age(ttl);
    cookie
}

/// Same name and attributes as the session cookie, already expired.
pub fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = base(String::new(), secure);
    cookie.make_removal();
    cookie
}

pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(AUTH_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
