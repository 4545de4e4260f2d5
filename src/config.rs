use anyhow::bail;
use serde::Deserialize;

pub const DEFAULT_TTL_MINUTES: i64 = 60 * 24 * 3;
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Marks session cookies `Secure`.
    pub production: bool,
    pub cors_origin: Option<String>,
    pub allow_admin_registration: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "sageup".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "sageup-users".into()),
            ttl_minutes: parse_ttl_minutes(std::env::var("JWT_TTL_MINUTES").ok())?,
        };
        let production = std::env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);
        let cors_origin = std::env::var("CORS_ORIGIN")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let allow_admin_registration = std::env::var("ALLOW_ADMIN_REGISTRATION")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Ok(Self {
            database_url,
            jwt,
            production,
            cors_origin,
            allow_admin_registration,
        })
    }
}

/// Unset falls back to three days; anything outside `1..=MAX_TTL_MINUTES`
/// aborts startup.
fn parse_ttl_minutes(raw: Option<String>) -> anyhow::Result<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TTL_MINUTES);
    };
    let minutes: i64 = raw
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("JWT_TTL_MINUTES {raw:?}: {e}"))?;
    if !(1..=MAX_TTL_MINUTES).contains(&minutes) {
        bail!("JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {minutes}");
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_defaults_to_three_days() {
        assert_eq!(parse_ttl_minutes(None).unwrap(), 4320);
        assert_eq!(parse_ttl_minutes(Some(" 90 ".into())).unwrap(), 90);
    }

    #[test]
    fn ttl_out_of_range_is_rejected() {
        assert!(parse_ttl_minutes(Some("0".into())).is_err());
        assert!(parse_ttl_minutes(Some("-5".into())).is_err());
        assert!(parse_ttl_minutes(Some("abc".into())).is_err());
        assert!(parse_ttl_minutes(Some(i64::MAX.to_string())).is_err());
        assert!(parse_ttl_minutes(Some((MAX_TTL_MINUTES + 1).to_string())).is_err());
        assert_eq!(
            parse_ttl_minutes(Some(MAX_TTL_MINUTES.to_string())).unwrap(),
            MAX_TTL_MINUTES
        );
    }
}
