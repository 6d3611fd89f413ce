use anyhow::{bail, Context, Result};
use std::str::FromStr;

/// Application configuration loaded from environment variables.
/// Every variable has a default; provider credentials are never read from here,
/// callers supply them per request.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub reader_base_url: String,
    pub fetch_timeout_secs: u64,
    pub gemini_base_url: String,
    pub openai_base_url: String,
    pub session_ttl_minutes: i64,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            reader_base_url: "https://r.jina.ai".to_string(),
            fetch_timeout_secs: 15,
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            openai_base_url: "https://api.openai.com".to_string(),
            session_ttl_minutes: 120,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            reader_base_url: std::env::var("READER_BASE_URL")
                .unwrap_or(defaults.reader_base_url),
            fetch_timeout_secs: parse_env("FETCH_TIMEOUT_SECS", defaults.fetch_timeout_secs)?,
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or(defaults.gemini_base_url),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or(defaults.openai_base_url),
            session_ttl_minutes: check_session_ttl(parse_env(
                "SESSION_TTL_MINUTES",
                defaults.session_ttl_minutes,
            )?)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }
}

/// One week.
const MAX_SESSION_TTL_MINUTES: i64 = 7 * 24 * 60;

fn check_session_ttl(minutes: i64) -> Result<i64> {
    if !(1..=MAX_SESSION_TTL_MINUTES).contains(&minutes) {
        bail!(
            "Environment variable 'SESSION_TTL_MINUTES' must be between 1 and {MAX_SESSION_TTL_MINUTES}, got {minutes}"
        );
    }
    Ok(minutes)
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
