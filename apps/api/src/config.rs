use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{RetryPolicy, DEFAULT_ENDPOINT};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Unset means the in-memory store.
    pub redis_url: Option<String>,
    pub generation_url: String,
    pub retry_policy: RetryPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = RetryPolicy::default();
        let retry_policy = RetryPolicy {
            timeout: Duration::from_millis(parse_or(
                "GENERATION_TIMEOUT_MS",
                var("GENERATION_TIMEOUT_MS"),
                defaults.timeout.as_millis() as u64,
            )?),
            max_retries: parse_or(
                "GENERATION_MAX_RETRIES",
                var("GENERATION_MAX_RETRIES"),
                defaults.max_retries,
            )?,
            base_backoff: Duration::from_millis(parse_or(
                "GENERATION_BACKOFF_MS",
                var("GENERATION_BACKOFF_MS"),
                defaults.base_backoff.as_millis() as u64,
            )?),
            backoff_multiplier: parse_or(
                "GENERATION_BACKOFF_MULTIPLIER",
                var("GENERATION_BACKOFF_MULTIPLIER"),
                defaults.backoff_multiplier,
            )?,
        };

        Ok(Config {
            port: parse_or("PORT", var("PORT"), 8080)?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            redis_url: var("REDIS_URL"),
            generation_url: var("GENERATION_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            retry_policy,
        })
    }
}

/// Non-empty value of `key`, if set.
fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{value}'")),
        None => Ok(default),
    }
}
