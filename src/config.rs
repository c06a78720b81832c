#![allow(dead_code)]

use std::env;

use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub environment: String,
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub http_timeout_seconds: u64,
    pub delinquency_display_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let api_base_url = normalize_base_url(&env_or("API_BASE_URL", "http://localhost:8000/api"))?;
        Ok(Self {
            app_name: env_or("APP_NAME", "HappyRentals Ledger"),
            environment: env_or("ENVIRONMENT", "development"),
            api_base_url,
            api_token: env_opt("API_TOKEN"),
            http_timeout_seconds: env_parse_or("HTTP_TIMEOUT_SECONDS", 30),
            delinquency_display_limit: env_parse_or("DELINQUENCY_DISPLAY_LIMIT", 10),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.trim().eq_ignore_ascii_case("production")
    }
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

fn env_parse_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    env_opt(key)
        .and_then(|raw| raw.parse::<T>().ok())
        .unwrap_or(default)
}

fn normalize_base_url(raw: &str) -> Result<String, AppError> {
    let mut base = raw.trim().to_string();
    while base.ends_with('/') && base.len() > 1 {
        base.pop();
    }
    Url::parse(&base)
        .map_err(|err| AppError::Config(format!("invalid API_BASE_URL {base:?}: {err}")))?;
    Ok(base)
}
