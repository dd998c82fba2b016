use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

const DEFAULT_CORS_ORIGINS: &str = r#"["http://localhost:5173","https://hrms-lemon-one.vercel.app"]"#;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,

    /// Origins the frontend is deployed on. The CORS layer still allows any origin.
    pub cors_origins: Vec<String>,

    // Rate limiting
    pub rate_per_min: u32,

    // Logging
    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://hrms.db?mode=rwc".to_string()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            cors_origins: parse_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            rate_per_min: parse_var("RATE_PER_MIN", 1000)?,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: parse_var("LOG_LEVEL", tracing::Level::INFO)?,
        })
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

/// Parses a literal list such as `["http://a", 'http://b']`.
/// Falls back to the built-in origins when the value is not a list.
pub fn parse_origins(raw: &str) -> Vec<String> {
    // single-quoted python style literals are accepted too
    let normalized = raw.trim().replace('\'', "\"");

    serde_json::from_str::<Vec<String>>(&normalized)
        .or_else(|_| serde_json::from_str(DEFAULT_CORS_ORIGINS))
        .unwrap_or_default()
}
