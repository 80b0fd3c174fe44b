use anyhow::{Context, Result};

use super::config_model::{Database, DotEnvyConfig, Server};

pub const DEFAULT_APP_PORT: u16 = 8080;
pub const DEFAULT_BODY_LIMIT_MB: u64 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POOL_MAX_SIZE: u32 = 10;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    load_from(|key| std::env::var(key).ok())
}

/// Builds the config from an arbitrary key lookup so it can be exercised
/// without touching the process environment.
pub fn load_from<F>(lookup: F) -> Result<DotEnvyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

    let server = Server {
        port: parse_or(get("APP_PORT"), "APP_PORT", DEFAULT_APP_PORT)?,
        body_limit: parse_or(
            get("SERVER_BODY_LIMIT"),
            "SERVER_BODY_LIMIT",
            DEFAULT_BODY_LIMIT_MB,
        )?,
        timeout: parse_or(get("SERVER_TIMEOUT"), "SERVER_TIMEOUT", DEFAULT_TIMEOUT_SECS)?,
    };

    let database = Database {
        host: get_or("POSTGRES_HOST", "localhost"),
        port: parse_or(get("POSTGRES_PORT"), "POSTGRES_PORT", 5432)?,
        user: get_or("POSTGRES_USER", "postgres"),
        password: get_or("POSTGRES_PASSWORD", "postgres"),
        name: get_or("POSTGRES_DB", "bss"),
        ssl_mode: get_or("POSTGRES_SSLMODE", "disable"),
        pool_max_size: parse_or(
            get("POSTGRES_POOL_MAX_SIZE"),
            "POSTGRES_POOL_MAX_SIZE",
            DEFAULT_POOL_MAX_SIZE,
        )?,
        url_override: get("DATABASE_URL"),
    };

    Ok(DotEnvyConfig { server, database })
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} is invalid", key)),
        None => Ok(default),
    }
}
