use std::str::FromStr;

use anyhow::{Context, Result, anyhow};

use super::config_model::{AdminSecret, BackendServer, Database, DotEnvyConfig};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();
    from_lookup(|key| std::env::var(key).ok())
}

pub fn from_lookup<F>(lookup: F) -> Result<DotEnvyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let backend_server = BackendServer {
        port: required(&lookup, "SERVER_PORT")?,
        body_limit: required(&lookup, "SERVER_BODY_LIMIT")?,
        timeout: required(&lookup, "SERVER_TIMEOUT")?,
    };

    let database = Database {
        url: required(&lookup, "DATABASE_URL")?,
        max_connections: optional(&lookup, "DATABASE_MAX_CONNECTIONS")?
            .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        run_migrations: optional(&lookup, "RUN_MIGRATIONS")?.unwrap_or(true),
    };

    let admin = AdminSecret {
        secret: required(&lookup, "JWT_ADMIN_SECRET")?,
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        admin,
    })
}

fn required<F, T>(lookup: &F, key: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional(lookup, key)?.ok_or_else(|| anyhow!("{key} is not set"))
}

fn optional<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| anyhow!("{err}"))
            .with_context(|| format!("{key} is invalid")),
        _ => Ok(None),
    }
}
