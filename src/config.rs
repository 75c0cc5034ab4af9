// src/config.rs
use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Postgres connection string. Without one the app keeps polls in memory.
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// URL prefix for every poll route, e.g. `/polls`. Empty means root.
    pub mount_path: String,
    /// Fill the in-memory store with a few demo polls on startup.
    pub seed_demo: bool,
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3030)?,
            database_url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            mount_path: normalize_mount_path(
                &lookup("POLLS_MOUNT_PATH").unwrap_or_else(|| "/polls".to_string()),
            ),
            seed_demo: parse_or(&lookup, "POLLS_SEED_DEMO", false)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
        },
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

/// `polls/`, `/polls/` and `/polls` all become `/polls`; `/` becomes empty.
pub fn normalize_mount_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3030);
        assert_eq!(config.database_url, None);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.mount_path, "/polls");
        assert!(!config.seed_demo);
        assert_eq!(config.bind_address(), "0.0.0.0:3030");
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/polls"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("POLLS_MOUNT_PATH", "/"),
            ("POLLS_SEED_DEMO", "true"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/polls")
        );
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.mount_path, "");
        assert!(config.seed_demo);
    }

    #[test]
    fn blank_database_url_means_memory() {
        let config = config_from(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn rejects_bad_port() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn rejects_bad_seed_flag() {
        let err = config_from(&[("POLLS_SEED_DEMO", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("POLLS_SEED_DEMO"));
    }

    #[test]
    fn mount_paths_are_normalized() {
        assert_eq!(normalize_mount_path("polls/"), "/polls");
        assert_eq!(normalize_mount_path("/polls/"), "/polls");
        assert_eq!(normalize_mount_path("/a/b"), "/a/b");
        assert_eq!(normalize_mount_path(""), "");
    }
}
