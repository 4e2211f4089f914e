use std::{env, fmt::Display, fs::read_to_string, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "pyq-portal-demo-secret";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub client_dir: PathBuf,
    pub client_origins: Vec<String>,
    pub jwt_secret: String,
    pub production: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let client_origins: String = try_load("CLIENT_ORIGIN", "http://localhost:5173")?;
        let app_env: String = try_load("APP_ENV", "development")?;

        Ok(Self {
            port: try_load("PORT", "4000")?,
            data_dir: try_load("DATA_DIR", "data")?,
            public_dir: try_load("PUBLIC_DIR", "public")?,
            client_dir: try_load("CLIENT_DIR", "../client/dist")?,
            client_origins: split_origins(&client_origins),
            jwt_secret: read_secret("JWT_SECRET"),
            production: app_env.eq_ignore_ascii_case("production"),
        })
    }

    /// Defaults rooted at `root`, with no environment lookups.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        let root = root.into();

        Self {
            port: 4000,
            data_dir: root.join("data"),
            public_dir: root.join("public"),
            client_dir: root.join("client/dist"),
            client_origins: vec!["http://localhost:5173".to_string()],
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            production: false,
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    parse(key, &value)
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    value.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");

        ConfigError::Invalid {
            key: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

fn split_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Docker secret first, then the plain environment variable, then the demo secret.
fn read_secret(secret_name: &str) -> String {
    let path = format!("/run/secrets/{secret_name}");

    if let Ok(secret) = read_to_string(&path) {
        return secret.trim().to_string();
    }

    var(secret_name).unwrap_or_else(|| {
        warn!("{secret_name} not found in {path} or the environment, using the demo secret");
        DEFAULT_JWT_SECRET.to_string()
    })
}
