use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub photos_path: String,
    pub database_path: String,
    /// Shared secret for the admin endpoints. Left unset, admin access is
    /// disabled entirely.
    pub admin_key: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", "3000"),
            photos_path: try_load("PHOTOS_PATH", "data/photos.json"),
            database_path: try_load("DATABASE_PATH", "votes.db"),
            admin_key: env::var("ADMIN_KEY").ok().filter(|key| !key.is_empty()),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
