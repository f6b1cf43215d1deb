use anyhow::{Context, Result};

pub const DEFAULT_SEASON: &str = "2025-W52";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    /// Shared secret for the admin import endpoint. `None` when unset or blank.
    pub admin_key: Option<String>,
    pub default_season: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            database_max_connections: match std::env::var("DATABASE_MAX_CONNECTIONS") {
                Ok(value) => value
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a number")?,
                Err(_) => DEFAULT_MAX_CONNECTIONS,
            },
            admin_key: std::env::var("ADMIN_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            default_season: std::env::var("DEFAULT_SEASON")
                .ok()
                .map(|season| season.trim().to_string())
                .filter(|season| !season.is_empty())
                .unwrap_or_else(|| DEFAULT_SEASON.to_string()),
        })
    }
}
