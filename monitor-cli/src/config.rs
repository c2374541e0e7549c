use anyhow::Result;
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "./data/messages.db";
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Monitor configuration, loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// SQLite file path, or `sqlite::memory:`.
    pub database_url: String,
    /// Optional log file; logs always go to stderr as well.
    pub log_file: Option<String>,
    pub default_page_size: i64,
}

impl MonitorConfig {
    /// Loads config from env. `database_url` overrides `DATABASE_URL` when given.
    pub fn load(database_url: Option<String>) -> Result<Self> {
        let database_url = database_url
            .or_else(|| env::var("DATABASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let log_file = env::var("LOG_FILE").ok().filter(|s| !s.is_empty());
        let default_page_size = env::var("DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|n: &i64| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        if database_url.trim().is_empty() {
            anyhow::bail!("DATABASE_URL must not be empty");
        }

        Ok(Self {
            database_url,
            log_file,
            default_page_size,
        })
    }
}
