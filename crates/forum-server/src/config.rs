use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_LOG_FILTER: &str = "forum=debug,forum_api=debug,forum_db=info,tower_http=debug";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Read settings from the environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = lookup("FORUM_DB_PATH").unwrap_or_else(|| "forum.db".into());
        let host = lookup("FORUM_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("FORUM_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("FORUM_PORT is not a valid port: {raw}"))?,
            None => 8000,
        };

        Ok(Self {
            db_path: db_path.into(),
            host,
            port,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
