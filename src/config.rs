use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

/// Command line of the service.
#[derive(Debug, Parser)]
#[command(name = "accountd", about = "Account service")]
pub struct Cli {
    /// dotenv file loaded into the environment before configuration is read
    #[arg(long = "config-path", env = "CONFIG_PATH", default_value = ".env")]
    pub config_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = get("DATABASE_URL").context("DATABASE_URL is not set")?;
        let host = get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match get("APP_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("APP_PORT is not a valid port: {v}"))?,
            None => 8080,
        };
        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
