mod accounts;
mod app;
mod config;
mod state;

use clap::Parser;

use crate::config::{AppConfig, Cli};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let dotenv_loaded = dotenvy::from_filename(&cli.config_path).is_ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "accountd=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    if !dotenv_loaded {
        tracing::debug!(path = %cli.config_path.display(), "no dotenv file loaded; using process environment");
    }

    let config = AppConfig::from_env()?;
    let addr = config.addr()?;
    let state = AppState::init(&config).await?;

    app::serve(app::build_app(state), addr).await
}
