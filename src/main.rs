//! handle-scout bot entry point

use handle_scout::bot::{self, AppState};
use handle_scout::{AppConfig, JsonFileStore};
use std::process;
use std::sync::Arc;
use teloxide::Bot;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    handle_scout::init()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    let token = match config.require_token() {
        Ok(token) => token.to_string(),
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            eprintln!(
                "No Telegram token found. Export TELEGRAM_BOT_API_TOKEN and re-run. Example:\n\
                 export TELEGRAM_BOT_API_TOKEN=123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11"
            );
            process::exit(1);
        }
    };

    if config.mock_mode {
        tracing::info!("Mock mode enabled: lookups return deterministic data");
    }

    let store = Arc::new(JsonFileStore::open(config.store_path.clone()));
    let state = Arc::new(AppState::new(config, store)?);
    let bot = Bot::new(token);

    tracing::info!(version = %handle_scout::VERSION, "Starting handle-scout");
    bot::run(bot, state).await;

    Ok(())
}
