//! Telegram front end

pub mod callbacks;
pub mod commands;
pub mod format;
pub mod keyboards;
pub mod text;

pub use commands::Command;

use crate::config::AppConfig;
use crate::error::Result;
use crate::profile::ProfileFetcher;
use crate::search::UsernameProber;
use crate::store::UserStore;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

/// Shared context injected into every handler
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn UserStore>,
    pub fetcher: ProfileFetcher,
    pub prober: UsernameProber,
}

impl AppState {
    /// Build the handler context; fails fast on invalid probe configuration
    pub fn new(config: AppConfig, store: Arc<dyn UserStore>) -> Result<Self> {
        let fetcher = ProfileFetcher::from_config(&config)?;
        let prober = UsernameProber::new(config.probe.concurrency, config.probe.timeout)?;
        Ok(Self {
            config,
            store,
            fetcher,
            prober,
        })
    }
}

/// Load a user's record, falling back to a fresh one when the store misfires
pub(crate) fn load_record(state: &AppState, user_id: u64) -> crate::store::UserRecord {
    match state.store.load(user_id) {
        Ok(Some(record)) => record,
        Ok(None) => crate::store::UserRecord::default(),
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "Failed to load user record");
            crate::store::UserRecord::default()
        }
    }
}

/// Persist a user's record; failures are logged, the conversation goes on
pub(crate) fn save_record(state: &AppState, user_id: u64, record: &crate::store::UserRecord) {
    if let Err(e) = state.store.save(user_id, record) {
        tracing::error!(user_id = %user_id, error = %e, "Failed to save user record");
    }
}

/// Run the dispatcher until the process is interrupted
pub async fn run(bot: Bot, state: Arc<AppState>) {
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!(error = %e, "Failed to register bot commands");
    }

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(commands::handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(callbacks::handle_callback))
        .branch(Update::filter_message().endpoint(text::handle_text));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
