//! Command handlers

use super::{format, keyboards, AppState};
use crate::search::{self, Charset};
use crate::store::PendingInput;
use crate::types::{Platform, SearchSummary};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode, User};
use teloxide::utils::command::BotCommands;
use teloxide::utils::html;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "snake_case", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "register and show the platform menu")]
    Start,
    #[command(description = "show this help message")]
    Help,
    #[command(description = "find TikTok accounts for your contact details")]
    Tiktok,
    #[command(description = "find Instagram accounts for your contact details")]
    Instagram,
    #[command(description = "find Facebook accounts for your contact details")]
    Facebook,
    #[command(description = "add a custom platform")]
    Add,
    #[command(description = "search usernames by pattern, e.g. /search foo*")]
    Search(String),
    #[command(description = "fetch a public profile link")]
    ScrapeLink(String),
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let user_id = user.id.0;

    match cmd {
        Command::Start => start(&bot, &msg, user, &state).await,
        Command::Help => help(&bot, &msg).await,
        Command::Tiktok => contact_lookup(&bot, &msg, &state, user_id, Platform::TikTok).await,
        Command::Instagram => {
            contact_lookup(&bot, &msg, &state, user_id, Platform::Instagram).await
        }
        Command::Facebook => contact_lookup(&bot, &msg, &state, user_id, Platform::Facebook).await,
        Command::Add => add_platform(&bot, &msg, &state, user_id).await,
        Command::Search(pattern) => {
            let pattern = pattern.trim().to_string();
            search(&bot, &msg, &state, user_id, &pattern).await
        }
        Command::ScrapeLink(url) => {
            let url = url.trim().to_string();
            scrape_link_flow(&bot, msg.chat.id, &state, user_id, &url).await
        }
    }
}

async fn start(bot: &Bot, msg: &Message, user: &User, state: &AppState) -> ResponseResult<()> {
    let record = super::load_record(state, user.id.0);
    // register the user even before any details arrive
    super::save_record(state, user.id.0, &record);

    if record.phone.is_some() {
        bot.send_message(
            msg.chat.id,
            format!(
                "Welcome back {}! Select a social media platform to interact with:",
                user.first_name
            ),
        )
        .reply_markup(keyboards::main_menu())
        .await?;
    } else {
        let mention = format!(
            "<a href=\"tg://user?id={}\">{}</a>",
            user.id.0,
            html::escape(&user.first_name)
        );
        bot.send_message(
            msg.chat.id,
            format!(
                "Hi {}! Welcome to the Social Scout bot.\nPlease send me your email address to get started.",
                mention
            ),
        )
        .parse_mode(ParseMode::Html)
        .await?;
    }
    Ok(())
}

async fn help(bot: &Bot, msg: &Message) -> ResponseResult<()> {
    bot.send_message(
        msg.chat.id,
        format!(
            "This bot looks up social media profiles for your contact details.\n\
             After providing email and phone, select platforms via the buttons.\n\n{}\n\n\
             Use the buttons for main interactions.",
            Command::descriptions()
        ),
    )
    .await?;
    Ok(())
}

async fn contact_lookup(
    bot: &Bot,
    msg: &Message,
    state: &AppState,
    user_id: u64,
    platform: Platform,
) -> ResponseResult<()> {
    let mut record = super::load_record(state, user_id);
    let Some(contact) = record.contact() else {
        bot.send_message(
            msg.chat.id,
            "Please provide your email and phone number first using /start.",
        )
        .await?;
        return Ok(());
    };

    bot.send_message(
        msg.chat.id,
        format!(
            "Scraping {} accounts for {} and {}...",
            platform, contact.email, contact.phone
        ),
    )
    .await?;

    match state.fetcher.by_contact(platform, &contact).await {
        Err(e) => {
            tracing::error!(%platform, user_id = %user_id, error = %e, "Contact lookup failed");
            bot.send_message(msg.chat.id, e.user_message()).await?;
        }
        Ok(results) if results.is_empty() => {
            bot.send_message(
                msg.chat.id,
                format!("No {} accounts found for the provided details.", platform),
            )
            .await?;
        }
        Ok(results) => {
            record.profiles.insert(platform, results.clone());
            super::save_record(state, user_id, &record);
            bot.send_message(msg.chat.id, format::profile_summary(platform, &results, 3))
                .await?;
        }
    }
    Ok(())
}

async fn add_platform(
    bot: &Bot,
    msg: &Message,
    state: &AppState,
    user_id: u64,
) -> ResponseResult<()> {
    let mut record = super::load_record(state, user_id);
    record.pending = PendingInput::PlatformName;
    super::save_record(state, user_id, &record);

    bot.send_message(
        msg.chat.id,
        "Please enter the name of the new social media platform:",
    )
    .await?;
    Ok(())
}

async fn search(
    bot: &Bot,
    msg: &Message,
    state: &AppState,
    user_id: u64,
    pattern: &str,
) -> ResponseResult<()> {
    if pattern.is_empty() {
        bot.send_message(
            msg.chat.id,
            "Usage: /search <pattern> — e.g. /search @username or /search foo*",
        )
        .await?;
        return Ok(());
    }

    let probe = &state.config.probe;
    bot.send_message(
        msg.chat.id,
        format!(
            "Searching for pattern: {} (this may take a few seconds)",
            pattern
        ),
    )
    .await?;

    let mut candidates = match search::expand(pattern, probe.max_len, Charset::default().as_str())
    {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!(pattern = %pattern, error = %e, "Pattern expansion rejected");
            bot.send_message(msg.chat.id, e.user_message()).await?;
            return Ok(());
        }
    };

    if candidates.is_empty() {
        bot.send_message(
            msg.chat.id,
            "No candidates generated from pattern (only a single '*' is supported). \
             Try a simpler pattern like foo* or @username.",
        )
        .await?;
        return Ok(());
    }

    // keep probing bounded regardless of how broad the pattern is
    candidates.truncate(probe.candidate_limit);

    tracing::info!(
        pattern = %pattern,
        candidates = %candidates.len(),
        concurrency = %state.prober.concurrency(),
        "Probing candidate usernames"
    );

    let found = state.prober.probe(Platform::TikTok, &candidates).await;

    let mut record = super::load_record(state, user_id);
    record
        .pattern_hits
        .insert(pattern.to_string(), found.clone());
    super::save_record(state, user_id, &record);

    let summary = SearchSummary {
        platform: Platform::TikTok,
        pattern: pattern.to_string(),
        probed: candidates.len(),
        found,
    };
    bot.send_message(msg.chat.id, format::search_summary(&summary))
        .await?;
    Ok(())
}

/// Shared by the `/scrape_link` command and plain URL messages
pub(crate) async fn scrape_link_flow(
    bot: &Bot,
    chat_id: ChatId,
    state: &AppState,
    user_id: u64,
    url: &str,
) -> ResponseResult<()> {
    if url.is_empty() || !(url.starts_with("http://") || url.starts_with("https://")) {
        bot.send_message(
            chat_id,
            "Usage: /scrape_link <url> — send a full TikTok/Instagram/Facebook profile URL.",
        )
        .await?;
        return Ok(());
    }

    let Some(platform) = Platform::from_url(url) else {
        bot.send_message(
            chat_id,
            "Unrecognized platform in URL. Supported: TikTok, Instagram, Facebook.",
        )
        .await?;
        return Ok(());
    };

    bot.send_message(
        chat_id,
        "Scraping the provided link — this may take a few seconds.\n\
         Note: scraping public pages may be rate-limited or blocked by the target site.",
    )
    .await?;

    match state.fetcher.by_url(platform, url).await {
        Err(e) => {
            tracing::error!(%platform, url = %url, error = %e, "Link lookup failed");
            bot.send_message(chat_id, e.user_message()).await?;
        }
        Ok(results) if results.is_empty() => {
            bot.send_message(
                chat_id,
                "No data found or page inaccessible for the provided URL.",
            )
            .await?;
        }
        Ok(results) => {
            let mut record = super::load_record(state, user_id);
            record
                .link_profiles
                .insert(url.to_string(), results.clone());
            super::save_record(state, user_id, &record);

            let reply = if platform == Platform::TikTok {
                format::profile_summary(platform, &results, 3)
            } else {
                format::link_summary(&results)
            };
            bot.send_message(chat_id, reply).await?;
        }
    }
    Ok(())
}
