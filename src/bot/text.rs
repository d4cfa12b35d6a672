//! Plain-text message flow: contact collection and pending inputs

use super::{commands, keyboards, AppState};
use crate::store::PendingInput;
use std::sync::Arc;
use teloxide::prelude::*;

pub async fn handle_text(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let text = text.trim();
    if text.is_empty() || text.starts_with('/') {
        return Ok(());
    }
    let user_id = user.id.0;

    // pasted profile links take the scrape path directly
    if text.contains("http://") || text.contains("https://") {
        return commands::scrape_link_flow(&bot, msg.chat.id, &state, user_id, text).await;
    }

    let mut record = super::load_record(&state, user_id);

    if record.email.is_none() {
        record.email = Some(text.to_string());
        super::save_record(&state, user_id, &record);
        bot.send_message(msg.chat.id, "Thank you! Now please enter your phone number:")
            .await?;
        return Ok(());
    }

    if record.phone.is_none() {
        record.phone = Some(text.to_string());
        super::save_record(&state, user_id, &record);
        bot.send_message(
            msg.chat.id,
            "Great! Now, select a social media platform to interact with:",
        )
        .reply_markup(keyboards::main_menu())
        .await?;
        return Ok(());
    }

    match record.pending.clone() {
        PendingInput::Token(platform) => {
            record.tokens.insert(platform, text.to_string());
            record.pending = PendingInput::None;
            super::save_record(&state, user_id, &record);
            bot.send_message(
                msg.chat.id,
                format!(
                    "Token stored successfully for {}. You can now fetch user info.",
                    platform
                ),
            )
            .await?;
        }
        PendingInput::PlatformName => {
            record.platforms.push(text.to_string());
            record.pending = PendingInput::None;
            super::save_record(&state, user_id, &record);
            bot.send_message(
                msg.chat.id,
                format!("Added '{}' to your social media platforms.", text),
            )
            .await?;
        }
        PendingInput::None => {
            bot.send_message(
                msg.chat.id,
                "Please use the buttons or commands. If you need help, type /help.",
            )
            .await?;
        }
    }
    Ok(())
}
