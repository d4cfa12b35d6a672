//! Inline keyboard callback handling

use super::{format, keyboards, AppState};
use crate::store::PendingInput;
use crate::types::Platform;
use std::sync::Arc;
use teloxide::prelude::*;

/// Typed callback data carried by the inline keyboards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Open a platform's menu
    Platform(Platform),
    /// Ask for an access token
    Login(Platform),
    /// Fetch account info with the stored token
    Fetch(Platform),
    /// Ask for a custom platform name
    AddPlatform,
    /// Return to the main menu
    Back,
}

impl CallbackAction {
    pub fn encode(&self) -> String {
        match self {
            CallbackAction::Platform(p) => p.as_str().to_string(),
            CallbackAction::Login(p) => format!("{}_login", p.as_str()),
            CallbackAction::Fetch(p) => format!("{}_fetch", p.as_str()),
            CallbackAction::AddPlatform => "add_platform".to_string(),
            CallbackAction::Back => "back".to_string(),
        }
    }

    pub fn decode(data: &str) -> Option<Self> {
        match data {
            "add_platform" => return Some(CallbackAction::AddPlatform),
            "back" => return Some(CallbackAction::Back),
            _ => {}
        }
        if let Some(id) = data.strip_suffix("_login") {
            return Platform::from_str_id(id).map(CallbackAction::Login);
        }
        if let Some(id) = data.strip_suffix("_fetch") {
            return Platform::from_str_id(id).map(CallbackAction::Fetch);
        }
        Platform::from_str_id(data).map(CallbackAction::Platform)
    }
}

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let Some(action) = CallbackAction::decode(data) else {
        tracing::warn!(data = %data, "Unknown callback data");
        return Ok(());
    };
    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };

    let chat_id = message.chat.id;
    let message_id = message.id;
    let user_id = q.from.id.0;

    match action {
        CallbackAction::Platform(platform) => {
            bot.edit_message_text(chat_id, message_id, format!("{} Options:", platform))
                .reply_markup(keyboards::platform_menu(platform))
                .await?;
        }
        CallbackAction::Login(platform) => {
            let mut record = super::load_record(&state, user_id);
            record.pending = PendingInput::Token(platform);
            super::save_record(&state, user_id, &record);

            bot.edit_message_text(
                chat_id,
                message_id,
                format!("Please reply with your {} access token.", platform),
            )
            .await?;
        }
        CallbackAction::Fetch(platform) => {
            let mut record = super::load_record(&state, user_id);
            let Some(token) = record.tokens.get(&platform).cloned() else {
                bot.edit_message_text(
                    chat_id,
                    message_id,
                    format!("Please login to {} first.", platform),
                )
                .await?;
                return Ok(());
            };

            match state.fetcher.account_info(platform, &token).await {
                Ok(info) => {
                    record.account_info.insert(platform, info.clone());
                    super::save_record(&state, user_id, &record);
                    bot.edit_message_text(
                        chat_id,
                        message_id,
                        format::account_info(platform, &info),
                    )
                    .await?;
                }
                Err(e) => {
                    tracing::warn!(%platform, user_id = %user_id, error = %e, "Account info fetch failed");
                    bot.edit_message_text(
                        chat_id,
                        message_id,
                        "Failed to fetch user info. Check token or API.",
                    )
                    .await?;
                }
            }
        }
        CallbackAction::AddPlatform => {
            let mut record = super::load_record(&state, user_id);
            record.pending = PendingInput::PlatformName;
            super::save_record(&state, user_id, &record);

            bot.edit_message_text(
                chat_id,
                message_id,
                "Please reply with the name of the new platform.",
            )
            .await?;
        }
        CallbackAction::Back => {
            bot.edit_message_text(
                chat_id,
                message_id,
                "Select a social media platform to interact with:",
            )
            .reply_markup(keyboards::main_menu())
            .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let actions = [
            CallbackAction::Platform(Platform::TikTok),
            CallbackAction::Login(Platform::Instagram),
            CallbackAction::Fetch(Platform::Facebook),
            CallbackAction::AddPlatform,
            CallbackAction::Back,
        ];
        for action in actions {
            assert_eq!(CallbackAction::decode(&action.encode()), Some(action));
        }
    }

    #[test]
    fn test_decode_rejects_unknown() {
        assert_eq!(CallbackAction::decode("myspace"), None);
        assert_eq!(CallbackAction::decode("myspace_login"), None);
        assert_eq!(CallbackAction::decode(""), None);
    }
}
