//! Inline keyboards

use super::callbacks::CallbackAction;
use crate::types::Platform;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Main platform selection menu
pub fn main_menu() -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Platform::ALL
        .iter()
        .map(|platform| {
            vec![InlineKeyboardButton::callback(
                platform.display_name(),
                CallbackAction::Platform(*platform).encode(),
            )]
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback(
        "Add New Platform",
        CallbackAction::AddPlatform.encode(),
    )]);

    InlineKeyboardMarkup::new(rows)
}

/// Per-platform menu: login, fetch, back
pub fn platform_menu(platform: Platform) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            format!("Login to {}", platform),
            CallbackAction::Login(platform).encode(),
        )],
        vec![InlineKeyboardButton::callback(
            "Fetch User Info",
            CallbackAction::Fetch(platform).encode(),
        )],
        vec![InlineKeyboardButton::callback(
            "Back",
            CallbackAction::Back.encode(),
        )],
    ])
}
