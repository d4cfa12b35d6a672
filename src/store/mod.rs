//! Per-user persisted state
//!
//! Handlers receive the store as an injected `Arc<dyn UserStore>` keyed by
//! Telegram user id; there is no process-global state.

mod json;

pub use json::JsonFileStore;

use crate::error::Result;
use crate::types::{AccountInfo, ContactInfo, Platform, ProfileRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How the next free-text message from a user should be interpreted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingInput {
    /// Nothing armed; text flows through the email/phone collection steps
    #[default]
    None,
    /// Waiting for an access token for this platform
    Token(Platform),
    /// Waiting for the name of a custom platform to add
    PlatformName,
}

/// Everything persisted for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Custom platform names added by the user
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Access tokens supplied via the login buttons
    #[serde(default)]
    pub tokens: HashMap<Platform, String>,
    /// Contact-based lookup results per platform
    #[serde(default)]
    pub profiles: HashMap<Platform, Vec<ProfileRecord>>,
    /// URL-based lookup results keyed by the scraped link
    #[serde(default)]
    pub link_profiles: HashMap<String, Vec<ProfileRecord>>,
    /// Pattern-search hits keyed by the raw pattern
    #[serde(default)]
    pub pattern_hits: HashMap<String, Vec<String>>,
    /// Token-based account info per platform
    #[serde(default)]
    pub account_info: HashMap<Platform, AccountInfo>,
    #[serde(default)]
    pub pending: PendingInput,
}

impl UserRecord {
    /// Contact details, once both email and phone have been collected
    pub fn contact(&self) -> Option<ContactInfo> {
        match (&self.email, &self.phone) {
            (Some(email), Some(phone)) => Some(ContactInfo::new(email.clone(), phone.clone())),
            _ => None,
        }
    }

    pub fn has_contact(&self) -> bool {
        self.email.is_some() && self.phone.is_some()
    }
}

/// Injected user-data repository
pub trait UserStore: Send + Sync {
    /// Load a user's record, `None` when the user is unknown
    fn load(&self, user_id: u64) -> Result<Option<UserRecord>>;

    /// Persist a user's record
    fn save(&self, user_id: u64, record: &UserRecord) -> Result<()>;
}
