//! handle-scout - social profile discovery over Telegram
//!
//! Collects a user's contact details, retrieves profile metadata from social
//! platforms (mock, configured API, or best-effort scraping), and probes
//! wildcard username patterns for existing profiles.

pub mod bot;
pub mod config;
pub mod error;
pub mod profile;
pub mod search;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{HandleScoutError, Result};
pub use types::{
    AccountInfo, ContactInfo, FetchMethod, Platform, ProbeConfig, ProfileRecord, SearchSummary,
};

// Re-export main functionality
pub use profile::ProfileFetcher;
pub use search::{candidate_count, expand, Charset, UsernameProber};
pub use store::{JsonFileStore, UserRecord, UserStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
