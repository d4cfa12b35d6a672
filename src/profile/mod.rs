//! Profile metadata retrieval
//!
//! Lookups run against one of three sources: a deterministic mock generator,
//! a configured third-party API, or best-effort scraping of public pages.
//! `ProfileFetcher` picks the source and handles fallback.

pub mod api;
pub mod fetcher;
pub mod mock;
pub mod scrape;

pub use fetcher::ProfileFetcher;
pub use mock::MockSource;
pub use api::ApiSource;
pub use scrape::ScrapeSource;

use crate::error::Result;
use crate::types::{ContactInfo, FetchMethod, Platform, ProfileRecord};
use async_trait::async_trait;

/// One way of looking up profile metadata
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Find accounts associated with the given contact details
    async fn by_contact(
        &self,
        platform: Platform,
        contact: &ContactInfo,
    ) -> Result<Vec<ProfileRecord>>;

    /// Fetch metadata for a specific public profile URL
    async fn by_url(&self, platform: Platform, url: &str) -> Result<Vec<ProfileRecord>>;

    /// How records from this source were obtained
    fn method(&self) -> FetchMethod;
}
