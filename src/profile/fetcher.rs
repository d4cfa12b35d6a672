//! Profile lookup orchestration with source fallback

use super::{ApiSource, MockSource, ProfileSource, ScrapeSource};
use crate::config::AppConfig;
use crate::error::Result;
use crate::types::{AccountInfo, ContactInfo, Platform, ProfileRecord};
use std::sync::Arc;

/// Runs profile lookups against the available sources in order: mock mode
/// short-circuits everything; otherwise the configured lookup API is tried
/// first and scraping (for URLs) or simulated records (for contacts) fill in
/// when it fails or finds nothing.
#[derive(Clone)]
pub struct ProfileFetcher {
    mock: Arc<MockSource>,
    api: Arc<ApiSource>,
    scrape: Arc<ScrapeSource>,
    mock_mode: bool,
}

impl ProfileFetcher {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            mock: Arc::new(MockSource::new(config.mock_count)),
            api: Arc::new(ApiSource::new(config.api_endpoints.clone())?),
            scrape: Arc::new(ScrapeSource::new()?),
            mock_mode: config.mock_mode,
        })
    }

    /// Find accounts associated with the user's contact details
    pub async fn by_contact(
        &self,
        platform: Platform,
        contact: &ContactInfo,
    ) -> Result<Vec<ProfileRecord>> {
        if self.mock_mode {
            return self.mock.by_contact(platform, contact).await;
        }

        if self.api.configured(platform) {
            match self.api.by_contact(platform, contact).await {
                Ok(records) if !records.is_empty() => {
                    tracing::info!(
                        %platform,
                        count = %records.len(),
                        "Contact lookup answered by API"
                    );
                    return Ok(records);
                }
                Ok(_) => {
                    tracing::debug!(%platform, "API returned no accounts, using fallback");
                }
                Err(e) => {
                    tracing::warn!(%platform, error = %e, "API lookup failed, using fallback");
                }
            }
        }

        // offline fallback: plausible simulated records
        Ok(self.mock.simulated(platform, contact))
    }

    /// Fetch metadata for a pasted profile URL
    pub async fn by_url(&self, platform: Platform, url: &str) -> Result<Vec<ProfileRecord>> {
        if self.mock_mode {
            return self.mock.by_url(platform, url).await;
        }

        match self.api.by_url(platform, url).await {
            Ok(records) if !records.is_empty() => {
                tracing::info!(%platform, url = %url, "URL lookup answered by API");
                return Ok(records);
            }
            Ok(_) => {
                tracing::debug!(%platform, url = %url, "API had nothing for URL, scraping");
            }
            Err(e) => {
                tracing::debug!(%platform, url = %url, error = %e, "API URL lookup unavailable, scraping");
            }
        }

        match self.scrape.by_url(platform, url).await {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(%platform, url = %url, error = %e, "Scrape failed");
                Ok(Vec::new())
            }
        }
    }

    /// Fetch account info using a stored access token.
    ///
    /// Only TikTok has a real token API wired up; the other platforms answer
    /// with deterministic mock info.
    pub async fn account_info(&self, platform: Platform, token: &str) -> Result<AccountInfo> {
        match platform {
            Platform::TikTok if !self.mock_mode => self.api.tiktok_account_info(token).await,
            _ => Ok(super::mock::mock_account_info(platform, token)),
        }
    }
}
