//! Best-effort scraping of public profile pages
//!
//! This is the last-resort lookup path. Platforms actively defend their
//! public pages, so all this promises is "if the page loads, pull a username
//! out of it"; anything more is a bonus.

use super::ProfileSource;
use crate::error::{HandleScoutError, Result};
use crate::types::{ContactInfo, FetchMethod, Platform, ProfileRecord};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

pub struct ScrapeSource {
    client: Client,
    tiktok_path: Regex,
    instagram_path: Regex,
    facebook_path: Regex,
    handle_in_body: Regex,
}

impl ScrapeSource {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| HandleScoutError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            tiktok_path: Regex::new(r"/@([^/?#&]+)").expect("valid tiktok path regex"),
            instagram_path: Regex::new(r"instagram\.com/([A-Za-z0-9_.-]+)")
                .expect("valid instagram path regex"),
            facebook_path: Regex::new(r"facebook\.com/([A-Za-z0-9_.-]+)")
                .expect("valid facebook path regex"),
            handle_in_body: Regex::new(r"@([A-Za-z0-9_.-]{2,})").expect("valid handle regex"),
        })
    }

    fn username_from_url(&self, platform: Platform, url: &str) -> Option<String> {
        let path_re = match platform {
            Platform::TikTok => &self.tiktok_path,
            Platform::Instagram => &self.instagram_path,
            Platform::Facebook => &self.facebook_path,
        };
        path_re
            .captures(url)
            .map(|captures| captures[1].to_string())
    }

    fn username_from_body(&self, body: &str) -> Option<String> {
        self.handle_in_body
            .captures(body)
            .map(|captures| captures[1].to_string())
    }
}

#[async_trait]
impl ProfileSource for ScrapeSource {
    /// Contact details cannot be searched on public pages; this source only
    /// resolves direct profile URLs.
    async fn by_contact(
        &self,
        _platform: Platform,
        _contact: &ContactInfo,
    ) -> Result<Vec<ProfileRecord>> {
        Ok(Vec::new())
    }

    async fn by_url(&self, platform: Platform, url: &str) -> Result<Vec<ProfileRecord>> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            tracing::debug!(
                %platform,
                url = %url,
                status = %response.status(),
                "Profile page not accessible"
            );
            return Ok(Vec::new());
        }

        let body = response.text().await?;

        let username = self
            .username_from_url(platform, url)
            .or_else(|| self.username_from_body(&body))
            .unwrap_or_else(|| "unknown".to_string());

        Ok(vec![ProfileRecord::bare(
            username,
            url.to_string(),
            FetchMethod::Scrape,
        )])
    }

    fn method(&self) -> FetchMethod {
        FetchMethod::Scrape
    }
}
