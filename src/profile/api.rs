//! Third-party lookup API source
//!
//! Two kinds of endpoint are supported: operator-configured per-platform
//! lookup APIs (POST with the query as JSON, optional bearer key), and the
//! public forestapi per-username GET endpoints recognized directly from a
//! pasted URL.

use super::ProfileSource;
use crate::config::ApiEndpoint;
use crate::error::{HandleScoutError, Result};
use crate::types::{AccountInfo, ContactInfo, FetchMethod, Platform, ProfileRecord};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const TIKTOK_USER_INFO_URL: &str = "https://open-api.tiktok.com/user/info/";

pub struct ApiSource {
    client: Client,
    endpoints: HashMap<Platform, ApiEndpoint>,
    forest_url: Regex,
}

impl ApiSource {
    pub fn new(endpoints: HashMap<Platform, ApiEndpoint>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| HandleScoutError::network(e.to_string(), None, None))?;

        let forest_url = Regex::new(
            r"^https?://forestapi\.vercel\.app/api/(tiktok|instagram)/user/([A-Za-z0-9_.-]+)",
        )
        .expect("valid forestapi regex");

        Ok(Self {
            client,
            endpoints,
            forest_url,
        })
    }

    /// Whether a lookup API is configured for this platform
    pub fn configured(&self, platform: Platform) -> bool {
        self.endpoints.contains_key(&platform)
    }

    /// Fetch account info with a user-supplied TikTok access token
    pub async fn tiktok_account_info(&self, token: &str) -> Result<AccountInfo> {
        let response = self
            .client
            .get(TIKTOK_USER_INFO_URL)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HandleScoutError::network(
                format!("TikTok user info request failed ({})", status),
                Some(status.as_u16()),
                Some(TIKTOK_USER_INFO_URL.to_string()),
            ));
        }

        let payload: TikTokUserInfoResponse = response
            .json()
            .await
            .map_err(|e| HandleScoutError::parse(e.to_string(), None))?;

        Ok(payload.data.into_account_info())
    }

    async fn post_lookup(
        &self,
        platform: Platform,
        endpoint: &ApiEndpoint,
        body: serde_json::Value,
    ) -> Result<Vec<ProfileRecord>> {
        let mut request = self.client.post(&endpoint.url).json(&body);
        if let Some(key) = &endpoint.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = match status.as_u16() {
                401 | 403 => format!("Lookup API rejected the credentials ({})", status),
                429 => "Lookup API rate limit exceeded (429)".to_string(),
                500..=599 => format!("Lookup API server error ({})", status),
                _ => format!("Lookup API request failed ({})", status),
            };
            return Err(HandleScoutError::network(
                message,
                Some(status.as_u16()),
                Some(endpoint.url.clone()),
            ));
        }

        let payload: ApiPayload = response
            .json()
            .await
            .map_err(|e| HandleScoutError::parse(e.to_string(), None))?;

        Ok(payload
            .into_profiles()
            .into_iter()
            .map(|raw| raw.into_record(platform, None))
            .collect())
    }

    async fn forest_lookup(
        &self,
        platform: Platform,
        username: &str,
        url: &str,
    ) -> Result<Vec<ProfileRecord>> {
        let api_url = format!(
            "https://forestapi.vercel.app/api/{}/user/{}",
            platform.as_str(),
            username
        );

        let response = self.client.get(&api_url).send().await?;
        if !response.status().is_success() {
            // unknown username; not an error worth surfacing
            return Ok(Vec::new());
        }

        let payload: ForestResponse = response
            .json()
            .await
            .map_err(|e| HandleScoutError::parse(e.to_string(), None))?;

        let mut record = payload.user.into_record(platform, Some(url));
        if record.username == "unknown" {
            record.username = username.to_string();
        }
        record.followers = payload.stats.followers;
        record.following = payload.stats.following;
        record.likes = payload.stats.likes;
        record.videos = payload.stats.videos;
        record.posts = payload.stats.posts;

        Ok(vec![record])
    }
}

#[async_trait]
impl ProfileSource for ApiSource {
    async fn by_contact(
        &self,
        platform: Platform,
        contact: &ContactInfo,
    ) -> Result<Vec<ProfileRecord>> {
        let endpoint = self.endpoints.get(&platform).ok_or_else(|| {
            HandleScoutError::source(platform, "no lookup API configured")
        })?;

        let body = serde_json::json!({
            "email": contact.email,
            "phone": contact.phone,
        });
        self.post_lookup(platform, endpoint, body).await
    }

    async fn by_url(&self, platform: Platform, url: &str) -> Result<Vec<ProfileRecord>> {
        if let Some(captures) = self.forest_url.captures(url) {
            let forest_platform = Platform::from_str_id(&captures[1]).unwrap_or(platform);
            let username = captures[2].to_string();
            return self.forest_lookup(forest_platform, &username, url).await;
        }

        let endpoint = self.endpoints.get(&platform).ok_or_else(|| {
            HandleScoutError::source(platform, "no lookup API configured")
        })?;

        let body = serde_json::json!({ "url": url });
        self.post_lookup(platform, endpoint, body).await
    }

    fn method(&self) -> FetchMethod {
        FetchMethod::Api
    }
}

/// Lookup APIs answer with either an `accounts` wrapper, a bare array, or a
/// single object; all three shapes decode into the same records.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiPayload {
    Wrapped { accounts: Vec<RawApiProfile> },
    List(Vec<RawApiProfile>),
    Single(RawApiProfile),
}

impl ApiPayload {
    fn into_profiles(self) -> Vec<RawApiProfile> {
        match self {
            ApiPayload::Wrapped { accounts } => accounts,
            ApiPayload::List(profiles) => profiles,
            ApiPayload::Single(profile) => vec![profile],
        }
    }
}

/// One profile as returned by a lookup API; field names vary per platform,
/// hence the aliases
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawApiProfile {
    #[serde(alias = "uniqueId")]
    username: Option<String>,
    url: Option<String>,
    #[serde(alias = "full_name", alias = "nickname")]
    display_name: Option<String>,
    #[serde(alias = "avatar", alias = "profile_pic_url")]
    avatar_url: Option<String>,
    #[serde(alias = "follower_count", alias = "followerCount")]
    followers: Option<u64>,
    #[serde(alias = "following_count", alias = "followingCount")]
    following: Option<u64>,
    #[serde(alias = "likes_count", alias = "heartCount")]
    likes: Option<u64>,
    #[serde(alias = "video_count", alias = "videoCount")]
    videos: Option<u64>,
    #[serde(alias = "media_count", alias = "post_count")]
    posts: Option<u64>,
    #[serde(alias = "friend_count")]
    friends: Option<u64>,
    #[serde(alias = "signature", alias = "biography")]
    bio: Option<String>,
}

impl RawApiProfile {
    fn into_record(self, platform: Platform, url_hint: Option<&str>) -> ProfileRecord {
        let username = self.username.unwrap_or_else(|| "unknown".to_string());
        let url = self
            .url
            .or_else(|| url_hint.map(|u| u.to_string()))
            .unwrap_or_else(|| platform.profile_url(&username));

        let mut record = ProfileRecord::bare(username, url, FetchMethod::Api);
        record.display_name = self.display_name;
        record.avatar_url = self.avatar_url;
        record.followers = self.followers;
        record.following = self.following;
        record.likes = self.likes;
        record.videos = self.videos;
        record.posts = self.posts;
        record.friends = self.friends;
        record.bio = self.bio;
        record
    }
}

/// forestapi answers `{ "user": {...}, "stats": {...} }`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ForestResponse {
    user: RawApiProfile,
    stats: ForestStats,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ForestStats {
    #[serde(alias = "followerCount", alias = "follower_count")]
    followers: Option<u64>,
    #[serde(alias = "followingCount", alias = "following_count")]
    following: Option<u64>,
    #[serde(alias = "heartCount", alias = "likes_count")]
    likes: Option<u64>,
    #[serde(alias = "videoCount", alias = "video_count")]
    videos: Option<u64>,
    #[serde(alias = "media_count", alias = "post_count")]
    posts: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TikTokUserInfoResponse {
    data: TikTokUserInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TikTokUserInfo {
    #[serde(alias = "open_id")]
    user_id: Option<String>,
    display_name: Option<String>,
    avatar_url: Option<String>,
    follower_count: Option<u64>,
    following_count: Option<u64>,
    likes_count: Option<u64>,
    video_count: Option<u64>,
    #[serde(alias = "signature")]
    bio: Option<String>,
}

impl TikTokUserInfo {
    fn into_account_info(self) -> AccountInfo {
        AccountInfo {
            user_id: self.user_id.unwrap_or_else(|| "unknown".to_string()),
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            follower_count: self.follower_count,
            following_count: self.following_count,
            likes_count: self.likes_count,
            video_count: self.video_count,
            post_count: None,
            friend_count: None,
            bio: self.bio,
        }
    }
}
