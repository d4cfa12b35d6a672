//! Core types and structures for handle-scout

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Supported social-media platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    TikTok,
    Instagram,
    Facebook,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::TikTok, Platform::Instagram, Platform::Facebook];

    /// Stable lowercase identifier (also used as callback data)
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::TikTok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
        }
    }

    /// Human-facing name
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::TikTok => "TikTok",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
        }
    }

    /// Canonical public profile URL for a username
    pub fn profile_url(&self, username: &str) -> String {
        match self {
            Platform::TikTok => format!("https://www.tiktok.com/@{}", username),
            Platform::Instagram => format!("https://www.instagram.com/{}/", username),
            Platform::Facebook => format!("https://www.facebook.com/{}", username),
        }
    }

    /// Parse a platform from its stable identifier
    pub fn from_str_id(s: &str) -> Option<Platform> {
        match s {
            "tiktok" => Some(Platform::TikTok),
            "instagram" => Some(Platform::Instagram),
            "facebook" => Some(Platform::Facebook),
            _ => None,
        }
    }

    /// Recognize the platform a profile URL belongs to
    pub fn from_url(url: &str) -> Option<Platform> {
        if url.contains("tiktok.com") {
            Some(Platform::TikTok)
        } else if url.contains("instagram.com") {
            Some(Platform::Instagram)
        } else if url.contains("facebook.com") {
            Some(Platform::Facebook)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How a set of profile records was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMethod {
    Mock,
    Api,
    Scrape,
}

impl std::fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchMethod::Mock => write!(f, "mock"),
            FetchMethod::Api => write!(f, "api"),
            FetchMethod::Scrape => write!(f, "scrape"),
        }
    }
}

/// Contact details collected from the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

impl ContactInfo {
    pub fn new(email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Local part of the email, or "user" when the email has no '@'
    pub fn email_localpart(&self) -> &str {
        match self.email.split_once('@') {
            Some((local, _)) if !local.is_empty() => local,
            _ => "user",
        }
    }

    /// Last four characters of the phone number, or "0000" when too short
    pub fn phone_suffix(&self) -> String {
        let len = self.phone.chars().count();
        if len >= 4 {
            self.phone.chars().skip(len - 4).collect()
        } else {
            "0000".to_string()
        }
    }
}

/// Profile metadata for a single account.
///
/// Platform payloads carry different subsets of these fields; absent values
/// stay `None` rather than being guessed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub username: String,
    pub url: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub following: Option<u64>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub videos: Option<u64>,
    #[serde(default)]
    pub posts: Option<u64>,
    #[serde(default)]
    pub friends: Option<u64>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub matched_email: Option<String>,
    #[serde(default)]
    pub matched_phone: Option<String>,
    pub method: FetchMethod,
    pub fetched_at: DateTime<Utc>,
}

impl ProfileRecord {
    /// Minimal record: username and canonical URL only
    pub fn bare(username: impl Into<String>, url: impl Into<String>, method: FetchMethod) -> Self {
        Self {
            username: username.into(),
            url: url.into(),
            display_name: None,
            avatar_url: None,
            followers: None,
            following: None,
            likes: None,
            videos: None,
            posts: None,
            friends: None,
            bio: None,
            matched_email: None,
            matched_phone: None,
            method,
            fetched_at: Utc::now(),
        }
    }

    /// Follower count in compact form ("123k", "1.2M"), when known
    pub fn followers_display(&self) -> Option<String> {
        self.followers.map(compact_number)
    }
}

/// Account info returned by a token-authenticated "fetch user info" call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub follower_count: Option<u64>,
    #[serde(default)]
    pub following_count: Option<u64>,
    #[serde(default)]
    pub likes_count: Option<u64>,
    #[serde(default)]
    pub video_count: Option<u64>,
    #[serde(default)]
    pub post_count: Option<u64>,
    #[serde(default)]
    pub friend_count: Option<u64>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Configuration for pattern probing.
///
/// These are caller-supplied knobs; the expander and prober take them as
/// explicit parameters rather than reading global configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Maximum infix length substituted for the wildcard
    pub max_len: usize,
    /// Maximum number of probes in flight at once
    pub concurrency: usize,
    /// Per-probe timeout
    pub timeout: Duration,
    /// Upper bound on candidates handed to the prober
    pub candidate_limit: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_len: 2,
            concurrency: 5,
            timeout: Duration::from_secs(10),
            candidate_limit: 200,
        }
    }
}

/// Outcome of one pattern search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSummary {
    pub platform: Platform,
    pub pattern: String,
    /// Number of candidates actually probed (after the limit was applied)
    pub probed: usize,
    /// Usernames confirmed to exist, in candidate order
    pub found: Vec<String>,
}

/// Format a count in compact form: 1_500_000 -> "1.5M", 123_000 -> "123k"
pub fn compact_number(n: u64) -> String {
    if n >= 1_000_000 {
        let v = n as f64 / 1_000_000.0;
        let s = format!("{:.1}", v);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        format!("{}M", s)
    } else if n >= 1_000 {
        format!("{}k", n / 1_000)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_url_templates() {
        assert_eq!(
            Platform::TikTok.profile_url("alice"),
            "https://www.tiktok.com/@alice"
        );
        assert_eq!(
            Platform::Instagram.profile_url("alice"),
            "https://www.instagram.com/alice/"
        );
        assert_eq!(
            Platform::Facebook.profile_url("alice"),
            "https://www.facebook.com/alice"
        );
    }

    #[test]
    fn test_platform_from_url() {
        assert_eq!(
            Platform::from_url("https://www.tiktok.com/@someone"),
            Some(Platform::TikTok)
        );
        assert_eq!(
            Platform::from_url("https://instagram.com/someone"),
            Some(Platform::Instagram)
        );
        assert_eq!(Platform::from_url("https://example.com/x"), None);
    }

    #[test]
    fn test_contact_helpers() {
        let contact = ContactInfo::new("alice@example.com", "+15551234567");
        assert_eq!(contact.email_localpart(), "alice");
        assert_eq!(contact.phone_suffix(), "4567");

        let odd = ContactInfo::new("no-at-sign", "12");
        assert_eq!(odd.email_localpart(), "user");
        assert_eq!(odd.phone_suffix(), "0000");
    }

    #[test]
    fn test_compact_number() {
        assert_eq!(compact_number(999), "999");
        assert_eq!(compact_number(1_000), "1k");
        assert_eq!(compact_number(123_456), "123k");
        assert_eq!(compact_number(1_000_000), "1M");
        assert_eq!(compact_number(1_200_000), "1.2M");
    }

    #[test]
    fn test_probe_config_defaults() {
        let config = ProbeConfig::default();
        assert_eq!(config.max_len, 2);
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.candidate_limit, 200);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
