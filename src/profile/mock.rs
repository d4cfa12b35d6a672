//! Deterministic mock profile generator
//!
//! Every field is derived from a SHA-256 digest of the query, so identical
//! queries produce identical records across runs. Used in mock mode and as
//! the offline fallback when no lookup API is configured.

use super::ProfileSource;
use crate::error::Result;
use crate::types::{AccountInfo, ContactInfo, FetchMethod, Platform, ProfileRecord};
use async_trait::async_trait;
use sha2::{Digest, Sha256};

pub struct MockSource {
    count: usize,
}

impl MockSource {
    /// `count` records per contact lookup, clamped to 1..=50
    pub fn new(count: usize) -> Self {
        Self {
            count: count.clamp(1, 50),
        }
    }

    /// Offline fallback records: plausible usernames, no counts.
    ///
    /// Used when neither mock mode nor a lookup API applies.
    pub fn simulated(&self, platform: Platform, contact: &ContactInfo) -> Vec<ProfileRecord> {
        let base = contact.email_localpart();
        let suffix = contact.phone_suffix();

        (1..=self.count.min(3))
            .map(|i| {
                let username = format!("{}_{}_{}", base, suffix, i);
                let mut record =
                    ProfileRecord::bare(username.clone(), platform.profile_url(&username), FetchMethod::Mock);
                record.matched_email = Some(contact.email.clone());
                record.matched_phone = Some(contact.phone.clone());
                record
            })
            .collect()
    }
}

#[async_trait]
impl ProfileSource for MockSource {
    async fn by_contact(
        &self,
        platform: Platform,
        contact: &ContactInfo,
    ) -> Result<Vec<ProfileRecord>> {
        let digest = digest_hex(&format!("{}|{}", contact.email, contact.phone));
        let localpart = contact.email_localpart().to_string();
        let suffix = contact.phone_suffix();

        let records = (1..=self.count)
            .map(|i| {
                let username = format!("{}_{}_{}", localpart, suffix, i);
                let mut record = ProfileRecord::bare(
                    username.clone(),
                    platform.profile_url(&username),
                    FetchMethod::Mock,
                );
                record.avatar_url = Some(format!("https://example.com/avatars/{}.jpg", username));
                record.matched_email = Some(contact.email.clone());
                record.matched_phone = Some(contact.phone.clone());
                record.bio = Some(format!(
                    "Mock account derived from {} and {}",
                    localpart, suffix
                ));

                match platform {
                    Platform::TikTok => {
                        // follower counts land in the 100k+ range
                        record.followers = Some(100_000 + stable_int(&digest, i, 900_000));
                        record.following = Some(stable_int(&digest, i + 2, 2_000));
                        record.likes = Some(stable_int(&digest, i + 4, 500_000));
                        record.videos = Some(stable_int(&digest, i + 6, 2_000));
                    }
                    Platform::Instagram => {
                        record.followers = Some(1_000 + stable_int(&digest, i, 999_000));
                        record.following = Some(100 + stable_int(&digest, i + 2, 4_900));
                        record.posts = Some(10 + stable_int(&digest, i + 4, 990));
                    }
                    Platform::Facebook => {
                        record.friends = Some(100 + stable_int(&digest, i, 4_900));
                        record.posts = Some(10 + stable_int(&digest, i + 2, 990));
                    }
                }

                record
            })
            .collect();

        Ok(records)
    }

    async fn by_url(&self, platform: Platform, url: &str) -> Result<Vec<ProfileRecord>> {
        let digest = digest_hex(url);
        let username = username_from_url(url)
            .unwrap_or_else(|| format!("user_{}", stable_int(&digest, 1, 99_999)));

        let mut record = ProfileRecord::bare(username.clone(), url.to_string(), FetchMethod::Mock);
        record.display_name = Some(username.clone());
        record.avatar_url = Some(format!("https://example.com/avatars/{}.jpg", username));
        record.bio = Some(format!("Deterministic mock profile for {}", username));

        match platform {
            Platform::TikTok => {
                record.followers = Some(100_000 + stable_int(&digest, 2, 900_000));
                record.following = Some(stable_int(&digest, 4, 2_000));
                record.likes = Some(stable_int(&digest, 6, 500_000));
                record.videos = Some(stable_int(&digest, 8, 2_000));
            }
            Platform::Instagram => {
                record.followers = Some(1_000 + stable_int(&digest, 2, 999_000));
                record.following = Some(100 + stable_int(&digest, 4, 4_900));
                record.posts = Some(10 + stable_int(&digest, 6, 990));
            }
            Platform::Facebook => {
                record.friends = Some(100 + stable_int(&digest, 2, 4_900));
                record.posts = Some(10 + stable_int(&digest, 4, 990));
            }
        }

        Ok(vec![record])
    }

    fn method(&self) -> FetchMethod {
        FetchMethod::Mock
    }
}

/// Deterministic account info for token-based fetches on platforms without a
/// real token API wired up
pub fn mock_account_info(platform: Platform, token: &str) -> AccountInfo {
    let digest = digest_hex(&format!("{}|{}", platform.as_str(), token));

    let mut info = AccountInfo {
        user_id: stable_int(&digest, 0, 900_000_000).to_string(),
        display_name: Some(format!("{} user {}", platform, stable_int(&digest, 2, 9_999))),
        avatar_url: Some(format!(
            "https://example.com/avatars/{}_{}.jpg",
            platform.as_str(),
            stable_int(&digest, 4, 9_999)
        )),
        follower_count: Some(stable_int(&digest, 6, 100_000)),
        following_count: Some(stable_int(&digest, 8, 5_000)),
        likes_count: Some(stable_int(&digest, 10, 200_000)),
        video_count: None,
        post_count: None,
        friend_count: None,
        bio: Some(format!("Profile description for {}", platform)),
    };

    match platform {
        Platform::TikTok => info.video_count = Some(stable_int(&digest, 12, 2_000)),
        Platform::Instagram => info.post_count = Some(stable_int(&digest, 12, 1_000)),
        Platform::Facebook => {
            info.post_count = Some(stable_int(&digest, 12, 1_000));
            info.friend_count = Some(stable_int(&digest, 14, 5_000));
        }
    }

    info
}

fn digest_hex(seed: &str) -> String {
    let digest = Sha256::digest(seed.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Derive a stable integer in 1..=modulus from 8 hex digits of the digest
fn stable_int(digest: &str, offset: usize, modulus: u64) -> u64 {
    let offset = offset % (digest.len() - 8);
    let slice = &digest[offset..offset + 8];
    let value = u64::from_str_radix(slice, 16).unwrap_or(0);
    value % modulus + 1
}

fn username_from_url(url: &str) -> Option<String> {
    // tiktok-style /@name first, then the first path segment
    if let Some(at) = url.find("/@") {
        let rest = &url[at + 2..];
        let end = rest
            .find(|c: char| matches!(c, '/' | '?' | '#' | '&'))
            .unwrap_or(rest.len());
        if end > 0 {
            return Some(rest[..end].to_string());
        }
    }

    let parsed = url::Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .find(|segment| !segment.is_empty())
        .map(|s| s.trim_start_matches('@').to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_contact_mock_is_deterministic() {
        let source = MockSource::new(5);
        let contact = ContactInfo::new("alice@example.com", "+15551234567");

        let first = source
            .by_contact(Platform::TikTok, &contact)
            .await
            .unwrap();
        let second = source
            .by_contact(Platform::TikTok, &contact)
            .await
            .unwrap();

        assert_eq!(first.len(), 5);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.username, b.username);
            assert_eq!(a.followers, b.followers);
            assert_eq!(a.likes, b.likes);
        }
    }

    #[tokio::test]
    async fn test_tiktok_mock_follower_floor() {
        let source = MockSource::new(10);
        let contact = ContactInfo::new("bob@example.com", "5550001111");

        let records = source
            .by_contact(Platform::TikTok, &contact)
            .await
            .unwrap();
        for record in &records {
            assert!(record.followers.unwrap() >= 100_000);
        }
    }

    #[tokio::test]
    async fn test_username_shape() {
        let source = MockSource::new(1);
        let contact = ContactInfo::new("carol@example.com", "+15559876543");

        let records = source
            .by_contact(Platform::Instagram, &contact)
            .await
            .unwrap();
        assert_eq!(records[0].username, "carol_6543_1");
        assert_eq!(records[0].url, "https://www.instagram.com/carol_6543_1/");
    }

    #[test]
    fn test_count_clamped() {
        assert_eq!(MockSource::new(0).count, 1);
        assert_eq!(MockSource::new(500).count, 50);
    }

    #[test]
    fn test_username_from_url() {
        assert_eq!(
            username_from_url("https://www.tiktok.com/@alice?lang=en"),
            Some("alice".to_string())
        );
        assert_eq!(
            username_from_url("https://www.instagram.com/bob/"),
            Some("bob".to_string())
        );
        assert_eq!(username_from_url("https://www.facebook.com/"), None);
    }

    #[test]
    fn test_mock_account_info_deterministic() {
        let a = mock_account_info(Platform::Instagram, "token-1");
        let b = mock_account_info(Platform::Instagram, "token-1");
        let c = mock_account_info(Platform::Instagram, "token-2");
        assert_eq!(a.user_id, b.user_id);
        assert_eq!(a.follower_count, b.follower_count);
        assert_ne!(a.user_id, c.user_id);
    }
}
