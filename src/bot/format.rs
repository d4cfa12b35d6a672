//! User-facing message formatting

use crate::types::{AccountInfo, Platform, ProfileRecord, SearchSummary};

/// Maximum bio length shown in summaries
const BIO_CAP: usize = 160;

/// Maximum usernames listed for a pattern search
const SEARCH_DISPLAY_LIMIT: usize = 10;

/// Summarize contact-lookup results, showing the top `top_n` profiles
pub fn profile_summary(platform: Platform, results: &[ProfileRecord], top_n: usize) -> String {
    let count = results.len();
    let shown = top_n.min(count);
    let mut lines = vec![format!(
        "Found {} {} account(s). Showing top {}:",
        count, platform, shown
    )];

    for (i, profile) in results.iter().take(top_n).enumerate() {
        lines.push(String::new());
        lines.push(format!("{}. @{}", i + 1, profile.username));
        if let Some(followers) = profile.followers_display() {
            lines.push(format!("   Followers: {}", followers));
        }
        if let Some(likes) = profile.likes {
            lines.push(format!("   Likes: {}", likes));
        }
        if let Some(videos) = profile.videos {
            lines.push(format!("   Videos: {}", videos));
        }
        if let Some(posts) = profile.posts {
            lines.push(format!("   Posts: {}", posts));
        }
        if let Some(friends) = profile.friends {
            lines.push(format!("   Friends: {}", friends));
        }
        if let Some(bio) = &profile.bio {
            lines.push(format!("   Bio: {}", cap_bio(bio)));
        }
        lines.push(format!("   URL: {}", profile.url));
    }

    lines.join("\n")
}

/// One-line summary for non-TikTok link results
pub fn link_summary(results: &[ProfileRecord]) -> String {
    match results.first() {
        Some(sample) => format!(
            "Found {} result(s). Example: {} — {}",
            results.len(),
            sample.username,
            sample.url
        ),
        None => "No data found or page inaccessible for the provided URL.".to_string(),
    }
}

/// Summarize a pattern search: first 10 hits plus a remainder count
pub fn search_summary(summary: &SearchSummary) -> String {
    if summary.found.is_empty() {
        return format!(
            "No matching {} usernames found for the provided pattern.",
            summary.platform
        );
    }

    let mut reply = String::from("Found the following usernames:\n");
    reply.push_str(
        &summary
            .found
            .iter()
            .take(SEARCH_DISPLAY_LIMIT)
            .map(|u| format!("@{}", u))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    if summary.found.len() > SEARCH_DISPLAY_LIMIT {
        reply.push_str(&format!(
            "\n(and {} more)",
            summary.found.len() - SEARCH_DISPLAY_LIMIT
        ));
    }
    reply
}

/// Render token-based account info line by line, skipping unknown fields
pub fn account_info(platform: Platform, info: &AccountInfo) -> String {
    let mut lines = vec![format!("Fetched {} User Info:", platform)];
    lines.push(format!("User ID: {}", info.user_id));
    if let Some(name) = &info.display_name {
        lines.push(format!("Display Name: {}", name));
    }
    if let Some(avatar) = &info.avatar_url {
        lines.push(format!("Profile Picture: {}", avatar));
    }
    if let Some(n) = info.follower_count {
        lines.push(format!("Follower Count: {}", n));
    }
    if let Some(n) = info.following_count {
        lines.push(format!("Following Count: {}", n));
    }
    if let Some(n) = info.friend_count {
        lines.push(format!("Friend Count: {}", n));
    }
    if let Some(n) = info.likes_count {
        lines.push(format!("Likes Count: {}", n));
    }
    if let Some(n) = info.video_count {
        lines.push(format!("Video Count: {}", n));
    }
    if let Some(n) = info.post_count {
        lines.push(format!("Post Count: {}", n));
    }
    if let Some(bio) = &info.bio {
        lines.push(format!("Profile Description: {}", bio));
    }
    lines.join("\n")
}

fn cap_bio(bio: &str) -> String {
    if bio.chars().count() > BIO_CAP {
        let capped: String = bio.chars().take(BIO_CAP).collect();
        format!("{}...", capped)
    } else {
        bio.to_string()
    }
}
