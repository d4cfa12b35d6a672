//! Integration tests for handle-scout

use async_trait::async_trait;
use handle_scout::error::{HandleScoutError, Result};
use handle_scout::search::{self, Charset, ProbeResponse, ProbeTransport, UsernameProber};
use handle_scout::store::{UserRecord, UserStore};
use handle_scout::{AppConfig, ContactInfo, JsonFileStore, Platform, ProfileFetcher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Probe transport doubles
// ---------------------------------------------------------------------------

/// Every request fails at the transport level
struct FailingTransport;

#[async_trait]
impl ProbeTransport for FailingTransport {
    async fn fetch(&self, _url: &str) -> Result<ProbeResponse> {
        Err(HandleScoutError::network("connection refused", None, None))
    }
}

/// Every request hangs forever; only the prober's timeout ends it
struct HangingTransport;

#[async_trait]
impl ProbeTransport for HangingTransport {
    async fn fetch(&self, _url: &str) -> Result<ProbeResponse> {
        std::future::pending().await
    }
}

/// Serves canned profiles with per-candidate delays so completion order
/// differs from input order
struct CannedTransport {
    exists: Vec<String>,
}

fn username_from_probe_url(url: &str) -> String {
    url.rsplit("/@")
        .next()
        .unwrap_or_default()
        .trim_end_matches('/')
        .to_string()
}

#[async_trait]
impl ProbeTransport for CannedTransport {
    async fn fetch(&self, url: &str) -> Result<ProbeResponse> {
        let username = username_from_probe_url(url);
        let jitter = (username.bytes().map(u64::from).sum::<u64>() * 7) % 40;
        tokio::time::sleep(Duration::from_millis(5 + jitter)).await;

        if self.exists.contains(&username) {
            Ok(ProbeResponse {
                status: 200,
                body: format!("<html><title>@{} | profile</title></html>", username),
            })
        } else {
            // the platform's "not found" page also answers 200
            Ok(ProbeResponse {
                status: 200,
                body: "<html><title>Page not found</title></html>".to_string(),
            })
        }
    }
}

/// Counts simultaneous in-flight requests
#[derive(Default)]
struct CountingTransport {
    current: AtomicUsize,
    peak: AtomicUsize,
}

#[async_trait]
impl ProbeTransport for CountingTransport {
    async fn fetch(&self, _url: &str) -> Result<ProbeResponse> {
        let in_flight = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(in_flight, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(25)).await;
        self.current.fetch_sub(1, Ordering::SeqCst);

        Ok(ProbeResponse {
            status: 404,
            body: String::new(),
        })
    }
}

fn candidates(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Pattern expansion
// ---------------------------------------------------------------------------

#[test]
fn test_expand_exact_pattern() {
    let out = search::expand("@someuser", 2, Charset::default().as_str()).unwrap();
    assert_eq!(out, vec!["someuser".to_string()]);
}

#[test]
fn test_expand_rejects_multiple_wildcards_softly() {
    let out = search::expand("a*b*", 2, Charset::default().as_str()).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_expand_two_letter_charset() {
    let out = search::expand("prefix*suffix", 1, "ab").unwrap();
    assert_eq!(out, vec!["prefixasuffix", "prefixbsuffix"]);
}

#[test]
fn test_expand_deterministic_and_counted() {
    let charset = Charset::default().as_str();
    let first = search::expand("foo*", 2, charset).unwrap();
    let second = search::expand("foo*", 2, charset).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len() as u128, search::candidate_count(36, 2));
    assert_eq!(search::candidate_count(36, 2), 1_332);
}

#[test]
fn test_expand_zero_max_len_fails_fast() {
    let result = search::expand("foo*", 0, "ab");
    assert!(matches!(result, Err(HandleScoutError::Config { .. })));
}

// ---------------------------------------------------------------------------
// Existence prober
// ---------------------------------------------------------------------------

#[test]
fn test_prober_rejects_zero_concurrency() {
    let result =
        UsernameProber::with_transport(Arc::new(FailingTransport), 0, Duration::from_secs(1));
    assert!(matches!(result, Err(HandleScoutError::Config { .. })));
}

#[tokio::test]
async fn test_probe_absorbs_transport_failures() {
    let prober =
        UsernameProber::with_transport(Arc::new(FailingTransport), 3, Duration::from_millis(10))
            .unwrap();

    let found = prober
        .probe(Platform::TikTok, &candidates(&["a", "b", "c", "d"]))
        .await;
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_probe_absorbs_timeouts() {
    let prober =
        UsernameProber::with_transport(Arc::new(HangingTransport), 3, Duration::from_millis(50))
            .unwrap();

    let found = prober
        .probe(Platform::TikTok, &candidates(&["a", "b", "c", "d", "e", "f"]))
        .await;
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_probe_respects_concurrency_bound() {
    let transport = Arc::new(CountingTransport::default());
    let prober =
        UsernameProber::with_transport(transport.clone(), 5, Duration::from_secs(5)).unwrap();

    let many: Vec<String> = (0..20).map(|i| format!("user{}", i)).collect();
    let found = prober.probe(Platform::TikTok, &many).await;

    assert!(found.is_empty());
    let peak = transport.peak.load(Ordering::SeqCst);
    assert!(peak <= 5, "peak concurrency {} exceeded the cap", peak);
    assert!(peak >= 1);
}

#[tokio::test]
async fn test_probe_is_a_full_join() {
    let transport = Arc::new(CannedTransport {
        exists: candidates(&["user2", "user5", "user8"]),
    });
    let prober =
        UsernameProber::with_transport(transport, 4, Duration::from_secs(5)).unwrap();

    let input: Vec<String> = (0..10).map(|i| format!("user{}", i)).collect();
    let found = prober.probe(Platform::TikTok, &input).await;

    // exactly the canned hits, in input order, despite varied completion order
    assert_eq!(found, candidates(&["user2", "user5", "user8"]));
}

#[tokio::test]
async fn test_probe_dedupes_input() {
    let transport = Arc::new(CannedTransport {
        exists: candidates(&["alice"]),
    });
    let prober =
        UsernameProber::with_transport(transport, 2, Duration::from_secs(5)).unwrap();

    let found = prober
        .probe(
            Platform::TikTok,
            &candidates(&["alice", "bob", "alice", "alice"]),
        )
        .await;
    assert_eq!(found, candidates(&["alice"]));
}

#[tokio::test]
async fn test_probe_requires_username_in_body() {
    // canned transport answers 200 with a generic "not found" body for
    // unknown names; a success status alone must not count as existing
    let transport = Arc::new(CannedTransport { exists: Vec::new() });
    let prober =
        UsernameProber::with_transport(transport, 2, Duration::from_secs(5)).unwrap();

    let found = prober
        .probe(Platform::TikTok, &candidates(&["ghost"]))
        .await;
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_pattern_search_end_to_end() {
    let expanded = search::expand("@te*", 1, "st").unwrap();
    assert_eq!(expanded, candidates(&["tes", "tet"]));

    let transport = Arc::new(CannedTransport {
        exists: candidates(&["tes"]),
    });
    let prober =
        UsernameProber::with_transport(transport, 3, Duration::from_secs(5)).unwrap();

    let found = prober.probe(Platform::TikTok, &expanded).await;
    assert_eq!(found, candidates(&["tes"]));
}

// ---------------------------------------------------------------------------
// Profile fetcher (mock mode)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_mock_mode_contact_lookup_is_deterministic() {
    let config = AppConfig {
        mock_mode: true,
        ..Default::default()
    };
    let fetcher = ProfileFetcher::from_config(&config).unwrap();
    let contact = ContactInfo::new("alice@example.com", "+15551234567");

    let first = fetcher
        .by_contact(Platform::TikTok, &contact)
        .await
        .unwrap();
    let second = fetcher
        .by_contact(Platform::TikTok, &contact)
        .await
        .unwrap();

    assert_eq!(first.len(), 5);
    assert_eq!(first[0].username, "alice_4567_1");
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.username, b.username);
        assert_eq!(a.followers, b.followers);
        assert!(a.followers.unwrap() >= 100_000);
    }
}

#[tokio::test]
async fn test_mock_mode_url_lookup_extracts_username() {
    let config = AppConfig {
        mock_mode: true,
        ..Default::default()
    };
    let fetcher = ProfileFetcher::from_config(&config).unwrap();

    let records = fetcher
        .by_url(Platform::TikTok, "https://www.tiktok.com/@somebody")
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].username, "somebody");
}

#[tokio::test]
async fn test_offline_contact_fallback_is_bounded() {
    // no mock mode, no API configured: simulated records, at most three
    let fetcher = ProfileFetcher::from_config(&AppConfig::default()).unwrap();
    let contact = ContactInfo::new("bob@example.com", "5550001111");

    let records = fetcher
        .by_contact(Platform::TikTok, &contact)
        .await
        .unwrap();
    assert!(!records.is_empty());
    assert!(records.len() <= 3);
    assert_eq!(records[0].matched_email.as_deref(), Some("bob@example.com"));
}

// ---------------------------------------------------------------------------
// User store
// ---------------------------------------------------------------------------

#[test]
fn test_store_roundtrip_through_trait_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("user_data.json");

    let store: Arc<dyn UserStore> = Arc::new(JsonFileStore::open(&path));
    assert!(store.load(99).unwrap().is_none());

    let mut record = UserRecord::default();
    record.email = Some("carol@example.com".to_string());
    record
        .pattern_hits
        .insert("te*".to_string(), vec!["tes".to_string()]);
    store.save(99, &record).unwrap();

    let reopened: Arc<dyn UserStore> = Arc::new(JsonFileStore::open(&path));
    let loaded = reopened.load(99).unwrap().unwrap();
    assert_eq!(loaded.email.as_deref(), Some("carol@example.com"));
    assert_eq!(
        loaded.pattern_hits.get("te*"),
        Some(&vec!["tes".to_string()])
    );
}
