//! Bounded-concurrency existence probing of candidate usernames

use crate::error::{HandleScoutError, Result};
use crate::types::Platform;
use async_trait::async_trait;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::timeout;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Status and body observed by a single probe request
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: String,
}

impl ProbeResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used to issue probe requests, swappable in tests
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ProbeResponse>;
}

/// reqwest-backed transport used in production
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| HandleScoutError::network(e.to_string(), None, None))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ProbeTransport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<ProbeResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ProbeResponse { status, body })
    }
}

/// Probes candidate usernames against a platform's public profile pages.
///
/// At most `concurrency` checks are in flight at once and every check carries
/// its own timeout; a failed or timed-out check only removes that candidate
/// from the result.
pub struct UsernameProber {
    transport: Arc<dyn ProbeTransport>,
    concurrency: usize,
    per_probe_timeout: Duration,
}

impl UsernameProber {
    /// Create a prober with the default HTTP transport.
    ///
    /// Fails fast with a configuration error on a zero concurrency, before
    /// any network activity.
    pub fn new(concurrency: usize, per_probe_timeout: Duration) -> Result<Self> {
        Self::with_transport(Arc::new(HttpTransport::new()?), concurrency, per_probe_timeout)
    }

    /// Create a prober over a custom transport
    pub fn with_transport(
        transport: Arc<dyn ProbeTransport>,
        concurrency: usize,
        per_probe_timeout: Duration,
    ) -> Result<Self> {
        if concurrency == 0 {
            return Err(HandleScoutError::config("probe concurrency must be at least 1"));
        }
        Ok(Self {
            transport,
            concurrency,
            per_probe_timeout,
        })
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Check which candidates correspond to an existing profile.
    ///
    /// A candidate counts as existing when the profile page answers with a
    /// success status AND the username appears (case-insensitively) in the
    /// body. This is a best-effort heuristic, since some platforms serve their
    /// "not found" page with a 200. Every candidate's check settles before
    /// this returns; the result preserves input order and drops duplicates.
    pub async fn probe(&self, platform: Platform, candidates: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        let unique: Vec<&String> = candidates
            .iter()
            .filter(|c| seen.insert(c.as_str()))
            .collect();

        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        let checks: Vec<_> = unique
            .into_iter()
            .map(|candidate| {
                let url = platform.profile_url(candidate);
                let semaphore = Arc::clone(&semaphore);
                let transport = Arc::clone(&self.transport);
                let per_probe_timeout = self.per_probe_timeout;

                async move {
                    let _permit = semaphore.acquire().await.ok()?;

                    match timeout(per_probe_timeout, transport.fetch(&url)).await {
                        Ok(Ok(response)) => {
                            let exists = response.is_success()
                                && response
                                    .body
                                    .to_lowercase()
                                    .contains(&candidate.to_lowercase());
                            exists.then(|| candidate.clone())
                        }
                        Ok(Err(e)) => {
                            tracing::debug!(username = %candidate, error = %e, "Probe failed");
                            None
                        }
                        Err(_) => {
                            tracing::debug!(
                                username = %candidate,
                                timeout_ms = %per_probe_timeout.as_millis(),
                                "Probe timed out"
                            );
                            None
                        }
                    }
                }
            })
            .collect();

        join_all(checks).await.into_iter().flatten().collect()
    }
}
