//! Cache-aware request executor with a single rate-limit retry.
//!
//! Every outbound call goes through [`FetchGateway::execute_as`]: the cache
//! is consulted first, a miss goes to the network, and a successful response
//! is stored under a key derived from the URL and headers. An HTTP 429 is
//! retried exactly once after a fixed backoff, bypassing the cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use tmdb_api::{Client, RequestOptions};
use url::Url;

use crate::cache::ResponseCache;
use crate::error::ShowError;
use crate::policy::RequestPolicy;

/// Fixed wait before the single retry of a rate-limited request.
pub const RATE_LIMIT_BACKOFF: Duration = Duration::from_millis(1000);

/// Derives the cache key for a request.
///
/// Depends only on the URL text and the header set, which
/// [`RequestOptions`] keeps sorted, so equal requests always collide. Headers
/// enter the key as a SHA-256 digest so the bearer token never appears in it.
pub fn cache_key(url: &Url, options: &RequestOptions) -> String {
    let mut hasher = Sha256::new();
    for (name, value) in options.headers() {
        hasher.update(name.as_bytes());
        hasher.update(b"=");
        hasher.update(value.as_bytes());
        hasher.update(b"\n");
    }
    let digest = hex::encode(&hasher.finalize()[..8]);
    format!("{} [{}]", url.as_str(), digest)
}

/// Atomic counters tracking outbound request outcomes.
#[derive(Default)]
pub struct RequestTracker {
    requests_made: AtomicU64,
    requests_succeeded: AtomicU64,
    requests_rate_limited: AtomicU64,
    requests_failed: AtomicU64,
    retries: AtomicU64,
    /// Cumulative backoff time in milliseconds.
    total_backoff_ms: AtomicU64,
}

impl RequestTracker {
    fn record_success(&self) {
        self.requests_made.fetch_add(1, Ordering::Relaxed);
        self.requests_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    fn record_rate_limited(&self) {
        self.requests_made.fetch_add(1, Ordering::Relaxed);
        self.requests_rate_limited.fetch_add(1, Ordering::Relaxed);
    }

    fn record_failure(&self) {
        self.requests_made.fetch_add(1, Ordering::Relaxed);
        self.requests_failed.fetch_add(1, Ordering::Relaxed);
    }

    fn record_retry(&self, backoff: Duration) {
        self.retries.fetch_add(1, Ordering::Relaxed);
        self.total_backoff_ms
            .fetch_add(backoff.as_millis() as u64, Ordering::Relaxed);
    }

    /// Snapshot the current counters.
    pub fn summary(&self) -> TrackerSummary {
        TrackerSummary {
            requests_made: self.requests_made.load(Ordering::Relaxed),
            requests_succeeded: self.requests_succeeded.load(Ordering::Relaxed),
            requests_rate_limited: self.requests_rate_limited.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            total_backoff: Duration::from_millis(self.total_backoff_ms.load(Ordering::Relaxed)),
        }
    }
}

/// Immutable snapshot of tracker counters for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSummary {
    /// Network round-trips attempted; cache hits are not counted.
    pub requests_made: u64,
    pub requests_succeeded: u64,
    pub requests_rate_limited: u64,
    pub requests_failed: u64,
    pub retries: u64,
    pub total_backoff: Duration,
}

/// Single chokepoint for outbound API calls.
///
/// Owns the response cache; other components reach it only through
/// [`FetchGateway::cache`]. Concurrent misses on the same key are not
/// coalesced: each goes to the network and the last response to arrive wins.
pub struct FetchGateway {
    transport: Client,
    cache: ResponseCache,
    backoff: Duration,
    tracker: RequestTracker,
}

impl FetchGateway {
    pub fn new(transport: Client, cache: ResponseCache) -> Self {
        Self {
            transport,
            cache,
            backoff: RATE_LIMIT_BACKOFF,
            tracker: RequestTracker::default(),
        }
    }

    /// Overrides the rate-limit backoff. Used by tests to avoid real waits.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn transport(&self) -> &Client {
        &self.transport
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    /// Executes a GET and returns the raw JSON body.
    pub async fn execute(
        &self,
        url: &Url,
        options: &RequestOptions,
        policy: RequestPolicy,
    ) -> Result<serde_json::Value, ShowError> {
        self.execute_as(url, options, policy).await
    }

    /// Executes a GET and decodes the body into `T`.
    ///
    /// A body that does not decode is reported as [`ShowError::Decode`] and
    /// is not cached.
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        url: &Url,
        options: &RequestOptions,
        policy: RequestPolicy,
    ) -> Result<T, ShowError> {
        match self.attempt(url, options, policy).await {
            Err(tmdb_api::Error::RateLimited) => {
                tracing::warn!(
                    "Rate limited on {}, retrying once in {}ms",
                    url.path(),
                    self.backoff.as_millis()
                );
                self.tracker.record_retry(self.backoff);
                tokio::time::sleep(self.backoff).await;
                self.attempt(url, options, policy.skip(true))
                    .await
                    .map_err(ShowError::from)
            }
            other => other.map_err(ShowError::from),
        }
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        url: &Url,
        options: &RequestOptions,
        policy: RequestPolicy,
    ) -> Result<T, tmdb_api::Error> {
        let key = (!policy.skip).then(|| cache_key(url, options));

        if let Some(key) = &key {
            if let Some(cached) = self.cache.get(key) {
                tracing::debug!("Cache hit for {}", url.path());
                return decode(&cached);
            }
            tracing::debug!("Cache miss for {}", url.path());
        }

        let value = match self.transport.fetch_json(url, options).await {
            Ok(value) => {
                self.tracker.record_success();
                value
            }
            Err(e) => {
                if e.is_rate_limited() {
                    self.tracker.record_rate_limited();
                } else {
                    self.tracker.record_failure();
                }
                return Err(e);
            }
        };

        let decoded = decode(&value)?;
        if let Some(key) = key {
            self.cache.set(key, value, policy.ttl);
        }
        Ok(decoded)
    }
}

fn decode<T: DeserializeOwned>(value: &serde_json::Value) -> Result<T, tmdb_api::Error> {
    T::deserialize(value).map_err(|e| {
        tracing::error!("Failed to decode response: {}", e);
        tmdb_api::Error::Decode(e.to_string())
    })
}
