//! HTTP fetch helper demonstrating bounded and unbounded request deadlines

use crate::error::{AchillesError, Result};
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default client-side deadline for bounded fetches, in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Client-side deadline applied to a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPolicy {
    /// No deadline. A stalled server hangs the call indefinitely.
    Unbounded,
    /// Abort the request once the duration elapses.
    Bounded(Duration),
}

impl TimeoutPolicy {
    /// The fixed 10-second policy
    pub fn bounded_default() -> Self {
        TimeoutPolicy::Bounded(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
    }

    fn deadline(&self) -> Option<Duration> {
        match self {
            TimeoutPolicy::Unbounded => None,
            TimeoutPolicy::Bounded(d) => Some(*d),
        }
    }
}

/// HTTP client wrapper with a configurable timeout policy and request counting
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    policy: TimeoutPolicy,
    request_count: Arc<AtomicU64>,
}

impl Fetcher {
    /// Creates a new Fetcher with the given timeout policy
    pub fn new(policy: TimeoutPolicy, user_agent: &str) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(deadline) = policy.deadline() {
            builder = builder.timeout(deadline);
        }

        Ok(Self {
            client: builder.build()?,
            policy,
            request_count: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Issues a GET request and returns the response body text
    pub async fn fetch_data(&self, url: &str) -> Result<String> {
        let url = Url::parse(url)?;
        self.request_count.fetch_add(1, Ordering::Relaxed);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_timeout(e))?;
        debug!("Response: {} for {}", response.status(), response.url());

        let body = response.text().await.map_err(|e| self.map_timeout(e))?;
        Ok(body)
    }

    /// Returns the total number of requests made
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    fn map_timeout(&self, err: reqwest::Error) -> AchillesError {
        if err.is_timeout() {
            if let TimeoutPolicy::Bounded(deadline) = self.policy {
                return AchillesError::FetchTimeout(deadline);
            }
        }
        AchillesError::HttpError(err)
    }
}
