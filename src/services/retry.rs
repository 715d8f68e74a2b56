// src/services/retry.rs

//! Bounded retry for rate-limited endpoints.
//!
//! Only HTTP 429 is backed off, linearly: `base_delay × attempt`. Any other
//! non-2xx status fails at once. Transport failures are retried immediately
//! while attempts remain.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::RetryConfig;
use crate::utils::{HttpClient, HttpResponse};

/// Attempt budget and backoff unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Wait before the attempt following `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.base_delay_ms),
        )
    }
}

/// GET with bounded retry on throttling.
pub struct RetryFetcher {
    client: Arc<dyn HttpClient>,
    policy: RetryPolicy,
}

impl RetryFetcher {
    pub fn new(client: Arc<dyn HttpClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Fetch `url`, returning the first 2xx response.
    pub async fn fetch(&self, url: &str) -> Result<HttpResponse> {
        let max_attempts = self.policy.max_attempts;

        for attempt in 1..=max_attempts {
            log::debug!("Fetching {} (attempt {}/{})", url, attempt, max_attempts);
            let has_next = attempt < max_attempts;

            match self.client.get(url).await {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) if response.is_rate_limited() => {
                    if has_next {
                        let delay = self.policy.delay_after(attempt);
                        log::warn!(
                            "Rate limited by {} (attempt {}/{}), retrying in {:?}",
                            url,
                            attempt,
                            max_attempts,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
                Ok(response) => return Err(AppError::Http(response.status)),
                Err(error) => {
                    if !has_next {
                        return Err(error);
                    }
                    log::warn!(
                        "Request to {} failed (attempt {}/{}): {}",
                        url,
                        attempt,
                        max_attempts,
                        error
                    );
                }
            }
        }

        Err(AppError::MaxRetriesExceeded {
            attempts: max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{Reply, StubClient};
    use tokio::time::Instant;

    const URL: &str = "https://openlibrary.org/recentchanges.json?limit=5";

    fn fetcher(stub: &Arc<StubClient>) -> RetryFetcher {
        RetryFetcher::new(
            Arc::clone(stub) as Arc<dyn HttpClient>,
            RetryPolicy::new(3, Duration::from_millis(1000)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_is_linear() {
        let stub = Arc::new(StubClient::new().on(
            "recentchanges",
            vec![Reply::status(429), Reply::status(429), Reply::ok("[]")],
        ));

        let start = Instant::now();
        let response = fetcher(&stub).fetch(URL).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(stub.count("recentchanges"), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(1000 + 2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_stops_at_max_attempts() {
        let stub = Arc::new(StubClient::new().on("recentchanges", vec![Reply::status(429)]));

        let start = Instant::now();
        let result = fetcher(&stub).fetch(URL).await;

        assert!(matches!(
            result,
            Err(AppError::MaxRetriesExceeded { attempts: 3 })
        ));
        assert_eq!(stub.count("recentchanges"), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_status_is_not_retried() {
        let stub = Arc::new(StubClient::new().on(
            "recentchanges",
            vec![Reply::status(503), Reply::ok("[]")],
        ));

        let result = fetcher(&stub).fetch(URL).await;

        assert!(matches!(result, Err(AppError::Http(503))));
        assert_eq!(stub.count("recentchanges"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_retried_without_delay() {
        let stub = Arc::new(StubClient::new().on(
            "recentchanges",
            vec![Reply::transport("connection reset"), Reply::ok("[]")],
        ));

        let start = Instant::now();
        let response = fetcher(&stub).fetch(URL).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(stub.count("recentchanges"), 2);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_propagates_on_last_attempt() {
        let stub = Arc::new(
            StubClient::new().on("recentchanges", vec![Reply::transport("dns failure")]),
        );

        let result = fetcher(&stub).fetch(URL).await;

        assert!(matches!(result, Err(AppError::Transport(ref m)) if m == "dns failure"));
        assert_eq!(stub.count("recentchanges"), 3);
    }

    #[test]
    fn test_policy_from_config() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_after(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(2), Duration::from_millis(2000));
    }
}
