//! Retry helper with linear backoff for envelope-producing calls.

use std::convert::Infallible;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use scholar_config::RetryConfig;
use tracing::{debug, warn};

use crate::envelope::{Envelope, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
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

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, config.base_delay())
    }

    /// Pause after the `attempt`-th (1-based) failure.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// Run `produce` until it succeeds, fails with a 4xx status, or the
/// policy's attempts are spent. Returns the last envelope seen.
pub async fn retry_request<T, F, Fut>(policy: RetryPolicy, mut produce: F) -> Envelope<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Envelope<T>>,
{
    retry_fallible(policy, || {
        let fut = produce();
        async move { Ok::<_, Infallible>(fut.await) }
    })
    .await
}

/// Like [`retry_request`], for producers that can fail before yielding an
/// envelope. Such an error counts as a retryable `RETRY_ERROR` failure.
pub async fn retry_fallible<T, E, F, Fut>(policy: RetryPolicy, mut produce: F) -> Envelope<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Envelope<T>, E>>,
    E: Display,
{
    let mut last = None;

    for attempt in 1..=policy.max_attempts {
        let envelope = match produce().await {
            Ok(envelope) => envelope,
            Err(e) => Envelope::failure(ErrorCode::Retry, e.to_string()),
        };

        if envelope.is_success() {
            if attempt > 1 {
                debug!(attempt, "request succeeded after retry");
            }
            return envelope;
        }
        if envelope.error_code().is_some_and(ErrorCode::is_client_error) {
            debug!(attempt, code = ?envelope.error_code(), "client error, not retrying");
            return envelope;
        }

        if attempt < policy.max_attempts {
            let delay = policy.delay_for(attempt);
            warn!(
                attempt,
                max_attempts = policy.max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = envelope.error_message(),
                "request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
        last = Some(envelope);
    }

    last.unwrap_or_else(|| Envelope::failure(ErrorCode::MaxRetries, "Max retries exceeded"))
}
