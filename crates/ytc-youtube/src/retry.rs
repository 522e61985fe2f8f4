//! Retry with exponential back-off and jitter for single API calls.
//!
//! Only transient transport conditions are retried. Quota exhaustion and
//! every application-level rejection are returned on the first failure so a
//! run never burns more of the daily quota than it needs.

use std::future::Future;
use std::time::Duration;

use crate::error::YoutubeError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - [`YoutubeError::RateLimited`]: short-term throttling.
/// - HTTP 5xx responses.
///
/// **Not retriable:**
/// - [`YoutubeError::QuotaExceeded`]: the daily budget is gone.
/// - [`YoutubeError::CommentsDisabled`] / [`YoutubeError::NotFound`].
/// - [`YoutubeError::Deserialize`]: malformed response.
pub(crate) fn is_retriable(err: &YoutubeError) -> bool {
    match err {
        YoutubeError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        YoutubeError::RateLimited { .. } => true,
        YoutubeError::Api { status, .. } | YoutubeError::UnexpectedStatus { status, .. } => {
            *status >= 500
        }
        YoutubeError::QuotaExceeded { .. }
        | YoutubeError::CommentsDisabled { .. }
        | YoutubeError::NotFound { .. }
        | YoutubeError::Deserialize { .. }
        | YoutubeError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Attempt | Sleep before next attempt        |
/// |---------|----------------------------------|
/// | 1       | 1 000 ms × 2⁰ ± 25 % jitter     |
/// | 2       | 1 000 ms × 2¹ ± 25 % jitter     |
/// | 3       | 1 000 ms × 2² ± 25 % jitter     |
///
/// Delay is capped at 30 s, except that a rate-limited response carrying a
/// longer `Retry-After` waits that long instead. Non-retriable errors are
/// returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, YoutubeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, YoutubeError>>,
{
    const MAX_DELAY_MS: u64 = 30_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let jittered = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                let delay_ms = delay_for(&err, jittered);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient YouTube API error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

/// The larger of the back-off delay and the server's `Retry-After` hint.
fn delay_for(err: &YoutubeError, backoff_ms: u64) -> u64 {
    match err {
        YoutubeError::RateLimited {
            retry_after_secs: Some(secs),
        } => backoff_ms.max(secs.saturating_mul(1_000)),
        _ => backoff_ms,
    }
}
