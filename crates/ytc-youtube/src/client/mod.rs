//! HTTP client for the YouTube Data API v3.
//!
//! Wraps `reqwest` with API key handling, typed response deserialization and
//! mapping of the API's error envelope onto [`YoutubeError`]. One client is
//! built per process and handed explicitly to whoever needs it.

mod comments;
mod metadata;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use ytc_core::config::DEFAULT_API_BASE_URL;

use crate::error::YoutubeError;
use crate::retry::retry_with_backoff;
use crate::types::ApiErrorEnvelope;

const USER_AGENT: &str = "ytc/0.1 (comment-sentiment)";

/// Client for the YouTube Data API v3.
///
/// Use [`YoutubeClient::new`] for production or [`YoutubeClient::with_base_url`]
/// to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl std::fmt::Debug for YoutubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl YoutubeClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_API_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        // A trailing slash keeps `Url::join` appending endpoint names instead
        // of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Enables retries of transient failures (timeouts, 5xx, short-term rate
    /// limiting) for every call made through this client.
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Builds the request URL for `endpoint` with the API key and `params`
    /// percent-encoded into the query string.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// GETs `endpoint` and deserializes the body, retrying transient failures
    /// according to the client's retry policy.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, YoutubeError> {
        let url = self.build_url(endpoint, params)?;
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move { self.get_json_once::<T>(endpoint, url).await }
        })
        .await
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        url: Url,
    ) -> Result<T, YoutubeError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| YoutubeError::Http(e.without_url()))?;

        let status = response.status();
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok());

        let body = response
            .text()
            .await
            .map_err(|e| YoutubeError::Http(e.without_url()))?;

        if !status.is_success() {
            return Err(error_from_response(status, retry_after_secs, endpoint, &body));
        }

        serde_json::from_str::<T>(&body).map_err(|e| YoutubeError::Deserialize {
            context: format!("{endpoint} response"),
            source: e,
        })
    }
}

/// Maps a non-2xx response onto a typed error using the API error envelope
/// when the body carries one.
fn error_from_response(
    status: StatusCode,
    retry_after_secs: Option<u64>,
    endpoint: &str,
    body: &str,
) -> YoutubeError {
    let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(body) else {
        return match status {
            StatusCode::TOO_MANY_REQUESTS => YoutubeError::RateLimited {
                retry_after_secs,
            },
            StatusCode::NOT_FOUND => YoutubeError::NotFound {
                message: format!("{endpoint} returned 404"),
            },
            _ => YoutubeError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_owned(),
            },
        };
    };

    let message = envelope.error.message;
    let reason = envelope
        .error
        .errors
        .into_iter()
        .map(|d| d.reason)
        .find(|r| !r.is_empty())
        .unwrap_or_default();

    match reason.as_str() {
        "quotaExceeded" | "dailyLimitExceeded" => YoutubeError::QuotaExceeded { message },
        "rateLimitExceeded" | "userRateLimitExceeded" => YoutubeError::RateLimited {
            retry_after_secs,
        },
        "commentsDisabled" => YoutubeError::CommentsDisabled { message },
        "videoNotFound" | "channelNotFound" | "notFound" => YoutubeError::NotFound { message },
        _ if status == StatusCode::TOO_MANY_REQUESTS => YoutubeError::RateLimited {
            retry_after_secs,
        },
        _ if status == StatusCode::NOT_FOUND => YoutubeError::NotFound { message },
        _ => YoutubeError::Api {
            status: status.as_u16(),
            reason,
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> YoutubeClient {
        YoutubeClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    fn envelope(code: u16, reason: &str) -> String {
        serde_json::json!({
            "error": {
                "code": code,
                "message": format!("{reason} happened"),
                "errors": [{ "domain": "youtube.commentThread", "reason": reason }]
            }
        })
        .to_string()
    }

    #[test]
    fn build_url_appends_params_and_key() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client
            .build_url("commentThreads", &[("part", "snippet"), ("videoId", "abc")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/commentThreads?part=snippet&videoId=abc&key=test-key"
        );
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://www.googleapis.com/youtube/v3/");
        let url = client
            .build_url("commentThreads", &[("pageToken", "a+b/c=")])
            .unwrap();
        assert!(
            url.as_str().contains("pageToken=a%2Bb%2Fc%3D"),
            "token should be percent-encoded: {url}"
        );
    }

    #[test]
    fn debug_output_hides_api_key() {
        let rendered = format!("{:?}", test_client("http://localhost"));
        assert!(!rendered.contains("test-key"));
    }

    #[test]
    fn with_base_url_rejects_garbage() {
        let err = YoutubeClient::with_base_url("k", 5, "not a url").unwrap_err();
        assert!(matches!(err, YoutubeError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn quota_envelope_maps_to_quota_exceeded() {
        let err = error_from_response(
            StatusCode::FORBIDDEN,
            None,
            "commentThreads",
            &envelope(403, "quotaExceeded"),
        );
        assert!(matches!(err, YoutubeError::QuotaExceeded { .. }), "{err:?}");
    }

    #[test]
    fn comments_disabled_envelope_maps_to_comments_disabled() {
        let err = error_from_response(
            StatusCode::FORBIDDEN,
            None,
            "commentThreads",
            &envelope(403, "commentsDisabled"),
        );
        assert!(matches!(err, YoutubeError::CommentsDisabled { .. }), "{err:?}");
    }

    #[test]
    fn video_not_found_envelope_maps_to_not_found() {
        let err = error_from_response(
            StatusCode::NOT_FOUND,
            None,
            "commentThreads",
            &envelope(404, "videoNotFound"),
        );
        assert!(matches!(err, YoutubeError::NotFound { .. }), "{err:?}");
    }

    #[test]
    fn unknown_reason_keeps_status_and_reason() {
        let err = error_from_response(
            StatusCode::BAD_REQUEST,
            None,
            "commentThreads",
            &envelope(400, "invalidParameter"),
        );
        match err {
            YoutubeError::Api { status, reason, .. } => {
                assert_eq!(status, 400);
                assert_eq!(reason, "invalidParameter");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_429_maps_to_rate_limited_with_retry_after() {
        let err = error_from_response(
            StatusCode::TOO_MANY_REQUESTS,
            Some(7),
            "commentThreads",
            "slow down",
        );
        assert!(matches!(
            err,
            YoutubeError::RateLimited {
                retry_after_secs: Some(7)
            }
        ));
    }

    #[test]
    fn non_json_500_maps_to_unexpected_status() {
        let err = error_from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
            "videos",
            "<html>oops</html>",
        );
        assert!(matches!(
            err,
            YoutubeError::UnexpectedStatus { status: 500, .. }
        ));
    }
}
