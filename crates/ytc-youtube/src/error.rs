use thiserror::Error;

/// Failure of a single remote API call.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network or TLS failure. The request URL is stripped because it carries
    /// the API key.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API quota exceeded: {message}")]
    QuotaExceeded { message: String },

    /// `retry_after_secs` is the server's `Retry-After` hint, when it sent one.
    #[error("rate limited by the API")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("comments are disabled: {message}")]
    CommentsDisabled { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("API error {status} ({reason}): {message}")]
    Api {
        status: u16,
        reason: String,
        message: String,
    },

    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Failure of a whole collection run. No records survive it.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("failed to fetch comment page {page} for video {video_id}: {source}")]
    Remote {
        video_id: String,
        page: usize,
        #[source]
        source: YoutubeError,
    },

    #[error("collection for video {video_id} cancelled after {pages} page(s)")]
    Cancelled { video_id: String, pages: usize },

    #[error("page {page} of video {video_id} repeated an earlier continuation token")]
    RepeatedPageToken { video_id: String, page: usize },

    #[error("pagination limit reached for video {video_id}: exceeded {max_pages} pages")]
    PaginationLimit { video_id: String, max_pages: usize },
}

impl CollectionError {
    /// The remote failure behind this error, if it came from an API call.
    #[must_use]
    pub fn remote_cause(&self) -> Option<&YoutubeError> {
        match self {
            Self::Remote { source, .. } => Some(source),
            Self::Cancelled { .. }
            | Self::RepeatedPageToken { .. }
            | Self::PaginationLimit { .. } => None,
        }
    }
}
