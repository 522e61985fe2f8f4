use std::path::PathBuf;

/// Runtime configuration for the comment pipeline.
#[derive(Clone)]
pub struct AppConfig {
    pub youtube_api_key: String,
    pub api_base_url: String,
    /// Directory owned by the snapshot store. Cleanup never reaches outside it.
    pub snapshot_dir: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Comment threads requested per page (API maximum is 100).
    pub page_size: u32,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub include_replies: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("youtube_api_key", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("snapshot_dir", &self.snapshot_dir)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("page_size", &self.page_size)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("include_replies", &self.include_replies)
            .finish()
    }
}
