//! YouTube Data API v3 response types.
//!
//! Only the fields the pipeline reads are modelled. Everything is mapped into
//! domain types right at the client boundary; nothing past the collector sees
//! these structs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// commentThreads.list
// ---------------------------------------------------------------------------

/// One page of `commentThreads.list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub items: Vec<CommentThread>,
}

impl CommentThreadListResponse {
    /// Continuation token for the next page, ignoring empty strings.
    #[must_use]
    pub fn next_token(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub id: String,
    pub snippet: CommentThreadSnippet,
    /// Only present when the request asked for `part=replies`.
    #[serde(default)]
    pub replies: Option<CommentThreadReplies>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: Comment,
    #[serde(default)]
    pub total_reply_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentThreadReplies {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub id: String,
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    #[serde(default)]
    pub author_display_name: String,
    #[serde(default)]
    pub text_display: String,
    #[serde(default)]
    pub text_original: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    pub published_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// videos.list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoItem {
    #[serde(default)]
    pub snippet: Option<VideoSnippet>,
    #[serde(default)]
    pub statistics: Option<RawVideoStatistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoSnippet {
    pub channel_id: String,
}

/// Counts arrive as decimal strings and may be hidden by the owner.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawVideoStatistics {
    #[serde(default)]
    pub view_count: Option<String>,
    #[serde(default)]
    pub like_count: Option<String>,
    #[serde(default)]
    pub comment_count: Option<String>,
}

/// Public statistics of one video. `None` means the platform hides the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VideoStats {
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}

impl From<RawVideoStatistics> for VideoStats {
    fn from(raw: RawVideoStatistics) -> Self {
        Self {
            view_count: parse_count(raw.view_count.as_deref()),
            like_count: parse_count(raw.like_count.as_deref()),
            comment_count: parse_count(raw.comment_count.as_deref()),
        }
    }
}

// ---------------------------------------------------------------------------
// channels.list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelItem {
    pub snippet: ChannelSnippet,
    #[serde(default)]
    pub statistics: Option<RawChannelStatistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChannelSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Thumbnails {
    #[serde(default)]
    pub default: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    #[serde(default)]
    pub high: Option<Thumbnail>,
}

impl Thumbnails {
    /// Largest available thumbnail URL.
    fn best_url(self) -> Option<String> {
        self.high.or(self.medium).or(self.default).map(|t| t.url)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawChannelStatistics {
    #[serde(default)]
    pub video_count: Option<String>,
    #[serde(default)]
    pub subscriber_count: Option<String>,
    #[serde(default)]
    pub hidden_subscriber_count: bool,
}

/// Channel metadata shown next to the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelInfo {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub video_count: Option<u64>,
    pub subscriber_count: Option<u64>,
}

impl ChannelInfo {
    pub(crate) fn from_item(channel_id: &str, item: ChannelItem) -> Self {
        let stats = item.statistics.unwrap_or_default();
        let subscriber_count = if stats.hidden_subscriber_count {
            None
        } else {
            parse_count(stats.subscriber_count.as_deref())
        };
        Self {
            channel_id: channel_id.to_owned(),
            title: item.snippet.title,
            description: item.snippet.description,
            logo_url: item.snippet.thumbnails.best_url(),
            created_at: item.snippet.published_at,
            video_count: parse_count(stats.video_count.as_deref()),
            subscriber_count,
        }
    }
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

/// `{ "error": { "code": 403, "message": "...", "errors": [{ "reason": "..." }] } }`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[serde(default)]
    pub reason: String,
}

fn parse_count(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
}
