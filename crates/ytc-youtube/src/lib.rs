//! YouTube Data API v3 access for the comment pipeline.
//!
//! [`YoutubeClient`] is the remote capability: comment thread listing plus the
//! channel/video metadata lookups used for display. [`CommentCollector`] drives
//! the paginated thread listing through the [`CommentThreadSource`] seam and
//! produces normalized [`ytc_core::CommentRecord`]s.

pub mod client;
pub mod collector;
pub mod error;
pub mod types;

mod normalize;
mod retry;

pub use client::YoutubeClient;
pub use collector::{CommentCollector, CommentThreadSource, MAX_PAGES};
pub use error::{CollectionError, YoutubeError};
pub use types::{ChannelInfo, CommentThreadListResponse, VideoStats};
pub use tokio_util::sync::CancellationToken;
