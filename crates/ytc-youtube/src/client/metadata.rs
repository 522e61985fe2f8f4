//! Channel and video metadata lookups used for display next to the analysis.

use ytc_core::VideoId;

use crate::error::YoutubeError;
use crate::types::{ChannelInfo, ChannelListResponse, VideoListResponse, VideoStats};

use super::YoutubeClient;

impl YoutubeClient {
    /// Resolves the channel that uploaded `video_id`.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::NotFound`] if the API knows no such video, or
    /// any transport/API error from the `videos` endpoint.
    pub async fn get_channel_id(&self, video_id: &VideoId) -> Result<String, YoutubeError> {
        let response: VideoListResponse = self
            .get_json("videos", &[("part", "snippet"), ("id", video_id.as_str())])
            .await?;

        response
            .items
            .into_iter()
            .find_map(|item| item.snippet)
            .map(|snippet| snippet.channel_id)
            .ok_or_else(|| YoutubeError::NotFound {
                message: format!("video {video_id}"),
            })
    }

    /// Fetches public view/like/comment counts for `video_id`.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::NotFound`] if the API knows no such video, or
    /// any transport/API error from the `videos` endpoint.
    pub async fn get_video_stats(&self, video_id: &VideoId) -> Result<VideoStats, YoutubeError> {
        let response: VideoListResponse = self
            .get_json(
                "videos",
                &[("part", "statistics"), ("id", video_id.as_str())],
            )
            .await?;

        response
            .items
            .into_iter()
            .next()
            .map(|item| VideoStats::from(item.statistics.unwrap_or_default()))
            .ok_or_else(|| YoutubeError::NotFound {
                message: format!("video {video_id}"),
            })
    }

    /// Fetches title, logo, creation date, counts and description of a channel.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::NotFound`] if the API knows no such channel, or
    /// any transport/API error from the `channels` endpoint.
    pub async fn get_channel_info(&self, channel_id: &str) -> Result<ChannelInfo, YoutubeError> {
        let response: ChannelListResponse = self
            .get_json(
                "channels",
                &[("part", "snippet,statistics"), ("id", channel_id)],
            )
            .await?;

        response
            .items
            .into_iter()
            .next()
            .map(|item| ChannelInfo::from_item(channel_id, item))
            .ok_or_else(|| YoutubeError::NotFound {
                message: format!("channel {channel_id}"),
            })
    }
}
