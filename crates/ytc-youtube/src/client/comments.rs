//! `commentThreads.list` endpoint.

use ytc_core::VideoId;

use crate::collector::CommentThreadSource;
use crate::error::YoutubeError;
use crate::types::CommentThreadListResponse;

use super::YoutubeClient;

impl YoutubeClient {
    /// Fetches one page of top-level comment threads for a video.
    ///
    /// `page_token` is the continuation token from the previous page, `None`
    /// for the first page. With `include_replies` the API embeds (a subset of)
    /// each thread's replies.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::CommentsDisabled`] if the video has comments turned off.
    /// - [`YoutubeError::QuotaExceeded`] once the daily quota is spent.
    /// - [`YoutubeError::NotFound`] for an unknown video.
    /// - [`YoutubeError::Http`] / [`YoutubeError::Deserialize`] on transport
    ///   or schema failures.
    pub async fn list_comment_threads(
        &self,
        video_id: &VideoId,
        page_token: Option<&str>,
        page_size: u32,
        include_replies: bool,
    ) -> Result<CommentThreadListResponse, YoutubeError> {
        let part = if include_replies {
            "snippet,replies"
        } else {
            "snippet"
        };
        let max_results = page_size.to_string();
        let mut params = vec![
            ("part", part),
            ("videoId", video_id.as_str()),
            ("maxResults", max_results.as_str()),
            ("textFormat", "plainText"),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        self.get_json("commentThreads", &params).await
    }
}

impl CommentThreadSource for YoutubeClient {
    async fn list_comment_threads(
        &self,
        video_id: &VideoId,
        page_token: Option<&str>,
        page_size: u32,
        include_replies: bool,
    ) -> Result<CommentThreadListResponse, YoutubeError> {
        YoutubeClient::list_comment_threads(self, video_id, page_token, page_size, include_replies)
            .await
    }
}
