//! Paginated comment collection.
//!
//! The collector walks `commentThreads.list` page by page, following the
//! continuation token until the API stops returning one. Pages are fetched
//! strictly one after another since each token comes from the previous
//! response.
//!
//! **All-or-nothing**: [`CommentCollector::collect`] returns either every
//! record of the video or an error. Records gathered before a failure or a
//! cancellation are dropped, so a caller can never persist a partial snapshot.

use std::collections::HashSet;
use std::future::Future;
use std::pin::pin;

use futures::stream::{self, Stream, TryStreamExt};
use tokio_util::sync::CancellationToken;
use ytc_core::config::MAX_PAGE_SIZE;
use ytc_core::{CommentRecord, VideoId};

use crate::error::{CollectionError, YoutubeError};
use crate::normalize::thread_to_records;
use crate::types::CommentThreadListResponse;

/// Default number of pages to fetch before giving up: ten million top-level
/// threads at the maximum page size.
///
/// A continuation token seen twice already ends collection with
/// [`CollectionError::RepeatedPageToken`]; this cap only catches an API that
/// keeps handing out fresh tokens forever.
pub const MAX_PAGES: usize = 100_000;

/// Anything that can list comment threads page by page.
///
/// [`crate::YoutubeClient`] is the production implementation; tests plug in
/// scripted sources.
pub trait CommentThreadSource {
    fn list_comment_threads(
        &self,
        video_id: &VideoId,
        page_token: Option<&str>,
        page_size: u32,
        include_replies: bool,
    ) -> impl Future<Output = Result<CommentThreadListResponse, YoutubeError>> + Send;
}

impl<S: CommentThreadSource + Sync> CommentThreadSource for &S {
    fn list_comment_threads(
        &self,
        video_id: &VideoId,
        page_token: Option<&str>,
        page_size: u32,
        include_replies: bool,
    ) -> impl Future<Output = Result<CommentThreadListResponse, YoutubeError>> + Send {
        (**self).list_comment_threads(video_id, page_token, page_size, include_replies)
    }
}

enum PageCursor {
    First,
    Next(String),
    Done,
}

/// Drives paginated retrieval of every comment thread of a video.
pub struct CommentCollector<S> {
    source: S,
    page_size: u32,
    include_replies: bool,
    max_pages: usize,
}

impl<S: CommentThreadSource> CommentCollector<S> {
    /// `page_size` is clamped to the API's accepted range `1..=100`.
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            source,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            include_replies: false,
            max_pages: MAX_PAGES,
        }
    }

    /// Also emit the replies the API embeds in each thread, directly after
    /// their top-level comment.
    #[must_use]
    pub fn with_replies(mut self, include_replies: bool) -> Self {
        self.include_replies = include_replies;
        self
    }

    /// Overrides the page cap of [`MAX_PAGES`]. A cap of zero is raised to one.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Lazily yields the records of `video_id` in API order.
    ///
    /// Nothing is fetched until the stream is polled, and every call starts
    /// again from the first page. The stream ends after the last page, or
    /// right after yielding the first error.
    pub fn stream<'a>(
        &'a self,
        video_id: &'a VideoId,
    ) -> impl Stream<Item = Result<CommentRecord, CollectionError>> + 'a {
        self.pages(video_id)
            .map_ok(|records| stream::iter(records.into_iter().map(Ok::<_, CollectionError>)))
            .try_flatten()
    }

    /// Collects every record of `video_id`, checking `cancel` between page
    /// fetches.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::Remote`] if any page request fails; the cause is kept.
    /// - [`CollectionError::Cancelled`] if `cancel` fires before the last page.
    /// - [`CollectionError::RepeatedPageToken`] if the API hands out a
    ///   continuation token it already returned.
    /// - [`CollectionError::PaginationLimit`] after the page cap
    ///   ([`MAX_PAGES`] unless overridden).
    ///
    /// In every error case the records fetched so far are discarded.
    pub async fn collect(
        &self,
        video_id: &VideoId,
        cancel: &CancellationToken,
    ) -> Result<Vec<CommentRecord>, CollectionError> {
        let mut pages = pin!(self.pages(video_id));
        let mut records = Vec::new();
        let mut fetched = 0usize;

        let cancelled = |fetched_pages: usize| CollectionError::Cancelled {
            video_id: video_id.to_string(),
            pages: fetched_pages,
        };

        loop {
            if cancel.is_cancelled() {
                return Err(cancelled(fetched));
            }

            let next = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(cancelled(fetched)),
                next = pages.try_next() => next?,
            };

            let Some(batch) = next else { break };
            fetched += 1;
            records.extend(batch);
        }

        tracing::info!(
            video_id = %video_id,
            pages = fetched,
            records = records.len(),
            "collected comments"
        );
        Ok(records)
    }

    /// One item per fetched page, holding that page's normalized records.
    fn pages<'a>(
        &'a self,
        video_id: &'a VideoId,
    ) -> impl Stream<Item = Result<Vec<CommentRecord>, CollectionError>> + 'a {
        stream::try_unfold(
            (PageCursor::First, 0usize, HashSet::<String>::new()),
            move |(cursor, fetched, mut seen_tokens)| async move {
                let token = match cursor {
                    PageCursor::Done => return Ok(None),
                    PageCursor::First => None,
                    PageCursor::Next(token) => Some(token),
                };

                let page = fetched + 1;
                if page > self.max_pages {
                    return Err(CollectionError::PaginationLimit {
                        video_id: video_id.to_string(),
                        max_pages: self.max_pages,
                    });
                }

                let response = self
                    .source
                    .list_comment_threads(
                        video_id,
                        token.as_deref(),
                        self.page_size,
                        self.include_replies,
                    )
                    .await
                    .map_err(|source| CollectionError::Remote {
                        video_id: video_id.to_string(),
                        page,
                        source,
                    })?;

                let next = match response.next_token() {
                    Some(token) if !seen_tokens.insert(token.to_owned()) => {
                        return Err(CollectionError::RepeatedPageToken {
                            video_id: video_id.to_string(),
                            page,
                        });
                    }
                    Some(token) => PageCursor::Next(token.to_owned()),
                    None => PageCursor::Done,
                };

                let records: Vec<CommentRecord> = response
                    .items
                    .into_iter()
                    .flat_map(|thread| thread_to_records(thread, self.include_replies))
                    .collect();

                tracing::debug!(
                    video_id = %video_id,
                    page,
                    records = records.len(),
                    has_next = matches!(next, PageCursor::Next(_)),
                    "fetched comment page"
                );

                Ok::<_, CollectionError>(Some((records, (next, page, seen_tokens))))
            },
        )
    }
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod tests;
