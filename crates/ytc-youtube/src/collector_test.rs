use std::collections::VecDeque;
use std::sync::Mutex;

use futures::TryStreamExt;

use super::*;
use crate::types::CommentThread;

fn video() -> VideoId {
    VideoId::parse("dQw4w9WgXcQ").unwrap()
}

fn thread(author: &str) -> CommentThread {
    serde_json::from_value(serde_json::json!({
        "id": format!("thread-{author}"),
        "snippet": {
            "topLevelComment": {
                "id": format!("thread-{author}"),
                "snippet": {
                    "authorDisplayName": author,
                    "textDisplay": format!("comment by {author}"),
                    "likeCount": 1,
                    "publishedAt": "2024-05-01T12:00:00Z"
                }
            }
        }
    }))
    .unwrap()
}

fn page(prefix: &str, count: usize, next: Option<&str>) -> CommentThreadListResponse {
    CommentThreadListResponse {
        next_page_token: next.map(str::to_owned),
        items: (0..count).map(|i| thread(&format!("{prefix}-{i}"))).collect(),
    }
}

/// Replays a fixed script of page responses and records every token it sees.
#[derive(Default)]
struct ScriptedSource {
    responses: Mutex<VecDeque<Result<CommentThreadListResponse, YoutubeError>>>,
    seen_tokens: Mutex<Vec<Option<String>>>,
    seen_page_sizes: Mutex<Vec<u32>>,
    cancel_on_call: Option<(usize, CancellationToken)>,
}

impl ScriptedSource {
    fn new(responses: Vec<Result<CommentThreadListResponse, YoutubeError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.seen_tokens.lock().unwrap().len()
    }
}

impl CommentThreadSource for ScriptedSource {
    async fn list_comment_threads(
        &self,
        _video_id: &VideoId,
        page_token: Option<&str>,
        page_size: u32,
        _include_replies: bool,
    ) -> Result<CommentThreadListResponse, YoutubeError> {
        let call = {
            let mut tokens = self.seen_tokens.lock().unwrap();
            tokens.push(page_token.map(str::to_owned));
            tokens.len()
        };
        self.seen_page_sizes.lock().unwrap().push(page_size);
        if let Some((at, token)) = &self.cancel_on_call {
            if *at == call {
                token.cancel();
            }
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CommentThreadListResponse::default()))
    }
}

fn three_page_script() -> Vec<Result<CommentThreadListResponse, YoutubeError>> {
    vec![
        Ok(page("p1", 100, Some("token-2"))),
        Ok(page("p2", 100, Some("token-3"))),
        Ok(page("p3", 37, None)),
    ]
}

#[tokio::test]
async fn collects_every_page_in_api_order() {
    let source = ScriptedSource::new(three_page_script());
    let collector = CommentCollector::new(&source, 100);

    let records = collector
        .collect(&video(), &CancellationToken::new())
        .await
        .expect("collection should succeed");

    assert_eq!(records.len(), 237);
    assert_eq!(records[0].author, "p1-0");
    assert_eq!(records[99].author, "p1-99");
    assert_eq!(records[100].author, "p2-0");
    assert_eq!(records[236].author, "p3-36");

    let tokens = source.seen_tokens.lock().unwrap().clone();
    assert_eq!(
        tokens,
        vec![None, Some("token-2".to_owned()), Some("token-3".to_owned())]
    );
}

#[tokio::test]
async fn stream_yields_same_records_and_restarts_per_call() {
    let mut script = three_page_script();
    script.extend(three_page_script());
    let source = ScriptedSource::new(script);
    let collector = CommentCollector::new(&source, 100);
    let id = video();

    let first: Vec<CommentRecord> = collector.stream(&id).try_collect().await.unwrap();
    let second: Vec<CommentRecord> = collector.stream(&id).try_collect().await.unwrap();

    assert_eq!(first.len(), 237);
    assert_eq!(first, second);
    assert_eq!(source.calls(), 6);
}

#[tokio::test]
async fn stream_is_lazy_until_polled() {
    let source = ScriptedSource::new(three_page_script());
    let collector = CommentCollector::new(&source, 100);
    let id = video();

    let stream = collector.stream(&id);
    assert_eq!(source.calls(), 0);
    drop(stream);
}

#[tokio::test]
async fn failure_on_second_page_discards_first_page() {
    let source = ScriptedSource::new(vec![
        Ok(page("p1", 100, Some("token-2"))),
        Err(YoutubeError::QuotaExceeded {
            message: "The request cannot be completed because you have exceeded your quota."
                .to_owned(),
        }),
        Ok(page("p3", 37, None)),
    ]);
    let collector = CommentCollector::new(&source, 100);

    let err = collector
        .collect(&video(), &CancellationToken::new())
        .await
        .expect_err("second page failure must fail the whole collection");

    match &err {
        CollectionError::Remote { page, source, .. } => {
            assert_eq!(*page, 2);
            assert!(matches!(source, YoutubeError::QuotaExceeded { .. }));
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
    assert!(err.remote_cause().is_some());
    assert_eq!(source.calls(), 2, "no page after the failure is requested");
}

#[tokio::test]
async fn comments_disabled_on_first_page_is_reported() {
    let source = ScriptedSource::new(vec![Err(YoutubeError::CommentsDisabled {
        message: "disabled".to_owned(),
    })]);
    let collector = CommentCollector::new(&source, 100);

    let err = collector
        .collect(&video(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err.remote_cause(),
        Some(YoutubeError::CommentsDisabled { .. })
    ));
}

#[tokio::test]
async fn empty_video_yields_no_records() {
    let source = ScriptedSource::new(vec![Ok(page("p1", 0, None))]);
    let collector = CommentCollector::new(&source, 100);

    let records = collector
        .collect(&video(), &CancellationToken::new())
        .await
        .unwrap();
    assert!(records.is_empty());
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn empty_continuation_token_ends_pagination() {
    let source = ScriptedSource::new(vec![
        Ok(page("p1", 5, Some(""))),
        Ok(page("never", 5, None)),
    ]);
    let collector = CommentCollector::new(&source, 100);

    let records = collector
        .collect(&video(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn cancelled_before_start_fetches_nothing() {
    let source = ScriptedSource::new(three_page_script());
    let collector = CommentCollector::new(&source, 100);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = collector.collect(&video(), &cancel).await.unwrap_err();
    assert!(matches!(err, CollectionError::Cancelled { pages: 0, .. }));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn cancellation_between_pages_stops_pagination() {
    let cancel = CancellationToken::new();
    let source = ScriptedSource {
        cancel_on_call: Some((2, cancel.clone())),
        ..ScriptedSource::new(three_page_script())
    };
    let collector = CommentCollector::new(&source, 100);

    let err = collector.collect(&video(), &cancel).await.unwrap_err();
    assert!(
        matches!(err, CollectionError::Cancelled { pages: 2, .. }),
        "got {err:?}"
    );
    assert_eq!(source.calls(), 2, "third page must not be requested");
}

#[tokio::test]
async fn repeated_token_stops_collection() {
    let script = (0..10)
        .map(|_| Ok(page("loop", 1, Some("same-token"))))
        .collect();
    let source = ScriptedSource::new(script);
    let collector = CommentCollector::new(&source, 100);

    let err = collector
        .collect(&video(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(
        matches!(err, CollectionError::RepeatedPageToken { page: 2, .. }),
        "got {err:?}"
    );
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn token_cycle_longer_than_one_page_is_detected() {
    let source = ScriptedSource::new(vec![
        Ok(page("p1", 1, Some("a"))),
        Ok(page("p2", 1, Some("b"))),
        Ok(page("p3", 1, Some("a"))),
        Ok(page("p4", 1, None)),
    ]);
    let collector = CommentCollector::new(&source, 100);

    let err = collector
        .collect(&video(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(
        matches!(err, CollectionError::RepeatedPageToken { page: 3, .. }),
        "got {err:?}"
    );
    assert!(err.remote_cause().is_none());
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn fresh_tokens_past_the_cap_hit_the_page_limit() {
    let source = ScriptedSource::new(vec![
        Ok(page("p1", 1, Some("t1"))),
        Ok(page("p2", 1, Some("t2"))),
        Ok(page("p3", 1, Some("t3"))),
        Ok(page("p4", 1, None)),
    ]);
    let collector = CommentCollector::new(&source, 100).with_max_pages(3);

    let err = collector
        .collect(&video(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(
        matches!(err, CollectionError::PaginationLimit { max_pages: 3, .. }),
        "got {err:?}"
    );
    assert_eq!(source.calls(), 3, "fourth page must not be requested");
}

#[tokio::test]
async fn page_size_is_clamped_to_api_range() {
    let source = ScriptedSource::new(vec![Ok(page("p1", 1, None))]);
    let collector = CommentCollector::new(&source, 500);
    collector
        .collect(&video(), &CancellationToken::new())
        .await
        .unwrap();

    let source_zero = ScriptedSource::new(vec![Ok(page("p1", 1, None))]);
    let collector_zero = CommentCollector::new(&source_zero, 0);
    collector_zero
        .collect(&video(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(*source.seen_page_sizes.lock().unwrap(), vec![100]);
    assert_eq!(*source_zero.seen_page_sizes.lock().unwrap(), vec![1]);
}
