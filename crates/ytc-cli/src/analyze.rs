//! `analyze` and `summarize` command handlers.

use std::path::{Path, PathBuf};

use ytc_core::{AppConfig, CommentRecord, VideoId};
use ytc_store::{SnapshotStore, StorageError, StoreHandle};
use ytc_youtube::{
    CancellationToken, CollectionError, CommentCollector, CommentThreadSource, YoutubeClient,
    YoutubeError,
};

use crate::output;

/// Builds the process-wide API client from configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the base URL is
/// invalid.
pub(crate) fn build_client(config: &AppConfig) -> anyhow::Result<YoutubeClient> {
    let client = YoutubeClient::with_base_url(
        &config.youtube_api_key,
        config.request_timeout_secs,
        &config.api_base_url,
    )?
    .with_retry_policy(config.max_retries, config.retry_backoff_base_ms);
    Ok(client)
}

/// Collect, store, clean up and summarize the comments of one video.
///
/// Nothing is written unless the whole comment set was collected. Ctrl-C
/// cancels collection between page fetches, and stops the run before the
/// save or the cleanup if it arrives later.
///
/// # Errors
///
/// Returns an error for a failed or cancelled collection, or a storage
/// failure.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    video_id: &VideoId,
    json: bool,
    keep_others: bool,
) -> anyhow::Result<()> {
    let store = SnapshotStore::open(&config.snapshot_dir)?;
    let client = build_client(config)?;
    let collector = CommentCollector::new(&client, config.page_size)
        .with_replies(config.include_replies);

    tracing::info!(video_id = %video_id, "collecting comments");

    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn(cancel_on_ctrl_c(cancel.clone()));
    let stored = collect_and_store(&collector, &store, video_id, keep_others, &cancel).await;
    ctrl_c.abort();
    let Stored {
        handle,
        removed,
        records,
    } = stored?;

    let (summary, labeled) = ytc_sentiment::summarize(&records);

    if json {
        let value = output::analysis_json(video_id, Some(&handle.path), &summary, &labeled);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("video:     {video_id}");
        println!(
            "snapshot:  {} ({} comments, {} bytes)",
            handle.path.display(),
            handle.records,
            handle.bytes.len()
        );
        if !removed.is_empty() {
            println!("removed {} stale snapshot(s)", removed.len());
        }
        println!();
        print!("{}", output::render_summary(&summary));
    }

    Ok(())
}

/// Outcome of a completed collection that reached the store.
#[derive(Debug)]
pub(crate) struct Stored {
    pub(crate) handle: StoreHandle,
    pub(crate) removed: Vec<PathBuf>,
    pub(crate) records: Vec<CommentRecord>,
}

/// Runs a full collection, then saves and (unless `keep_others`) cleans up.
///
/// A failed or cancelled collection returns before the store is touched.
///
/// # Errors
///
/// Returns an error if collection fails, `cancel` fires, or the store
/// rejects the save or the cleanup.
pub(crate) async fn collect_and_store<S: CommentThreadSource>(
    collector: &CommentCollector<S>,
    store: &SnapshotStore,
    video_id: &VideoId,
    keep_others: bool,
    cancel: &CancellationToken,
) -> anyhow::Result<Stored> {
    let records = collector
        .collect(video_id, cancel)
        .await
        .map_err(collection_failure)?;
    let (handle, removed) = store_snapshot(store, video_id, &records, keep_others, cancel)?;
    Ok(Stored {
        handle,
        removed,
        records,
    })
}

/// Saves `records` and removes stale snapshots, checking `cancel` before
/// each step.
///
/// # Errors
///
/// Returns an error if `cancel` has fired or the store fails.
pub(crate) fn store_snapshot(
    store: &SnapshotStore,
    video_id: &VideoId,
    records: &[CommentRecord],
    keep_others: bool,
    cancel: &CancellationToken,
) -> anyhow::Result<(StoreHandle, Vec<PathBuf>)> {
    if cancel.is_cancelled() {
        anyhow::bail!("analysis of {video_id} cancelled; no snapshot was written");
    }
    let handle = store.save(video_id, records)?;

    if keep_others {
        return Ok((handle, Vec::new()));
    }
    if cancel.is_cancelled() {
        tracing::warn!(path = %handle.path.display(), "interrupted after save, skipping cleanup");
        anyhow::bail!(
            "analysis of {video_id} cancelled after saving {}; other snapshots were kept",
            handle.path.display()
        );
    }
    let removed = store.cleanup(video_id)?;
    Ok((handle, removed))
}

/// Re-classify a stored snapshot. No network access.
///
/// # Errors
///
/// Returns an error if `video` is not a URL or id, or no readable snapshot is
/// stored for it.
pub(crate) fn run_summarize(snapshot_dir: &Path, video: &str, json: bool) -> anyhow::Result<()> {
    let video_id = VideoId::from_url_or_id(video)?;
    let store = SnapshotStore::open(snapshot_dir)?;

    let records = match store.load(&video_id) {
        Ok(records) => records,
        Err(StorageError::NotFound { .. }) => anyhow::bail!(
            "no snapshot stored for {video_id} in {}; run `ytc analyze` first",
            snapshot_dir.display()
        ),
        Err(e) => return Err(e.into()),
    };

    let (summary, labeled) = ytc_sentiment::summarize(&records);

    if json {
        let path = store.path_for(&video_id);
        let value = output::analysis_json(&video_id, Some(&path), &summary, &labeled);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("video:     {video_id}");
        println!();
        print!("{}", output::render_summary(&summary));
    }

    Ok(())
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::warn!("interrupt received, cancelling analysis");
        cancel.cancel();
    }
}

/// Turns a collection failure into a message a user can act on.
pub(crate) fn collection_failure(err: CollectionError) -> anyhow::Error {
    let message = match &err {
        CollectionError::Cancelled { video_id, .. } => Some(format!(
            "collection of {video_id} cancelled; no snapshot was written"
        )),
        CollectionError::Remote {
            video_id, source, ..
        } => match source {
            YoutubeError::CommentsDisabled { .. } => {
                Some(format!("comments are disabled for video {video_id}"))
            }
            YoutubeError::NotFound { .. } => Some(format!("video {video_id} was not found")),
            YoutubeError::QuotaExceeded { .. } => Some(
                "YouTube API quota exhausted; try again after the daily quota reset".to_owned(),
            ),
            _ => None,
        },
        CollectionError::RepeatedPageToken { .. } | CollectionError::PaginationLimit { .. } => {
            None
        }
    };

    match message {
        Some(message) => anyhow::Error::new(err).context(message),
        None => anyhow::Error::new(err),
    }
}
