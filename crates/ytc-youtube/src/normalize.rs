//! Mapping of API comment threads onto [`CommentRecord`]s.

use ytc_core::CommentRecord;

use crate::types::{Comment, CommentThread};

/// Converts one API comment into a record.
///
/// `textOriginal` is preferred over `textDisplay` since the latter may be
/// HTML-formatted depending on the request's `textFormat`.
pub(crate) fn comment_to_record(comment: Comment) -> CommentRecord {
    let snippet = comment.snippet;
    let text = match snippet.text_original {
        Some(original) if !original.is_empty() => original,
        _ => snippet.text_display,
    };
    CommentRecord {
        author: snippet.author_display_name,
        text,
        like_count: snippet.like_count,
        published_at: snippet.published_at,
    }
}

/// Expands one thread into records: the top-level comment first, then (when
/// requested) its embedded replies in API order.
///
/// Replies repeating the top-level comment's id are skipped so a thread never
/// yields its top-level record twice.
pub(crate) fn thread_to_records(thread: CommentThread, include_replies: bool) -> Vec<CommentRecord> {
    let top = thread.snippet.top_level_comment;
    let top_id = top.id.clone();
    let mut records = vec![comment_to_record(top)];

    if include_replies {
        if let Some(replies) = thread.replies {
            records.extend(
                replies
                    .comments
                    .into_iter()
                    .filter(|reply| reply.id != top_id)
                    .map(comment_to_record),
            );
        }
    }

    records
}
