//! Terminal and JSON rendering of analysis results.

use std::fmt::Write as _;
use std::path::Path;

use ytc_core::{SentimentLabel, SentimentSummary, VideoId};
use ytc_sentiment::LabeledComment;
use ytc_youtube::{ChannelInfo, VideoStats};

const BAR_WIDTH: usize = 40;

/// Per-label counts, percentages and a text bar chart.
pub(crate) fn render_summary(summary: &SentimentSummary) -> String {
    let mut out = String::new();
    for label in SentimentLabel::ALL {
        let share = summary.share(label);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_precision_loss,
            clippy::cast_sign_loss
        )]
        let filled = ((share / 100.0) * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "{:<9} {:>6} {:>6.1}%  {}",
            label.as_str(),
            summary.count(label),
            share,
            "#".repeat(filled.min(BAR_WIDTH))
        );
    }
    let _ = writeln!(out, "{:<9} {:>6}", "total", summary.total());
    out
}

pub(crate) fn analysis_json(
    video_id: &VideoId,
    snapshot: Option<&Path>,
    summary: &SentimentSummary,
    labeled: &[LabeledComment],
) -> serde_json::Value {
    serde_json::json!({
        "video_id": video_id,
        "snapshot": snapshot.map(|p| p.display().to_string()),
        "summary": summary,
        "total": summary.total(),
        "comments": labeled,
    })
}

fn count(value: Option<u64>) -> String {
    value.map_or_else(|| "hidden".to_owned(), |v| v.to_string())
}

pub(crate) fn render_info(video_id: &VideoId, channel: &ChannelInfo, stats: &VideoStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "channel:      {} ({})", channel.title, channel.channel_id);
    let _ = writeln!(out, "created:      {}", channel.created_at.format("%Y-%m-%d"));
    let _ = writeln!(out, "subscribers:  {}", count(channel.subscriber_count));
    let _ = writeln!(out, "videos:       {}", count(channel.video_count));
    if let Some(logo) = &channel.logo_url {
        let _ = writeln!(out, "logo:         {logo}");
    }
    if !channel.description.trim().is_empty() {
        let _ = writeln!(out, "description:  {}", channel.description.trim());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "video:        {video_id}");
    let _ = writeln!(out, "views:        {}", count(stats.view_count));
    let _ = writeln!(out, "likes:        {}", count(stats.like_count));
    let _ = writeln!(out, "comments:     {}", count(stats.comment_count));
    out
}
