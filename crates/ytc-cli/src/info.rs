//! `info` command handler: channel and video metadata for display.

use ytc_core::{AppConfig, VideoId};

use crate::{analyze::build_client, output};

/// # Errors
///
/// Returns an error if a metadata lookup fails.
pub(crate) async fn run_info(
    config: &AppConfig,
    video_id: &VideoId,
    json: bool,
) -> anyhow::Result<()> {
    let client = build_client(config)?;

    let channel_id = client.get_channel_id(video_id).await?;
    let (channel, stats) = tokio::try_join!(
        client.get_channel_info(&channel_id),
        client.get_video_stats(video_id),
    )?;

    if json {
        let value = serde_json::json!({
            "video_id": video_id,
            "channel": channel,
            "video": stats,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", output::render_info(video_id, &channel, &stats));
    }
    Ok(())
}
