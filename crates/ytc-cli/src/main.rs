mod analyze;
mod info;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ytc_core::config::{validate_log_filter, DEFAULT_LOG_LEVEL, DEFAULT_SNAPSHOT_DIR};

#[derive(Debug, Parser)]
#[command(name = "ytc")]
#[command(about = "Collect YouTube comments and summarize their sentiment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect every comment of a video, store the snapshot and summarize it
    Analyze {
        /// Video sharing URL (watch?v=..., youtu.be/..., shorts/...)
        url: String,

        /// Print the summary and labeled comments as JSON
        #[arg(long)]
        json: bool,

        /// Keep snapshots of other videos instead of removing them
        #[arg(long)]
        keep_others: bool,
    },
    /// Summarize an already stored snapshot without network access
    Summarize {
        /// Video sharing URL or bare video id
        video: String,

        /// Print the summary and labeled comments as JSON
        #[arg(long)]
        json: bool,

        /// Directory holding the snapshots
        #[arg(long, env = "YTC_SNAPSHOT_DIR", default_value = DEFAULT_SNAPSHOT_DIR)]
        snapshot_dir: PathBuf,
    },
    /// Show channel details and video statistics
    Info {
        /// Video sharing URL
        url: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            url,
            json,
            keep_others,
        } => {
            let video_id = ytc_core::extract_video_id(&url)?;
            let config = ytc_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            analyze::run_analyze(&config, &video_id, json, keep_others).await
        }
        Commands::Summarize {
            video,
            json,
            snapshot_dir,
        } => {
            let level =
                std::env::var("YTC_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_owned());
            validate_log_filter(&level)
                .map_err(|reason| anyhow::anyhow!("invalid YTC_LOG_LEVEL: {reason}"))?;
            init_tracing(&level)?;
            analyze::run_summarize(&snapshot_dir, &video, json)
        }
        Commands::Info { url, json } => {
            let video_id = ytc_core::extract_video_id(&url)?;
            let config = ytc_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            info::run_info(&config, &video_id, json).await
        }
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
