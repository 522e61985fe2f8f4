//! Shared domain types and configuration for the YouTube comment pipeline.

pub mod app_config;
pub mod comments;
pub mod config;
pub mod error;
pub mod video_id;

pub use app_config::AppConfig;
pub use comments::{CommentRecord, SentimentLabel, SentimentSummary};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, InvalidIdentifierError};
pub use video_id::{extract_video_id, VideoId};
