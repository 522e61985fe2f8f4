//! Durable comment snapshots, one CSV file per video.

pub mod csv_format;
pub mod error;
pub mod store;

pub use error::StorageError;
pub use store::{SnapshotStore, StoreHandle, SNAPSHOT_EXTENSION};
