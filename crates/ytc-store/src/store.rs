//! Snapshot store backed by a directory of `{video_id}.csv` files.
//!
//! The store owns exactly one directory. Every file operation, including
//! cleanup, is confined to files in it whose name is `<video id>.csv`; any
//! other file or subdirectory is left untouched.
//!
//! Saves write to a temporary file in the same directory and rename it over
//! the snapshot, so a failed save never leaves a half-written snapshot behind.
//! Concurrent saves of the same video are not coordinated: the last rename
//! wins.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ytc_core::{CommentRecord, VideoId};

use crate::csv_format;
use crate::error::StorageError;

pub const SNAPSHOT_EXTENSION: &str = "csv";

/// Result of a successful save.
///
/// Carries the written bytes so callers that want the content (for a
/// download, say) need not read the file back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHandle {
    pub video_id: VideoId,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub records: usize,
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Opens (creating if needed) the managed snapshot directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deterministic location of the snapshot for `video_id`.
    #[must_use]
    pub fn path_for(&self, video_id: &VideoId) -> PathBuf {
        self.dir
            .join(format!("{}.{SNAPSHOT_EXTENSION}", video_id.as_str()))
    }

    /// Writes `records` as the snapshot for `video_id`, replacing any
    /// previous one.
    ///
    /// Saving identical records twice produces byte-identical files.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the temporary file cannot be written or
    /// renamed into place. The previous snapshot is intact in that case.
    pub fn save(
        &self,
        video_id: &VideoId,
        records: &[CommentRecord],
    ) -> Result<StoreHandle, StorageError> {
        let path = self.path_for(video_id);
        let bytes = csv_format::encode(records)?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".ytc-")
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(|e| StorageError::io(&self.dir, e))?;
        tmp.write_all(&bytes)
            .map_err(|e| StorageError::io(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StorageError::io(tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| StorageError::io(&path, e.error))?;

        tracing::info!(
            video_id = %video_id,
            records = records.len(),
            path = %path.display(),
            "saved comment snapshot"
        );

        Ok(StoreHandle {
            video_id: video_id.clone(),
            path,
            bytes,
            records: records.len(),
        })
    }

    /// Reads back the snapshot for `video_id` in stored order.
    ///
    /// # Errors
    ///
    /// - [`StorageError::NotFound`] if no snapshot exists for `video_id`.
    /// - [`StorageError::Io`] / [`StorageError::Csv`] / [`StorageError::InvalidRow`]
    ///   if the file cannot be read or parsed.
    pub fn load(&self, video_id: &VideoId) -> Result<Vec<CommentRecord>, StorageError> {
        let path = self.path_for(video_id);
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound {
                    video_id: video_id.to_string(),
                });
            }
            Err(e) => return Err(StorageError::io(&path, e)),
        };
        csv_format::decode(std::io::BufReader::new(file), &path)
    }

    /// Video ids of every snapshot currently stored, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be listed.
    pub fn list(&self) -> Result<Vec<VideoId>, StorageError> {
        let mut ids: Vec<VideoId> = self
            .managed_entries()?
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Deletes every stored snapshot except the one for `keep`.
    ///
    /// Only `<video id>.csv` regular files directly inside the store directory
    /// are candidates. Returns the paths removed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be listed or a
    /// snapshot cannot be removed.
    pub fn cleanup(&self, keep: &VideoId) -> Result<Vec<PathBuf>, StorageError> {
        let mut removed = Vec::new();
        for (id, path) in self.managed_entries()? {
            if &id == keep {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => {}
                // Already gone; nothing left to clean.
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(StorageError::io(&path, e)),
            }
            tracing::info!(video_id = %id, path = %path.display(), "removed stale snapshot");
            removed.push(path);
        }
        removed.sort();
        Ok(removed)
    }

    fn managed_entries(&self) -> Result<Vec<(VideoId, PathBuf)>, StorageError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        let mut managed = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&self.dir, e))?;
            // `DirEntry::file_type` does not follow symlinks.
            let is_file = entry
                .file_type()
                .map_err(|e| StorageError::io(entry.path(), e))?
                .is_file();
            if !is_file {
                continue;
            }
            let path = entry.path();
            if let Some(id) = snapshot_id(&path) {
                managed.push((id, path));
            }
        }
        Ok(managed)
    }
}

/// The video id a snapshot file name encodes, if `path` looks like one.
fn snapshot_id(path: &Path) -> Option<VideoId> {
    if path.extension()?.to_str()? != SNAPSHOT_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    VideoId::parse(stem).ok().filter(|id| id.as_str() == stem)
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
