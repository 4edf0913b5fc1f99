// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::models::snapshot::ResultSnapshot;

#[derive(Error, Debug)]
pub enum SnapshotStoreError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// JSON persistence for the single result snapshot.
///
/// Writes are all-or-nothing: the snapshot is serialized to a temporary
/// file in the same directory and renamed over the previous one, so a
/// concurrent reader sees either the old snapshot or the new one, never a
/// partial write.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Option<ResultSnapshot>, SnapshotStoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, snapshot: &ResultSnapshot) -> Result<(), SnapshotStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Temp file lives next to the target so the rename stays on one
        // filesystem and is atomic.
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let mut file = fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&tmp, &self.path).await?;
        debug!(
            "Persisted snapshot with {} artists / {} records to {}",
            snapshot.artists.len(),
            snapshot.results.len(),
            self.path.display()
        );
        Ok(())
    }
}
