//! Reading and atomically replacing the persisted rule list.
//!
//! Writes go to a sibling temp file which is renamed over the target, so a
//! reader only ever sees the previous copy or the complete new one.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::AsyncWriteExt;

use crate::Error;

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// File-backed storage for raw rule text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStore;

impl CacheStore {
    /// Read the whole persisted copy as text.
    pub async fn read(&self, path: &Path) -> Result<String, Error> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| Error::StorageRead { path: path.to_path_buf(), source })?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "read persisted rule list");
        Ok(text)
    }

    /// Replace the persisted copy with `text`.
    ///
    /// On failure the previous copy (if any) is left untouched and the temp
    /// file is removed.
    pub async fn write_atomic(&self, path: &Path, text: &str) -> Result<(), Error> {
        let temp = temp_path_for(path);

        let result = write_then_rename(path, &temp, text).await;
        if result.is_err() {
            let _ = tokio::fs::remove_file(&temp).await;
        }

        result.map_err(|source| Error::StorageWrite { path: path.to_path_buf(), source })?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "persisted rule list");
        Ok(())
    }
}

async fn write_then_rename(path: &Path, temp: &Path, text: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut file = tokio::fs::File::create(temp).await?;
    file.write_all(text.as_bytes()).await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(temp, path).await
}

/// Unique sibling path: `.<name>.<pid>.<seq>.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rules".to_string());
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let temp_name = format!(".{name}.{}.{seq}.tmp", std::process::id());
    path.with_file_name(temp_name)
}
