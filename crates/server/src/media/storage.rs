//! File storage backends.
//!
//! The storage collaborator owns persistence and collision handling: callers
//! hand it a desired destination and get back the path actually written.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// File storage backend trait.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Save bytes at the given destination, returning the final path.
    ///
    /// Implementations never overwrite an existing file; on collision the
    /// destination is renamed until a free name is found.
    async fn save(&self, dest: &Path, data: &[u8]) -> Result<PathBuf>;
}

/// Local filesystem storage.
#[derive(Debug, Default)]
pub struct LocalFileStorage;

impl LocalFileStorage {
    /// Create a new local file storage.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(&self, dest: &Path, data: &[u8]) -> Result<PathBuf> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .await
                .context("failed to create upload directories")?;
        }

        let path = available_path(dest).await;

        // create_new so a concurrent save racing for the same name fails
        // instead of clobbering.
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .context("failed to create file")?;

        file.write_all(data).await.context("failed to write file")?;

        file.flush().await.context("failed to flush file")?;

        debug!(path = %path.display(), size = data.len(), "file written");
        Ok(path)
    }
}

/// Find a free variant of `dest`, suffixing `_1`, `_2`, ... before the
/// extension until no file exists at the candidate.
async fn available_path(dest: &Path) -> PathBuf {
    if !path_exists(dest).await {
        return dest.to_path_buf();
    }

    let stem = dest
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let ext = dest.extension().and_then(|e| e.to_str());
    let parent = dest.parent().unwrap_or_else(|| Path::new(""));

    let mut counter = 1u32;
    loop {
        let candidate = match ext {
            Some(ext) => parent.join(format!("{stem}_{counter}.{ext}")),
            None => parent.join(format!("{stem}_{counter}")),
        };
        if !path_exists(&candidate).await {
            return candidate;
        }
        counter += 1;
    }
}

async fn path_exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}
