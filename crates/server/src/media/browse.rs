//! Image browsing over the upload tree.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::Config;

use super::thumbnail::{is_thumbnail, thumb_filename};
use super::upload::UploadUser;
use super::url::media_url;

/// Thumbnail and source URLs for one browsable image.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseEntry {
    pub thumb: String,
    pub src: String,
}

/// Root directory a user may browse.
///
/// With restriction enabled, non-superusers are confined to their own upload
/// subdirectory; superusers and anonymous requests see the whole tree.
pub fn browse_root(config: &Config, user: Option<&UploadUser>) -> PathBuf {
    if config.restrict_by_user
        && let Some(user) = user
        && !user.superuser
        && !user.username.is_empty()
    {
        return config.upload_dir.join(&user.username);
    }

    config.upload_dir.clone()
}

/// Walk a directory tree and list every stored file that is not a thumbnail.
///
/// Order is whatever the walk yields; entries that cannot be read are
/// skipped rather than failing the whole listing.
pub fn image_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| !is_thumbnail(path))
        .collect()
}

/// Build the thumbnail/source URL pairs for the browse listing.
pub fn browse_entries(config: &Config, user: Option<&UploadUser>) -> Result<Vec<BrowseEntry>> {
    let root = browse_root(config, user);

    image_files(&root)
        .into_iter()
        .map(|path| {
            Ok(BrowseEntry {
                thumb: media_url(config, &thumb_filename(&path))?,
                src: media_url(config, &path)?,
            })
        })
        .collect()
}
