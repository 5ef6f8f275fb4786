//! Public URL resolution for stored files.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use url::Url;

use crate::config::Config;

/// Matches runs of two or more slashes for collapsing.
///
/// # Panics
///
/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static MULTI_SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("/{2,}").expect("valid regex literal"));

/// Resolve the public URL for a stored file.
///
/// Joins the upload URL prefix with the path relative to the upload root
/// when a prefix is configured, and the media URL/root fallback otherwise.
/// Callers must pass a path that actually lies under the chosen root;
/// anything else is an error.
pub fn media_url(config: &Config, path: &Path) -> Result<String> {
    let (prefix, root) = match &config.upload_url {
        Some(prefix) => (prefix.as_str(), config.upload_dir.as_path()),
        None => (config.media_url.as_str(), config.media_root.as_path()),
    };

    let relative = path.strip_prefix(root).with_context(|| {
        format!(
            "path {} is not under root {}",
            path.display(),
            root.display()
        )
    })?;

    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let joined = format!("{}/{}", prefix.trim_end_matches('/'), relative);

    Ok(collapse_slashes(&joined))
}

/// Collapse every run of consecutive slashes in the URL's path component.
///
/// The scheme and authority of absolute URLs are left untouched; purely
/// relative URLs have no authority, so the whole string is collapsed.
fn collapse_slashes(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) if !parsed.cannot_be_a_base() => {
            let path = MULTI_SLASH.replace_all(parsed.path(), "/").into_owned();
            parsed.set_path(&path);
            parsed.to_string()
        }
        _ => MULTI_SLASH.replace_all(url, "/").into_owned(),
    }
}
