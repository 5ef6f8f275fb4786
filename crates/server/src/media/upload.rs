//! Upload destination derivation.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Identity of the uploading or browsing user, as provided by the embedding
/// application's session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadUser {
    pub username: String,
    pub superuser: bool,
}

/// Compute the destination path for an upload.
///
/// Layout: `<upload_dir>/[<username>/]<year>/<month>/<day>/<filename>`, with
/// the filename lower-cased. The per-user segment is added when
/// `restrict_by_user` is on and the user has a non-empty username; this
/// applies to superusers as well, only browsing exempts them.
pub fn upload_destination(
    config: &Config,
    user: Option<&UploadUser>,
    filename: &str,
    date: NaiveDate,
) -> PathBuf {
    let mut dest = config.upload_dir.clone();

    if config.restrict_by_user
        && let Some(user) = user
        && !user.username.is_empty()
    {
        dest.push(&user.username);
    }

    dest.push(date.format("%Y").to_string());
    dest.push(date.format("%m").to_string());
    dest.push(date.format("%d").to_string());

    // Only the final component of the client-supplied name is used.
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);
    dest.push(name.to_lowercase());

    dest
}
