//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Directory under which all uploads are stored (default: ./uploads).
    pub upload_dir: PathBuf,

    /// URL prefix for serving uploaded files. When set, public URLs join
    /// this prefix with the path relative to `upload_dir`.
    pub upload_url: Option<String>,

    /// Fallback root paired with `media_url` when `upload_url` is not set
    /// (default: the upload directory).
    pub media_root: PathBuf,

    /// Fallback URL prefix when `upload_url` is not set (default: /media).
    pub media_url: String,

    /// Scope uploads and browsing to a per-user subdirectory (default: false).
    pub restrict_by_user: bool,

    /// Path to the Tera template directory (default: ./templates).
    pub templates_dir: PathBuf,

    /// Cookie SameSite policy: "strict", "lax", or "none" (default: "strict").
    pub cookie_same_site: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./uploads"));

        let upload_url = env::var("UPLOAD_URL").ok().filter(|v| !v.is_empty());

        let media_root = env::var("MEDIA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| upload_dir.clone());

        let media_url = env::var("MEDIA_URL").unwrap_or_else(|_| "/media".to_string());

        let restrict_by_user = env::var("RESTRICT_BY_USER")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let templates_dir = env::var("TEMPLATES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./templates"));

        let cookie_same_site = env::var("COOKIE_SAME_SITE")
            .unwrap_or_else(|_| "strict".to_string())
            .to_lowercase();

        Ok(Self {
            port,
            upload_dir,
            upload_url,
            media_root,
            media_url,
            restrict_by_user,
            templates_dir,
            cookie_same_site,
        })
    }
}
