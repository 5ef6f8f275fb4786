//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::media::{FileStorage, LocalFileStorage, ThumbnailService};
use crate::theme::ThemeEngine;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Application configuration.
    config: Config,

    /// Storage backend for uploaded files.
    storage: Arc<dyn FileStorage>,

    /// Thumbnail generation service.
    thumbnails: ThumbnailService,

    /// Theme engine for template rendering.
    theme: Arc<ThemeEngine>,
}

impl AppState {
    /// Initialize application state from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        // The upload root must exist for browsing and health checks even
        // before the first upload lands.
        std::fs::create_dir_all(&config.upload_dir)
            .context("failed to create upload directory")?;

        let storage: Arc<dyn FileStorage> = Arc::new(LocalFileStorage::new());

        let theme = Arc::new(
            ThemeEngine::new(&config.templates_dir).context("failed to load templates")?,
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config: config.clone(),
                storage,
                thumbnails: ThumbnailService::new(),
                theme,
            }),
        })
    }

    /// Get the application configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the file storage backend.
    pub fn storage(&self) -> &Arc<dyn FileStorage> {
        &self.inner.storage
    }

    /// Get the thumbnail service.
    pub fn thumbnails(&self) -> &ThumbnailService {
        &self.inner.thumbnails
    }

    /// Get the theme engine.
    pub fn theme(&self) -> &Arc<ThemeEngine> {
        &self.inner.theme
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .finish()
    }
}
