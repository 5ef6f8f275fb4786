#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Builds the REAL server routes and state against a temporary upload tree,
//! so tests exercise actual behavior rather than mocks.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use tempfile::TempDir;
use tower::ServiceExt;

use scrivano_server::config::Config;
use scrivano_server::state::AppState;
use scrivano_server::{routes, session};

/// Test application wrapper using the real routes and state.
pub struct TestApp {
    router: Router,
    pub config: Config,
    /// Owns the upload tree for the lifetime of the test.
    upload_dir: TempDir,
}

impl TestApp {
    /// Create a test application rooted at a fresh temporary directory.
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test application, letting the caller adjust the config first.
    pub fn with_config(adjust: impl FnOnce(&mut Config)) -> Self {
        let upload_dir = TempDir::new().expect("create temp upload dir");

        // Integration tests run from crates/server; templates live at the
        // workspace root.
        let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        let templates_dir = Path::new(&manifest_dir)
            .parent() // crates/
            .and_then(|p| p.parent()) // workspace root
            .unwrap_or(Path::new("."))
            .join("templates");

        let mut config = Config {
            port: 0,
            upload_dir: upload_dir.path().to_path_buf(),
            upload_url: Some("/media/uploads/".to_string()),
            media_root: upload_dir.path().to_path_buf(),
            media_url: "/media".to_string(),
            restrict_by_user: false,
            templates_dir,
            cookie_same_site: "strict".to_string(),
        };
        adjust(&mut config);

        let state = AppState::new(&config).expect("initialize AppState");

        let session_layer =
            session::create_session_layer(tower_sessions::cookie::SameSite::Strict);

        // Build the REAL router with all server routes (must match main.rs)
        let router = Router::new()
            .merge(routes::upload::router())
            .merge(routes::browse::router())
            .merge(routes::health::router())
            .layer(session_layer)
            .with_state(state);

        Self {
            router,
            config,
            upload_dir,
        }
    }

    /// Root of the temporary upload tree.
    pub fn upload_path(&self) -> &Path {
        self.upload_dir.path()
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("send request")
    }
}

/// Build a multipart/form-data body with a single `upload` field.
pub fn multipart_upload_body(boundary: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"upload\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

/// Encode a small valid PNG for upload fixtures.
pub fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([120, 40, 200]));

    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode png fixture");

    buf.into_inner()
}
