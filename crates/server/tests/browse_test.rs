#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for the image browse endpoint.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;

use common::TestApp;

fn seed(app: &TestApp, rel: &str) {
    let path = app.upload_path().join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"x").unwrap();
}

async fn get_browse(app: &TestApp) -> (StatusCode, String) {
    let response = app
        .request(
            Request::builder()
                .uri("/editor/browse")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn browse_lists_uploads_and_skips_thumbnails() {
    let app = TestApp::new();
    seed(&app, "2024/03/05/photo.jpg");
    seed(&app, "2024/03/05/photo_thumb.jpg");
    seed(&app, "2024/04/01/diagram.png");
    seed(&app, "2024/04/01/diagram_thumb.png");

    let (status, html) = get_browse(&app).await;

    assert_eq!(status, StatusCode::OK);

    // One listing entry per non-thumbnail file.
    assert_eq!(html.matches("<li class=\"image-list__item\">").count(), 2);

    // Each entry links the full image and shows its thumbnail.
    assert!(html.contains("href=\"/media/uploads/2024/03/05/photo.jpg\""));
    assert!(html.contains("src=\"/media/uploads/2024/03/05/photo_thumb.jpg\""));
    assert!(html.contains("href=\"/media/uploads/2024/04/01/diagram.png\""));
}

#[tokio::test]
async fn browse_renders_empty_listing() {
    let app = TestApp::new();

    let (status, html) = get_browse(&app).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No images uploaded yet."));
}

#[tokio::test]
async fn anonymous_browse_with_restriction_sees_whole_tree() {
    // Restriction scopes browsing per user; a request with no session user
    // is not confined to any subdirectory.
    let app = TestApp::with_config(|config| config.restrict_by_user = true);
    seed(&app, "alice/2024/01/01/mine.jpg");
    seed(&app, "bob/2024/01/01/theirs.jpg");

    let (status, html) = get_browse(&app).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches("<li class=\"image-list__item\">").count(), 2);
}
