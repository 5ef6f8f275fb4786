//! Image browse route handler.

use anyhow::Context;
use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use tower_sessions::Session;

use crate::error::AppResult;
use crate::media::browse_entries;
use crate::session::current_user;
use crate::state::AppState;

/// Create the browse router.
pub fn router() -> Router<AppState> {
    Router::new().route("/editor/browse", get(browse))
}

/// GET /editor/browse — render the image listing.
async fn browse(State(state): State<AppState>, session: Session) -> AppResult<Html<String>> {
    let user = current_user(&session).await;

    // The walk hits the filesystem; keep it off the async workers.
    let config = state.config().clone();
    let entries = tokio::task::spawn_blocking(move || browse_entries(&config, user.as_ref()))
        .await
        .context("browse walk panicked")??;

    let mut context = tera::Context::new();
    context.insert("images", &entries);

    let html = state.theme().render("browse.html", &context)?;

    Ok(Html(html))
}
