//! Editor upload route handler.

use axum::Router;
use axum::extract::{Multipart, Query, State};
use axum::response::Html;
use axum::routing::post;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::media::{media_url, upload_destination};
use crate::session::current_user;
use crate::state::AppState;

/// Create the upload router.
pub fn router() -> Router<AppState> {
    Router::new().route("/editor/upload", post(upload))
}

/// Query parameters for the editor upload callback.
#[derive(Debug, Deserialize)]
pub struct UploadParams {
    /// Callback identifier the editor passes for its response handler.
    #[serde(rename = "CKEditorFuncNum")]
    pub func_num: u32,
}

/// Upload a file and send back its URL to the editor.
///
/// POST /editor/upload?CKEditorFuncNum={n}
/// Content-Type: multipart/form-data
///
/// Form fields:
/// - upload: The file to store
///
/// Stores the file under the date-based path, generates the sibling
/// thumbnail, and answers with a script fragment invoking the editor's
/// callback with the new file's URL. File type and size are not validated.
async fn upload(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    session: Session,
    mut multipart: Multipart,
) -> AppResult<Html<String>> {
    let user = current_user(&session).await;

    // Find the `upload` field; anything else in the form is ignored.
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("upload") {
            let filename = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| AppError::BadRequest("upload field has no filename".to_string()))?;

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;

            upload = Some((filename, data.to_vec()));
            break;
        }
    }

    let Some((filename, data)) = upload else {
        return Err(AppError::BadRequest("missing upload field".to_string()));
    };

    let dest = upload_destination(
        state.config(),
        user.as_ref(),
        &filename,
        chrono::Utc::now().date_naive(),
    );

    let stored = state.storage().save(&dest, &data).await?;

    state.thumbnails().create(&stored).await?;

    let url = media_url(state.config(), &stored)?;

    info!(path = %stored.display(), size = data.len(), "upload stored");

    Ok(Html(callback_response(params.func_num, &url)))
}

/// Script fragment the editor expects back from its upload iframe.
fn callback_response(func_num: u32, url: &str) -> String {
    format!(
        "<script type='text/javascript'>\n    \
         window.parent.CKEDITOR.tools.callFunction({func_num}, '{url}');\n\
         </script>"
    )
}
