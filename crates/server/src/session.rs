//! Session layer and the user identity read from it.
//!
//! Authentication is the embedding application's concern: its auth layer
//! writes the `username` and `superuser` session keys and this service only
//! reads them. A request without those keys is anonymous.

use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::media::UploadUser;

/// Session key holding the authenticated username.
pub const SESSION_USERNAME: &str = "username";

/// Session key marking the user as a superuser.
pub const SESSION_SUPERUSER: &str = "superuser";

/// Default session expiry (24 hours).
pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;

/// Create the session layer backed by the in-process store.
pub fn create_session_layer(same_site: SameSite) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_secure(true) // Cookie only sent over HTTPS
        .with_http_only(true) // Cookie not accessible via JavaScript
        .with_same_site(same_site)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            DEFAULT_SESSION_EXPIRY_HOURS,
        )))
}

/// Read the current user from the session, if any.
pub async fn current_user(session: &Session) -> Option<UploadUser> {
    let username: String = session.get(SESSION_USERNAME).await.ok().flatten()?;

    let superuser: bool = session
        .get(SESSION_SUPERUSER)
        .await
        .ok()
        .flatten()
        .unwrap_or(false);

    Some(UploadUser {
        username,
        superuser,
    })
}
