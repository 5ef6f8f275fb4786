//! Editor media services: upload paths, storage, thumbnails, URLs, browsing.

pub mod browse;
pub mod storage;
pub mod thumbnail;
pub mod upload;
pub mod url;

pub use browse::{BrowseEntry, browse_entries, browse_root, image_files};
pub use storage::{FileStorage, LocalFileStorage};
pub use thumbnail::{THUMB_SUFFIX, THUMBNAIL_SIZE, ThumbnailService, is_thumbnail, thumb_filename};
pub use upload::{UploadUser, upload_destination};
pub use url::media_url;
