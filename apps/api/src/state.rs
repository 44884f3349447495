//! Shared application state.
//!
//! One state type handed to every handler via axum's `State` extractor.
//! Cloning is cheap - the database pool and the reqwest client are both
//! internally reference-counted.

use savora_db::Database;

use crate::upload::ImageStore;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database handle (pool + repositories).
    pub db: Database,

    /// Image-upload collaborator; `None` when no object store is configured,
    /// in which case image parts are rejected.
    pub images: Option<ImageStore>,

    /// Largest accepted image upload, in bytes.
    pub max_upload_bytes: usize,
}
