//! # Image Upload Collaborator
//!
//! Pushes uploaded image bytes to the remote object store and hands back a
//! publicly resolvable URL. This is the only component that talks to the
//! blob store - the repository never does.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              POST /recipes (multipart with image part)                  │
//! │                                                                         │
//! │  image bytes ──► ImageStore::upload()                                  │
//! │                       │                                                 │
//! │                       │  PUT {base_url}/{uuid}.{ext}                   │
//! │                       ▼                                                 │
//! │                  Object store                                          │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │                  public URL ──► NewRecipe.image ──► repository         │
//! │                                                                         │
//! │  The upload happens BEFORE the repository call; a failed transfer      │
//! │  never leaves a half-written recipe behind.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use thiserror::Error;
use uuid::Uuid;

/// Errors from the image-upload collaborator.
///
/// Propagated unchanged to the handler layer; the repository never sees
/// these.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The transfer itself failed (connect, timeout, TLS).
    #[error("image transfer failed: {0}")]
    Transfer(String),

    /// The object store answered with a non-success status.
    #[error("object store rejected upload with status {status}")]
    Rejected { status: u16 },

    /// The upload exceeds the configured size cap.
    #[error("image exceeds the maximum of {max} bytes")]
    TooLarge { max: usize },

    /// The part is not an image.
    #[error("unsupported upload content type: {content_type}")]
    UnsupportedType { content_type: String },
}

/// Client for the remote image store.
#[derive(Debug, Clone)]
pub struct ImageStore {
    client: reqwest::Client,
    /// Endpoint uploads are PUT against.
    base_url: String,
    /// Prefix of the URLs handed back to clients.
    public_url: String,
    /// Bearer token, when the store wants one.
    api_key: Option<String>,
}

impl ImageStore {
    /// Creates an image store client.
    ///
    /// `public_url` falls back to `base_url` when the store serves objects
    /// from the same host it ingests on.
    pub fn new(base_url: String, public_url: Option<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let public_url = public_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| base_url.clone());

        ImageStore {
            client: reqwest::Client::new(),
            base_url,
            public_url,
            api_key,
        }
    }

    /// Uploads image bytes and returns the public URL.
    ///
    /// ## Arguments
    /// * `filename` - the client-side filename; only its extension is kept
    /// * `content_type` - must be an `image/*` type
    /// * `bytes` - the raw file content
    pub async fn upload(
        &self,
        filename: Option<&str>,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        if !content_type.starts_with("image/") {
            return Err(UploadError::UnsupportedType {
                content_type: content_type.to_string(),
            });
        }

        let key = object_key(filename, content_type);
        let url = format!("{}/{}", self.base_url, key);

        tracing::debug!(key = %key, size = bytes.len(), "Uploading image");

        let mut request = self
            .client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UploadError::Transfer(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UploadError::Rejected {
                status: response.status().as_u16(),
            });
        }

        Ok(format!("{}/{}", self.public_url, key))
    }
}

/// Builds a collision-free object key, keeping the original extension.
///
/// Falls back to the content-type subtype when the filename has none
/// ("image/png" → ".png").
fn object_key(filename: Option<&str>, content_type: &str) -> String {
    let ext = filename
        .and_then(|f| Path::new(f).extension())
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .or_else(|| {
            content_type
                .strip_prefix("image/")
                .map(|sub| sub.to_ascii_lowercase())
        });

    match ext {
        Some(ext) if !ext.is_empty() => format!("{}.{}", Uuid::new_v4(), ext),
        _ => Uuid::new_v4().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_keeps_extension() {
        let key = object_key(Some("Pho Photo.JPG"), "image/jpeg");
        assert!(key.ends_with(".jpg"), "got {key}");
    }

    #[test]
    fn test_object_key_falls_back_to_content_type() {
        let key = object_key(Some("upload"), "image/png");
        assert!(key.ends_with(".png"), "got {key}");

        let key = object_key(None, "image/webp");
        assert!(key.ends_with(".webp"), "got {key}");
    }

    #[test]
    fn test_object_keys_are_unique() {
        let a = object_key(Some("a.png"), "image/png");
        let b = object_key(Some("a.png"), "image/png");
        assert_ne!(a, b);
    }

    #[test]
    fn test_public_url_defaults_to_base() {
        let store = ImageStore::new("https://media.example/in/".to_string(), None, None);
        assert_eq!(store.base_url, "https://media.example/in");
        assert_eq!(store.public_url, "https://media.example/in");

        let store = ImageStore::new(
            "https://ingest.example".to_string(),
            Some("https://cdn.example/".to_string()),
            None,
        );
        assert_eq!(store.public_url, "https://cdn.example");
    }
}
