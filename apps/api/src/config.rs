//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `cargo run` works against a local database file.

use std::env;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Connection pool upper bound
    pub db_max_connections: u32,

    /// Object-store endpoint uploads are PUT against.
    /// Image upload is disabled when unset.
    pub media_base_url: Option<String>,

    /// Public URL prefix for stored images (defaults to the base URL)
    pub media_public_url: Option<String>,

    /// Bearer token for the object store, if it wants one
    pub media_api_key: Option<String>,

    /// Largest accepted image upload, in bytes
    pub max_upload_bytes: usize,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "./savora.db".to_string()),

            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            media_base_url: env::var("MEDIA_BASE_URL").ok(),

            media_public_url: env::var("MEDIA_PUBLIC_URL").ok(),

            media_api_key: env::var("MEDIA_API_KEY").ok(),

            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| "5242880".to_string()) // 5MB
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MAX_UPLOAD_BYTES".to_string()))?,
        };

        // A public prefix without an endpoint to upload to is a config mistake
        if config.media_base_url.is_none() && config.media_public_url.is_some() {
            return Err(ConfigError::MissingMediaEndpoint);
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("MEDIA_PUBLIC_URL set but MEDIA_BASE_URL missing")]
    MissingMediaEndpoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var driven loading is covered by deployment; these pin the
    // defaults so a bare start keeps working.
    #[test]
    fn test_defaults() {
        // Only meaningful when the variables are unset in the test env
        if env::var("PORT").is_err() {
            let config = ApiConfig::load().unwrap();
            assert_eq!(config.port, 5000);
            assert_eq!(config.db_max_connections, 10);
            assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        }
    }
}
