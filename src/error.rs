//! Error types for the album-backup application.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // API errors
    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("No albums found on page {page} ({per_page} per page)")]
    NoAlbums { page: u32, per_page: u32 },

    #[error("Failed to list items of album {album_id}: {message}")]
    Enumeration { album_id: String, message: String },

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    #[error("Item {item_id} has no Original variant")]
    NoOriginalVariant { item_id: String },

    #[error("after {attempts} attempts, last error: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    // File system errors
    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an IO error with the path it happened at.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Whether this error (or the last error it wraps) came from the local filesystem.
    pub fn is_filesystem(&self) -> bool {
        match self {
            Error::Filesystem { .. } | Error::Io(_) | Error::InvalidFilename(_) => true,
            Error::RetriesExhausted { source, .. } => source.is_filesystem(),
            _ => false,
        }
    }

    /// Exit code of a run that ended with this error.
    ///
    /// Without `strict` every error exits with [`exit_codes::SUCCESS`] after
    /// being reported; `strict` maps config and API failures to their own codes.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if !strict {
            return exit_codes::SUCCESS;
        }
        match self {
            Error::NoAlbums { .. } => exit_codes::SUCCESS,
            Error::Config(_)
            | Error::ConfigValidation { .. }
            | Error::MissingConfig(_)
            | Error::TomlParse(_) => exit_codes::CONFIG_ERROR,
            Error::Authentication(_) | Error::Api(_) | Error::Http(_) => exit_codes::API_ERROR,
            _ => exit_codes::UNEXPECTED_ERROR,
        }
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const UNEXPECTED_ERROR: i32 = 5;
    pub const INTERRUPTED: i32 = 130;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retries_exhausted_message_names_attempts_and_last_error() {
        let err = Error::RetriesExhausted {
            attempts: 5,
            source: Box::new(Error::Download("HTTP 503".into())),
        };
        let msg = err.to_string();
        assert!(msg.contains("after 5 attempts"));
        assert!(msg.contains("HTTP 503"));
    }

    #[test]
    fn test_is_filesystem_looks_through_retries() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::RetriesExhausted {
            attempts: 2,
            source: Box::new(Error::filesystem("/tmp/x.jpg", io)),
        };
        assert!(err.is_filesystem());
        assert!(!Error::Download("boom".into()).is_filesystem());
    }

    #[test]
    fn test_pre_pipeline_failures_exit_zero_by_default() {
        let errors = [
            Error::Authentication("Invalid auth token".into()),
            Error::Api("flickr.photosets.getList: HTTP 500".into()),
            Error::MissingConfig("api_key".into()),
            Error::NoAlbums { page: 4, per_page: 10 },
        ];
        for err in &errors {
            assert_eq!(err.exit_code(false), exit_codes::SUCCESS, "{err}");
        }
    }

    #[test]
    fn test_strict_exit_codes() {
        assert_eq!(
            Error::Authentication("bad token".into()).exit_code(true),
            exit_codes::API_ERROR
        );
        assert_eq!(
            Error::MissingConfig("token".into()).exit_code(true),
            exit_codes::CONFIG_ERROR
        );
        assert_eq!(
            Error::NoAlbums { page: 2, per_page: 5 }.exit_code(true),
            exit_codes::SUCCESS
        );
        assert_eq!(
            Error::Download("boom".into()).exit_code(true),
            exit_codes::UNEXPECTED_ERROR
        );
    }
}
