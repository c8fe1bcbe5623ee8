//! Error types for pulse-fs

use std::path::PathBuf;

/// Result type for pulse-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pulse-fs operations.
///
/// A failed document write surfaces as `Io` or `LockFailed`; in both cases
/// the destination still holds its previous content.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading, writing or renaming `path` failed
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file exists but does not deserialize
    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// `init` could not render the starter configuration
    #[error("Failed to serialize {format} config for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// Extension is not one of toml, json, yaml, yml
    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    /// The temporary file could not be locked before the rename
    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
