//! Error types for pulse-core

use std::path::PathBuf;

/// Result type for pulse-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a run.
///
/// Per-file and per-root problems never surface here; they are logged and
/// folded into the scan summary instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An explicitly requested configuration file does not exist
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// The merged configuration does not describe a valid run
    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from pulse-fs (includes document write failures)
    #[error(transparent)]
    Fs(#[from] pulse_fs::Error),

    /// Payload or marker error from pulse-blocks
    #[error(transparent)]
    Blocks(#[from] pulse_blocks::Error),

    /// Scanner error from pulse-scan
    #[error(transparent)]
    Scan(#[from] pulse_scan::Error),
}
