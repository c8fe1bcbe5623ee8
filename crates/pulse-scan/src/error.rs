//! Error types for pulse-scan

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The root exists but cannot be listed. Fatal to that root only.
    #[error("Cannot read root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid risk pattern {pattern:?}: {source}")]
    InvalidRiskPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
