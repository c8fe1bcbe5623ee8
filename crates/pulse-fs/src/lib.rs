//! Filesystem layer for status-pulse
//!
//! Provides forward-slash normalized paths, crash-safe document writes and
//! format-detecting configuration file loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
