//! Shared test utilities for the status-pulse workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not each
//! hand-build source trees and status documents. It is a dev-dependency only
//! and never published.
//!
//! # Modules
//!
//! - [`tree`]: source tree fixtures with known file and line counts
//! - [`workspace`]: [`TestWorkspace`] with a status document and named roots

pub mod tree;
pub mod workspace;

pub use tree::{lines, write_file};
pub use workspace::TestWorkspace;
