//! Core orchestration layer for status-pulse
//!
//! This crate ties the layer 0 crates into one run:
//!
//! - **Configuration resolution**: layered merge of defaults, user and project
//!   files, environment and command-line overrides
//! - **Reflection generation**: an external command behind [`ReflectionGenerator`],
//!   with a deterministic fallback
//! - **Region registry**: which regions a page carries and how each is rendered
//! - **Pipeline**: scan, render, synchronize, then one atomic write
//!
//! # Architecture
//!
//! ```text
//!                      pulse-cli
//!                          |
//!                     pulse-core
//!                          |
//!     +-----------+--------+-------+-------------+
//!     |           |                |             |
//! pulse-fs   pulse-blocks     pulse-scan    pulse-render
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod regions;
pub mod runlog;
pub mod timestamp;

pub use config::{ConfigResolver, Overrides, PulseConfig, RootConfig};
pub use error::{Error, Result};
pub use generator::{
    CommandGenerator, FallbackGenerator, GenerationError, ReflectionGenerator, ReflectionRequest,
};
pub use pipeline::{ReflectionSource, RunOptions, RunReport, SEED_DOCUMENT, check, run};
pub use regions::RegionKind;
pub use timestamp::{Precision, format_timestamp};
