//! Run configuration and its layered resolution
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged from these sources (later sources override earlier):
//!
//! 1. **Built-in defaults** - [`PulseConfig::default`]
//! 2. **User config** - `~/.config/status-pulse/config.toml`
//! 3. **Project config** - `--config <file>` or `./pulse.toml` (TOML, JSON or YAML)
//! 4. **Environment** - `PULSE_DOCUMENT`, `PULSE_LOG_DIR`, `PULSE_ROOTS_JSON`, `PULSE_GENERATOR_CMD`
//! 5. **Command line** - `--document`, `--root name=path`
//!
//! # Example
//!
//! ```no_run
//! use pulse_core::config::{ConfigResolver, Overrides};
//!
//! let config = ConfigResolver::new(std::env::current_dir()?)
//!     .resolve(&Overrides::default())?;
//! println!("Document: {}", config.document.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod resolver;
mod settings;

pub use resolver::{
    ConfigResolver, ENV_DOCUMENT, ENV_GENERATOR_CMD, ENV_LOG_DIR, ENV_ROOTS_JSON, Overrides,
};
pub use settings::{
    GeneratorConfig, PulseConfig, RegionToggles, RiskConfig, RootConfig, TimestampConfig,
};
