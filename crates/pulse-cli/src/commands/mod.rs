//! Command implementations for pulse-cli

pub mod check;
pub mod completions;
pub mod health;
pub mod init;
pub mod scan;
pub mod sync;

pub use check::run_check;
pub use completions::run_completions;
pub use health::run_health;
pub use init::run_init;
pub use scan::run_scan;
pub use sync::run_sync;
