//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Status pulse - keep generated regions of a status page in sync
#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (TOML, JSON or YAML); defaults to ./pulse.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Status document to update
    #[arg(long, global = true, value_name = "PATH")]
    pub document: Option<PathBuf>,

    /// Source root to scan, as NAME=PATH or PATH (repeatable)
    #[arg(long = "root", global = true, value_name = "NAME=PATH")]
    pub roots: Vec<String>,

    /// The command to run (defaults to `sync`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Scan, render and synchronize the status document
    ///
    /// Examples:
    ///   pulse sync                       # Full cycle with ./pulse.toml
    ///   pulse sync --dry-run             # Show what would change
    ///   pulse --root core=src sync --fix # Also clean whitespace in src/
    Sync(SyncArgs),

    /// Scan the configured roots and print metrics
    Scan {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Report the state of every region without writing
    ///
    /// Exits with status 1 when any region has unmatched markers.
    Check {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show configuration sources and whether roots, paths and the
    /// generator are usable
    Health {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Write a starter pulse.toml in the current directory
    Init {
        /// Overwrite an existing pulse.toml
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncArgs {
    /// Preview changes without writing the document or run log
    #[arg(long)]
    pub dry_run: bool,

    /// Output as JSON for CI/CD integration
    #[arg(long)]
    pub json: bool,

    /// Skip the reflection generator and use the fallback text
    #[arg(long)]
    pub no_generate: bool,

    /// Rewrite source files with tabs or trailing whitespace
    #[arg(long)]
    pub fix: bool,
}
