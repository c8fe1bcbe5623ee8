//! Status pulse CLI
//!
//! Scans source roots and keeps the generated regions of a Markdown status
//! document current.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands, SyncArgs};
use error::Result;
use pulse_core::{ConfigResolver, Overrides, PulseConfig, RootConfig};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cwd = std::env::current_dir()?;

    // These two never need a resolved configuration
    match &cli.command {
        Some(Commands::Init { force }) => return commands::run_init(&cwd, *force),
        Some(Commands::Completions { shell }) => {
            commands::run_completions(*shell);
            return Ok(());
        }
        _ => {}
    }

    let resolver = ConfigResolver::new(&cwd).with_config_file(cli.config.clone());
    let config = resolve_config(&cli, &resolver)?;
    match cli.command {
        None => commands::run_sync(&config, &SyncArgs::default()),
        Some(Commands::Sync(args)) => commands::run_sync(&config, &args),
        Some(Commands::Scan { json }) => commands::run_scan(&config, json),
        Some(Commands::Check { json }) => commands::run_check(&config, json),
        Some(Commands::Health { json }) => commands::run_health(&resolver, &config, json),
        Some(Commands::Init { .. }) | Some(Commands::Completions { .. }) => Ok(()),
    }
}

fn resolve_config(cli: &Cli, resolver: &ConfigResolver) -> Result<PulseConfig> {
    let overrides = Overrides {
        document: cli.document.clone(),
        roots: cli.roots.iter().map(|spec| RootConfig::parse(spec)).collect(),
    };
    let config = resolver.resolve(&overrides)?;
    tracing::debug!(
        "Resolved config: document={}, {} root(s)",
        config.document.display(),
        config.roots.len()
    );
    Ok(config)
}
