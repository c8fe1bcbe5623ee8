//! The health command: where configuration came from and whether the
//! environment can support a sync. Nothing is written.

use std::path::{Path, PathBuf};

use colored::Colorize;
use serde_json::json;

use pulse_core::{CommandGenerator, ConfigResolver, PulseConfig};

use crate::error::Result;

/// Generator state as a sync would find it.
enum GeneratorHealth {
    NotConfigured,
    Found { program: String, path: PathBuf },
    NotFound { program: String },
}

impl GeneratorHealth {
    fn of(config: &PulseConfig) -> Self {
        match CommandGenerator::from_config(&config.generator) {
            None => Self::NotConfigured,
            Some(generator) => match generator.locate() {
                Some(path) => Self::Found {
                    program: generator.program().to_string(),
                    path,
                },
                None => Self::NotFound {
                    program: generator.program().to_string(),
                },
            },
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Self::NotConfigured => json!({ "configured": false }),
            Self::Found { program, path } => json!({
                "configured": true,
                "command": program,
                "resolved": path.display().to_string(),
            }),
            Self::NotFound { program } => json!({
                "configured": true,
                "command": program,
                "resolved": null,
            }),
        }
    }
}

/// Run the health command
pub fn run_health(resolver: &ConfigResolver, config: &PulseConfig, json: bool) -> Result<()> {
    let sources = resolver.sources()?;
    let env = resolver.env_overrides();
    let generator = GeneratorHealth::of(config);

    if json {
        let roots: Vec<_> = config
            .scan_roots()
            .iter()
            .map(|root| {
                json!({
                    "name": root.name,
                    "path": root.path.display().to_string(),
                    "exists": root.exists,
                })
            })
            .collect();
        let output = json!({
            "config_sources": sources.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
            "env_overrides": env,
            "document": path_json(&config.document),
            "log_dir": path_json(&config.log_dir),
            "roots": roots,
            "generator": generator.to_json(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} Configuration", "=>".blue().bold());
    if sources.is_empty() {
        println!("   {} built-in defaults only", "-".dimmed());
    }
    for source in &sources {
        println!("   {} {}", "file".dimmed(), source.display());
    }
    for var in &env {
        println!("   {} {}", "env".dimmed(), var);
    }

    println!("{} Paths", "=>".blue().bold());
    print_path("document", &config.document, "will be seeded");
    print_path("log dir", &config.log_dir, "will be created");

    println!("{} Roots", "=>".blue().bold());
    let roots = config.scan_roots();
    if roots.is_empty() {
        println!("   {} none configured", "-".dimmed());
    }
    for root in &roots {
        let label = if root.exists {
            "OK".green().bold()
        } else {
            "MISSING".yellow().bold()
        };
        println!("   {:<10} {} ({})", label, root.name, root.path.display());
    }

    println!("{} Generator", "=>".blue().bold());
    match &generator {
        GeneratorHealth::NotConfigured => {
            println!("   {:<10} fallback text only", "-".dimmed());
        }
        GeneratorHealth::Found { program, path } => {
            println!("   {:<10} {} ({})", "OK".green().bold(), program, path.display());
        }
        GeneratorHealth::NotFound { program } => {
            println!(
                "   {:<10} {} not found; sync will use the fallback text",
                "MISSING".yellow().bold(),
                program
            );
        }
    }
    Ok(())
}

fn path_json(path: &Path) -> serde_json::Value {
    json!({ "path": path.display().to_string(), "exists": path.exists() })
}

fn print_path(label: &str, path: &Path, when_absent: &str) {
    let state = if path.exists() {
        "OK".green().bold()
    } else {
        "ABSENT".yellow().bold()
    };
    let note = if path.exists() {
        String::new()
    } else {
        format!(" {}", when_absent)
    };
    println!("   {:<10} {}: {}{}", state, label, path.display(), note);
}
