//! The check command: report region states without writing.

use colored::Colorize;
use serde_json::json;

use pulse_blocks::RegionState;
use pulse_core::PulseConfig;

use crate::error::{CliError, Result};

/// Run the check command
///
/// Fails when any region has unmatched markers, since the next sync would
/// leave them in place.
pub fn run_check(config: &PulseConfig, json: bool) -> Result<()> {
    let states = pulse_core::check(config)?;

    if json {
        let regions: Vec<_> = states
            .iter()
            .map(|(name, state)| json!({ "name": name, "state": state.to_string() }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "document": config.document.display().to_string(),
                "regions": regions,
            }))?
        );
    } else {
        println!(
            "{} Checking {}",
            "=>".blue().bold(),
            config.document.display().to_string().cyan()
        );
        for (name, state) in &states {
            let label = match state {
                RegionState::Present => "OK".green().bold(),
                RegionState::Missing => "MISSING".yellow().bold(),
                RegionState::Duplicated { .. } => "DUPLICATED".yellow().bold(),
                RegionState::Malformed { .. } => "MALFORMED".red().bold(),
            };
            println!("   {:<10} {} ({})", label, name, state);
        }
    }

    let malformed: Vec<&str> = states
        .iter()
        .filter(|(_, state)| state.is_malformed())
        .map(|(name, _)| name.as_str())
        .collect();
    if malformed.is_empty() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "Unmatched markers in region(s): {}",
            malformed.join(", ")
        )))
    }
}
