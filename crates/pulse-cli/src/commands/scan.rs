//! The scan command: metrics only, nothing is written.

use colored::Colorize;
use serde_json::json;

use pulse_core::PulseConfig;
use pulse_scan::{RootStatus, scan_all};

use crate::error::Result;

/// Run the scan command
pub fn run_scan(config: &PulseConfig, json: bool) -> Result<()> {
    let options = config.scan_options()?;
    let summary = scan_all(&config.scan_roots(), &options);
    let ranked = options
        .risk
        .as_ref()
        .map(|risk| summary.top_risky(risk.top_n))
        .unwrap_or_default();

    if json {
        let output = json!({
            "roots": summary,
            "total_files": summary.total_files(),
            "total_lines": summary.total_lines(),
            "top_risky": ranked,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if summary.is_empty() {
        println!("{} No roots configured.", "=>".blue().bold());
        return Ok(());
    }

    println!("{:<24} {:>8} {:>10}", "Root".bold(), "Files".bold(), "LOC".bold());
    for root in summary.iter() {
        let label = match &root.status {
            RootStatus::Scanned => root.name.normal(),
            RootStatus::Missing => format!("{} (missing)", root.name).yellow(),
            RootStatus::Unreadable(_) => format!("{} (unreadable)", root.name).red(),
        };
        println!(
            "{:<24} {:>8} {:>10}",
            label, root.metrics.file_count, root.metrics.total_lines
        );
    }
    println!(
        "{:<24} {:>8} {:>10}",
        "Total".bold(),
        summary.total_files(),
        summary.total_lines()
    );

    if !ranked.is_empty() {
        println!();
        println!("{}", "Riskiest files:".bold());
        for (rank, file) in ranked.iter().enumerate() {
            println!("  {:>2}. {} ({})", rank + 1, file.display_path().cyan(), file.score);
        }
    }
    Ok(())
}
