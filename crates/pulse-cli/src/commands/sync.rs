//! The sync command: one full scan, render and write cycle.

use chrono::Utc;
use colored::Colorize;
use serde_json::json;

use pulse_core::{PulseConfig, ReflectionSource, RunOptions, RunReport, generator};

use crate::cli::SyncArgs;
use crate::error::Result;

/// Run the sync command
pub fn run_sync(config: &PulseConfig, args: &SyncArgs) -> Result<()> {
    let options = RunOptions {
        dry_run: args.dry_run,
        fix: args.fix,
        generate: !args.no_generate,
    };
    let generator = generator::from_config(&config.generator);
    let report = pulse_core::run(config, generator.as_ref(), Utc::now(), &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report, args.dry_run))?);
    } else {
        print_report(&report, args.dry_run);
    }
    Ok(())
}

fn report_json(report: &RunReport, dry_run: bool) -> serde_json::Value {
    let regions: Vec<_> = report
        .sync
        .regions
        .iter()
        .map(|r| {
            json!({
                "name": r.name,
                "state": r.state.to_string(),
                "changed": r.changed,
            })
        })
        .collect();
    let anomalies: Vec<String> = report.sync.anomalies.iter().map(|a| a.to_string()).collect();

    json!({
        "timestamp": report.timestamp,
        "document": report.document.display().to_string(),
        "dry_run": dry_run,
        "seeded": report.seeded,
        "changed": report.document_changed,
        "written": report.written,
        "run_log": report.run_log.as_ref().map(|p| p.display().to_string()),
        "reflection_source": match report.reflection_source {
            ReflectionSource::Generated => "generated",
            ReflectionSource::Fallback => "fallback",
        },
        "total_files": report.summary.total_files(),
        "total_lines": report.summary.total_lines(),
        "roots": report.summary,
        "top_risky": report.ranked,
        "hygiene": report.hygiene,
        "regions": regions,
        "anomalies": anomalies,
    })
}

fn print_report(report: &RunReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    println!(
        "{} {}Syncing {} at {}",
        "=>".blue().bold(),
        prefix,
        report.document.display().to_string().cyan(),
        report.timestamp
    );

    for root in report.summary.iter() {
        println!(
            "   {} {}: {} files, {} LOC",
            "-".dimmed(),
            root.name,
            root.metrics.file_count,
            root.metrics.total_lines
        );
    }
    println!(
        "   Total: {} files, {} LOC",
        report.summary.total_files(),
        report.summary.total_lines()
    );

    for region in &report.sync.regions {
        let marker = if region.changed {
            "~".yellow()
        } else {
            "=".dimmed()
        };
        println!("   {} {} ({})", marker, region.name, region.state);
    }
    for anomaly in &report.sync.anomalies {
        println!("   {} {}", "!".red(), anomaly);
    }

    if report.reflection_source == ReflectionSource::Fallback {
        println!("   {} using fallback reflection", "note:".dimmed());
    }

    if dry_run {
        if report.document_changed {
            println!("{} Document would be updated.", "DRY-RUN".yellow().bold());
        } else {
            println!("{} Document is already up to date.", "DRY-RUN".yellow().bold());
        }
    } else if report.written {
        println!("{} Document updated.", "OK".green().bold());
    } else {
        println!("{} Document is already up to date.", "OK".green().bold());
    }
    if let Some(path) = &report.run_log {
        println!("   Run log: {}", path.display().to_string().dimmed());
    }
}
