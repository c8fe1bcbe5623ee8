//! The one-shot scan, render, synchronize and write cycle.
//!
//! Ordering is strict: the scan completes before rendering, rendering before
//! synchronization, and synchronization before the single document write.
//! Any error returned from [`run`] leaves the document as it was.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use pulse_blocks::{RegionState, SyncReport, synchronize};
use pulse_fs::NormalizedPath;
use pulse_scan::{HygieneReport, RankedFile, ScanSummary, hygiene, scan_all};

use crate::Result;
use crate::config::PulseConfig;
use crate::generator::{ReflectionGenerator, ReflectionRequest};
use crate::regions::{self, RenderInputs};
use crate::runlog::write_run_log;
use crate::timestamp::format_timestamp;

/// Document a run starts from when the destination does not exist yet.
pub const SEED_DOCUMENT: &str = "# Status\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Compute everything, write nothing.
    pub dry_run: bool,
    /// Rewrite files that fail the whitespace hygiene check.
    pub fix: bool,
    /// Ask the generator for a reflection; otherwise use the fallback.
    pub generate: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            fix: false,
            generate: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectionSource {
    Generated,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub timestamp: String,
    pub document: PathBuf,
    pub summary: ScanSummary,
    pub ranked: Vec<RankedFile>,
    pub hygiene: Option<HygieneReport>,
    pub reflection: String,
    pub reflection_source: ReflectionSource,
    pub sync: SyncReport,
    /// The document did not exist and was started from [`SEED_DOCUMENT`].
    pub seeded: bool,
    /// Whether the document was (or, on a dry run, would be) written.
    pub document_changed: bool,
    pub written: bool,
    pub run_log: Option<PathBuf>,
}

/// Run one full cycle against `config`.
///
/// `now` is the only clock reading; every timestamp in the run derives from
/// it.
pub fn run(
    config: &PulseConfig,
    generator: &dyn ReflectionGenerator,
    now: DateTime<Utc>,
    options: &RunOptions,
) -> Result<RunReport> {
    let timestamp = format_timestamp(now, config.timestamp.precision);
    tracing::info!("Starting sync at {}", timestamp);

    // Scan
    let roots = config.scan_roots();
    let scan_options = config.scan_options()?;
    let summary = scan_all(&roots, &scan_options);
    let ranked = scan_options
        .risk
        .as_ref()
        .map(|risk| summary.top_risky(risk.top_n));

    let hygiene_applied = options.fix && !options.dry_run;
    let hygiene = (config.regions.sanitize_log || options.fix).then(|| {
        if hygiene_applied {
            hygiene::apply(&roots, &scan_options)
        } else {
            hygiene::inspect(&roots, &scan_options)
        }
    });

    // Render
    let (reflection, reflection_source) = if config.regions.diagnostics {
        reflect(generator, &timestamp, &summary, options.generate)
    } else {
        (String::new(), ReflectionSource::Fallback)
    };
    let updates = regions::build_updates(
        &config.regions,
        &RenderInputs {
            timestamp: &timestamp,
            mission: &config.mission,
            summary: &summary,
            reflection: &reflection,
            hygiene: hygiene.as_ref(),
            hygiene_applied,
            ranked: ranked.as_deref(),
        },
    );

    // Synchronize
    let document_path = NormalizedPath::new(&config.document);
    let (current, seeded) = match pulse_fs::io::read_text_if_exists(&document_path)? {
        Some(text) => (text, false),
        None => {
            tracing::info!("{} not found, starting from seed", config.document.display());
            (SEED_DOCUMENT.to_string(), true)
        }
    };
    let outcome = synchronize(&current, &updates)?;
    for anomaly in &outcome.report.anomalies {
        tracing::warn!("Unmatched marker left in place: {}", anomaly);
    }
    for region in &outcome.report.regions {
        if let RegionState::Duplicated { count } = region.state {
            tracing::info!("Collapsed {} copies of {}", count, region.name);
        }
    }

    // Write
    let document_changed = seeded || outcome.report.changed();
    let mut written = false;
    let mut run_log = None;
    if !options.dry_run {
        if document_changed {
            pulse_fs::io::write_atomic(&document_path, outcome.document.as_bytes())?;
            written = true;
            tracing::info!("Updated {}", config.document.display());
        } else {
            tracing::info!("{} already up to date", config.document.display());
        }

        match write_run_log(&config.log_dir, &timestamp, &summary, &reflection) {
            Ok(path) => run_log = Some(path),
            Err(e) => tracing::warn!("Failed to write run log: {}", e),
        }
    }

    Ok(RunReport {
        timestamp,
        document: config.document.clone(),
        summary,
        ranked: ranked.unwrap_or_default(),
        hygiene,
        reflection,
        reflection_source,
        sync: outcome.report,
        seeded,
        document_changed,
        written,
        run_log,
    })
}

/// Current state of every enabled region. Never writes; a missing document
/// reports every region as missing.
pub fn check(config: &PulseConfig) -> Result<Vec<(String, RegionState)>> {
    let document = pulse_fs::io::read_text_if_exists(&NormalizedPath::new(&config.document))?
        .unwrap_or_default();
    Ok(pulse_blocks::inspect(
        &document,
        &regions::enabled_targets(&config.regions),
    ))
}

fn reflect(
    generator: &dyn ReflectionGenerator,
    timestamp: &str,
    summary: &ScanSummary,
    generate: bool,
) -> (String, ReflectionSource) {
    if generate {
        match generator.generate(&ReflectionRequest::new(timestamp, summary)) {
            Ok(text) => {
                return (
                    pulse_render::ensure_closing_line(&text, timestamp),
                    ReflectionSource::Generated,
                );
            }
            Err(e) => tracing::warn!("Reflection unavailable, using fallback: {}", e),
        }
    }
    (
        pulse_render::fallback_reflection(timestamp, summary),
        ReflectionSource::Fallback,
    )
}
