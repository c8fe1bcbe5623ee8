//! Whitespace hygiene over scanned source files.
//!
//! Tabs become four spaces and trailing blanks are stripped from every line.
//! [`inspect`] only reports; [`apply`] rewrites dirty files atomically.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::Root;
use crate::scanner::{Candidate, ScanOptions, candidates};

static TRAILING_BLANKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+(\r?\n|$)").expect("Invalid trailing blank pattern"));

/// Normalized form of `text`, borrowed when already clean.
pub fn clean_text(text: &str) -> Cow<'_, str> {
    let stripped = TRAILING_BLANKS.replace_all(text, "$1");
    if stripped.contains('\t') {
        Cow::Owned(stripped.replace('\t', "    "))
    } else {
        stripped
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HygieneFailure {
    pub path: String,
    pub reason: String,
}

/// Outcome of a hygiene pass. Paths are `root/relative`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HygieneReport {
    pub scanned: u64,
    /// Files that needed cleaning.
    pub dirty: Vec<String>,
    /// Files rewritten; empty unless the pass applied fixes.
    pub cleaned: Vec<String>,
    pub failed: Vec<HygieneFailure>,
    /// Files that could not be read as text.
    pub skipped: u64,
}

impl HygieneReport {
    pub fn is_clean(&self) -> bool {
        self.dirty.is_empty() && self.failed.is_empty()
    }
}

/// Report which files under `roots` would change.
pub fn inspect(roots: &[Root], options: &ScanOptions) -> HygieneReport {
    run(roots, options, false)
}

/// Rewrite every dirty file under `roots`.
pub fn apply(roots: &[Root], options: &ScanOptions) -> HygieneReport {
    run(roots, options, true)
}

fn run(roots: &[Root], options: &ScanOptions, fix: bool) -> HygieneReport {
    let mut report = HygieneReport::default();

    for root in roots.iter().filter(|r| r.exists) {
        let files = match candidates(&root.path, options) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!("Hygiene skipped root {}: {}", root.name, e);
                continue;
            }
        };
        for candidate in files {
            visit(root, &candidate, fix, &mut report);
        }
    }

    report
}

fn visit(root: &Root, candidate: &Candidate, fix: bool, report: &mut HygieneReport) {
    let label = format!("{}/{}", root.name, candidate.relative);
    let path = pulse_fs::NormalizedPath::new(&candidate.path);

    let text = match pulse_fs::io::read_text(&path) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("Hygiene skipped {}: {}", label, e);
            report.skipped += 1;
            return;
        }
    };
    report.scanned += 1;

    let Cow::Owned(cleaned) = clean_text(&text) else {
        return;
    };
    report.dirty.push(label.clone());

    if !fix {
        return;
    }
    match pulse_fs::io::write_text(&path, &cleaned) {
        Ok(()) => {
            tracing::info!("Cleaned {}", label);
            report.cleaned.push(label);
        }
        Err(e) => {
            tracing::warn!("Failed to clean {}: {}", label, e);
            report.failed.push(HygieneFailure {
                path: label,
                reason: e.to_string(),
            });
        }
    }
}
