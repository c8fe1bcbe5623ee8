//! Directory traversal and per-file counting.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use pulse_fs::NormalizedPath;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::model::{
    ExclusionSet, ExtensionFilter, FileMetric, RepoMetrics, Root, RootStatus, ScanSummary,
};
use crate::risk::RiskPatterns;

/// Risk scoring parameters.
#[derive(Debug, Clone)]
pub struct RiskOptions {
    pub patterns: RiskPatterns,
    /// Maximum number of files kept in [`RepoMetrics::top_risky`].
    pub top_n: usize,
}

impl Default for RiskOptions {
    fn default() -> Self {
        Self {
            patterns: RiskPatterns::defaults(),
            top_n: 10,
        }
    }
}

/// What to count and what to skip.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub extensions: ExtensionFilter,
    pub exclusions: ExclusionSet,
    /// `None` disables risk scoring entirely.
    pub risk: Option<RiskOptions>,
}

/// A file selected for counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub relative: NormalizedPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Content is not valid UTF-8.
    NotText,
    Unreadable(ErrorKind),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotText => write!(f, "not valid UTF-8"),
            SkipReason::Unreadable(kind) => write!(f, "unreadable ({kind})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Counted(FileMetric),
    Skipped {
        relative: NormalizedPath,
        reason: SkipReason,
    },
}

/// List the files under `root` that match the extension filter.
///
/// Excluded directories are pruned before descent, so nothing beneath them
/// is ever listed. Symlinks are not followed. Results are in file-name order
/// per directory.
pub fn candidates(root: &Path, options: &ScanOptions) -> Result<Vec<Candidate>> {
    fs::read_dir(root).map_err(|source| Error::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !options.exclusions.excludes(&relative_to(root, entry.path()))
        });

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(Error::RootUnreadable {
                    path: root.to_path_buf(),
                    source: e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("walk failed")),
                });
            }
            Err(e) => {
                tracing::debug!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !options.extensions.matches(&name) {
            continue;
        }

        found.push(Candidate {
            relative: relative_to(root, entry.path()),
            path: entry.into_path(),
        });
    }

    Ok(found)
}

/// Count one file, scoring it when `risk` is given.
pub fn scan_file(candidate: &Candidate, risk: Option<&RiskPatterns>) -> FileOutcome {
    let skipped = |reason| FileOutcome::Skipped {
        relative: candidate.relative.clone(),
        reason,
    };

    let bytes = match fs::read(&candidate.path) {
        Ok(bytes) => bytes,
        Err(e) => return skipped(SkipReason::Unreadable(e.kind())),
    };
    let Ok(text) = String::from_utf8(bytes) else {
        return skipped(SkipReason::NotText);
    };

    FileOutcome::Counted(FileMetric {
        relative_path: candidate.relative.as_str().to_string(),
        line_count: count_lines(&text),
        risk_score: risk.map(|patterns| patterns.score(&text)),
    })
}

/// Newline count, plus one when the text ends without a newline.
pub fn count_lines(text: &str) -> u64 {
    let newlines = text.bytes().filter(|b| *b == b'\n').count() as u64;
    if text.is_empty() || text.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Scan one root. A root recorded as missing yields zero metrics.
pub fn scan(root: &Root, options: &ScanOptions) -> Result<RepoMetrics> {
    if !root.exists {
        return Ok(RepoMetrics::default());
    }

    let risk = options.risk.as_ref();
    let mut metrics = RepoMetrics::default();
    let mut scored = Vec::new();

    for candidate in candidates(&root.path, options)? {
        match scan_file(&candidate, risk.map(|r| &r.patterns)) {
            FileOutcome::Counted(file) => {
                metrics.file_count += 1;
                metrics.total_lines += file.line_count;
                if file.risk_score.is_some_and(|score| score > 0) {
                    scored.push(file);
                }
            }
            FileOutcome::Skipped { relative, reason } => {
                tracing::debug!("Skipped {}/{}: {}", root.name, relative, reason);
                metrics.skipped += 1;
            }
        }
    }

    if let Some(risk) = risk {
        scored.sort_by(|a, b| {
            b.risk_score
                .cmp(&a.risk_score)
                .then_with(|| a.relative_path.cmp(&b.relative_path))
        });
        scored.truncate(risk.top_n);
        metrics.top_risky = scored;
    }

    tracing::debug!(
        "Scanned {}: {} files, {} lines",
        root.name,
        metrics.file_count,
        metrics.total_lines
    );
    Ok(metrics)
}

/// Scan every root. Per-root failures are logged and recorded as zero
/// metrics; they never abort the run.
pub fn scan_all(roots: &[Root], options: &ScanOptions) -> ScanSummary {
    let mut summary = ScanSummary::new();
    for root in roots {
        if !root.exists {
            tracing::warn!("Root {} not found at {}", root.name, root.path.display());
            summary.insert(&root.name, RootStatus::Missing, RepoMetrics::default());
            continue;
        }
        match scan(root, options) {
            Ok(metrics) => summary.insert(&root.name, RootStatus::Scanned, metrics),
            Err(e) => {
                tracing::warn!("Root {} skipped: {}", root.name, e);
                summary.insert(
                    &root.name,
                    RootStatus::Unreadable(e.to_string()),
                    RepoMetrics::default(),
                );
            }
        }
    }
    summary
}

fn relative_to(root: &Path, path: &Path) -> NormalizedPath {
    let relative = path.strip_prefix(root).unwrap_or(path);
    NormalizedPath::new(relative)
}
