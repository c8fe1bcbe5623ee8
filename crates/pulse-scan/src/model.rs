//! Scan inputs and aggregated results.

use std::collections::BTreeSet;
use std::path::PathBuf;

use pulse_fs::NormalizedPath;
use serde::Serialize;

/// A directory tree to scan, with the name it is reported under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Root {
    pub name: String,
    pub path: PathBuf,
    /// Whether the path existed when the root was constructed.
    pub exists: bool,
}

impl Root {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let exists = path.exists();
        Self {
            name: name.into(),
            path,
            exists,
        }
    }

    /// A root named after the last component of its path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name, path)
    }
}

/// Path components that exclude an entry from scanning.
///
/// Plain entries (`.venv`) match any single component. Entries containing a
/// slash (`.github/backups`) match that run of consecutive components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
    sequences: Vec<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for entry in entries {
            let normalized = NormalizedPath::new(entry.as_ref().trim_matches('/'));
            let entry = normalized.as_str();
            if entry.is_empty() {
                continue;
            }
            if entry.contains('/') {
                set.sequences.push(entry.to_string());
            } else {
                set.names.insert(entry.to_string());
            }
        }
        set
    }

    /// Whether any component (or component run) of `relative` is excluded.
    pub fn excludes(&self, relative: &NormalizedPath) -> bool {
        let path = relative.as_str();
        if path.split('/').any(|component| self.names.contains(component)) {
            return true;
        }
        self.sequences.iter().any(|seq| {
            path == seq
                || path.starts_with(&format!("{seq}/"))
                || path.ends_with(&format!("/{seq}"))
                || path.contains(&format!("/{seq}/"))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.sequences.is_empty()
    }
}

/// File-name suffixes that select files for counting.
///
/// An empty filter selects every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    /// Build a filter; `py` and `.py` are equivalent.
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = suffixes
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .map(|s| if s.starts_with('.') { s } else { format!(".{s}") })
            .collect();
        Self { suffixes }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.suffixes.is_empty() || self.suffixes.iter().any(|s| file_name.ends_with(s.as_str()))
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

/// One counted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetric {
    /// Forward-slash path relative to its root.
    pub relative_path: String,
    pub line_count: u64,
    /// Present only when risk scoring was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u64>,
}

/// Aggregate over one root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoMetrics {
    pub file_count: u64,
    pub total_lines: u64,
    /// Matching files that could not be read or decoded.
    pub skipped: u64,
    /// Highest-scoring files, score descending then path ascending.
    pub top_risky: Vec<FileMetric>,
}

/// Why a root contributed zero metrics, if it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "status", content = "reason")]
pub enum RootStatus {
    Scanned,
    Missing,
    Unreadable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootMetrics {
    pub name: String,
    pub status: RootStatus,
    #[serde(flatten)]
    pub metrics: RepoMetrics,
}

/// A risky file together with the root it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedFile {
    pub root: String,
    pub relative_path: String,
    pub score: u64,
}

impl RankedFile {
    /// `root/relative_path`, the form shown in the risk table.
    pub fn display_path(&self) -> String {
        format!("{}/{}", self.root, self.relative_path)
    }
}

/// Per-root metrics in insertion order, keyed by root name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScanSummary {
    roots: Vec<RootMetrics>,
}

impl ScanSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the metrics for `name`, keeping its first position.
    pub fn insert(&mut self, name: impl Into<String>, status: RootStatus, metrics: RepoMetrics) {
        let name = name.into();
        match self.roots.iter_mut().find(|r| r.name == name) {
            Some(existing) => {
                existing.status = status;
                existing.metrics = metrics;
            }
            None => self.roots.push(RootMetrics {
                name,
                status,
                metrics,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RootMetrics> {
        self.roots.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RootMetrics> {
        self.roots.iter()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn total_files(&self) -> u64 {
        self.roots.iter().map(|r| r.metrics.file_count).sum()
    }

    pub fn total_lines(&self) -> u64 {
        self.roots.iter().map(|r| r.metrics.total_lines).sum()
    }

    /// Merge every root's ranking into one, score descending, then root
    /// and path ascending, truncated to `n`.
    pub fn top_risky(&self, n: usize) -> Vec<RankedFile> {
        let mut ranked: Vec<RankedFile> = self
            .roots
            .iter()
            .flat_map(|root| {
                root.metrics.top_risky.iter().filter_map(|file| {
                    file.risk_score.filter(|score| *score > 0).map(|score| RankedFile {
                        root: root.name.clone(),
                        relative_path: file.relative_path.clone(),
                        score,
                    })
                })
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.root.cmp(&b.root))
                .then_with(|| a.relative_path.cmp(&b.relative_path))
        });
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusion_matches_any_component() {
        let set = ExclusionSet::new([".venv", "__pycache__"]);
        assert!(set.excludes(&NormalizedPath::new("pkg/.venv/lib/x.py")));
        assert!(set.excludes(&NormalizedPath::new("__pycache__")));
        assert!(!set.excludes(&NormalizedPath::new("pkg/venv/x.py")));
    }

    #[test]
    fn exclusion_matches_component_runs() {
        let set = ExclusionSet::new([".github/backups"]);
        assert!(set.excludes(&NormalizedPath::new(".github/backups")));
        assert!(set.excludes(&NormalizedPath::new(".github/backups/old.py")));
        assert!(set.excludes(&NormalizedPath::new("sub/.github/backups")));
        assert!(!set.excludes(&NormalizedPath::new(".github/scripts/run.py")));
        assert!(!set.excludes(&NormalizedPath::new("x.github/backups")));
    }

    #[test]
    fn extension_filter_accepts_both_spellings() {
        let filter = ExtensionFilter::new(["py", ".rs"]);
        assert!(filter.matches("main.py"));
        assert!(filter.matches("lib.rs"));
        assert!(!filter.matches("notes.md"));
        assert!(ExtensionFilter::default().matches("anything"));
    }

    #[test]
    fn summary_insert_replaces_by_name() {
        let mut summary = ScanSummary::new();
        summary.insert("a", RootStatus::Missing, RepoMetrics::default());
        summary.insert(
            "a",
            RootStatus::Scanned,
            RepoMetrics {
                file_count: 2,
                total_lines: 10,
                ..Default::default()
            },
        );
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.total_files(), 2);
        assert_eq!(summary.get("a").unwrap().status, RootStatus::Scanned);
    }

    #[test]
    fn top_risky_merges_roots() {
        let metric = |path: &str, score| FileMetric {
            relative_path: path.into(),
            line_count: 1,
            risk_score: Some(score),
        };
        let mut summary = ScanSummary::new();
        summary.insert(
            "b",
            RootStatus::Scanned,
            RepoMetrics {
                top_risky: vec![metric("x.py", 10)],
                ..Default::default()
            },
        );
        summary.insert(
            "a",
            RootStatus::Scanned,
            RepoMetrics {
                top_risky: vec![metric("y.py", 20), metric("z.py", 10)],
                ..Default::default()
            },
        );

        let ranked: Vec<String> = summary
            .top_risky(3)
            .iter()
            .map(RankedFile::display_path)
            .collect();
        assert_eq!(ranked, vec!["a/y.py", "a/z.py", "b/x.py"]);
    }
}
