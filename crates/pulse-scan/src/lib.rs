//! Repository metrics scanner for status-pulse
//!
//! Walks source roots, prunes excluded directories before descending, and
//! aggregates file and line counts plus an optional per-file risk score.
//! Traversal is read-only; the one writer is [`hygiene::apply`].

pub mod error;
pub mod hygiene;
pub mod model;
pub mod risk;
pub mod scanner;

pub use error::{Error, Result};
pub use hygiene::{HygieneFailure, HygieneReport, clean_text};
pub use model::{
    ExclusionSet, ExtensionFilter, FileMetric, RankedFile, RepoMetrics, Root, RootMetrics,
    RootStatus, ScanSummary,
};
pub use risk::{DEFAULT_RISK_PATTERNS, RiskPatterns};
pub use scanner::{
    Candidate, FileOutcome, RiskOptions, ScanOptions, SkipReason, candidates, count_lines, scan,
    scan_all, scan_file,
};
