//! The run configuration and its sections.
//!
//! Every field has a default so a partial file (or no file at all) still
//! produces a complete configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pulse_scan::{
    DEFAULT_RISK_PATTERNS, ExclusionSet, ExtensionFilter, RiskOptions, RiskPatterns, Root,
    ScanOptions,
};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::timestamp::Precision;

const DEFAULT_MISSION: &str =
    "Measure every repository on each run and keep this page in step with the code.";

/// A source root as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
    /// Display name; defaults to the last path component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: PathBuf,
}

impl RootConfig {
    pub fn new(name: Option<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name,
            path: path.into(),
        }
    }

    /// Parse `name=path` or a bare `path`.
    pub fn parse(spec: &str) -> Self {
        match spec.split_once('=') {
            Some((name, path)) if !name.is_empty() => Self::new(Some(name.to_string()), path),
            _ => Self::new(None, spec),
        }
    }

    /// Resolve into a scanner root, canonicalizing paths that exist.
    pub fn to_root(&self) -> Root {
        let path = dunce::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        match &self.name {
            Some(name) => Root::new(name.clone(), path),
            None => Root::from_path(path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub enabled: bool,
    pub top_n: usize,
    /// Regex to weight. A weight of zero disables a built-in pattern.
    pub patterns: BTreeMap<String, u64>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            top_n: 10,
            patterns: DEFAULT_RISK_PATTERNS
                .iter()
                .map(|(pattern, weight)| (pattern.to_string(), *weight))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestampConfig {
    pub precision: Precision,
}

/// Which regions a run maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionToggles {
    pub badge: bool,
    pub mission: bool,
    pub diagnostics: bool,
    pub sanitize_log: bool,
    pub mutation_risk: bool,
}

impl Default for RegionToggles {
    fn default() -> Self {
        Self {
            badge: true,
            mission: true,
            diagnostics: true,
            sanitize_log: true,
            mutation_risk: true,
        }
    }
}

/// External command used to generate the reflection text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            timeout_secs: 30,
        }
    }
}

/// Everything one run needs. Resolved once and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// The status document to keep in sync.
    pub document: PathBuf,
    /// Directory receiving one plain-text log per run.
    pub log_dir: PathBuf,
    /// Text shown in the mission region.
    pub mission: String,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub roots: Vec<RootConfig>,
    pub risk: RiskConfig,
    pub timestamp: TimestampConfig,
    pub regions: RegionToggles,
    pub generator: GeneratorConfig,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            document: PathBuf::from("README.md"),
            log_dir: PathBuf::from("logs"),
            mission: DEFAULT_MISSION.to_string(),
            extensions: vec![".py".to_string()],
            exclude: [
                ".venv",
                "__pycache__",
                ".git",
                ".codex",
                "logs",
                "backups",
                "site-packages",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            roots: Vec::new(),
            risk: RiskConfig::default(),
            timestamp: TimestampConfig::default(),
            regions: RegionToggles::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl PulseConfig {
    /// Scanner roots in configuration order.
    pub fn scan_roots(&self) -> Vec<Root> {
        self.roots.iter().map(RootConfig::to_root).collect()
    }

    /// Scanner options, compiling the risk table when risk scoring is on.
    pub fn scan_options(&self) -> Result<ScanOptions> {
        let risk = if self.risk.enabled {
            let table = self
                .risk
                .patterns
                .iter()
                .filter(|(_, weight)| **weight > 0)
                .map(|(pattern, weight)| (pattern.as_str(), *weight));
            Some(RiskOptions {
                patterns: RiskPatterns::new(table)?,
                top_n: self.risk.top_n,
            })
        } else {
            None
        };

        Ok(ScanOptions {
            extensions: ExtensionFilter::new(&self.extensions),
            exclusions: ExclusionSet::new(&self.exclude),
            risk,
        })
    }

    /// Make relative document, log and root paths relative to `base`.
    pub fn anchor(&mut self, base: &Path) {
        let anchor = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        anchor(&mut self.document);
        anchor(&mut self.log_dir);
        for root in &mut self.roots {
            anchor(&mut root.path);
        }
    }
}
