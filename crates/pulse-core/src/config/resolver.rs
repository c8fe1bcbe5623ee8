//! Layered configuration resolution
//!
//! The `ConfigResolver` merges configuration from several sources, later
//! sources overriding earlier ones:
//! 1. Built-in defaults
//! 2. User config (`<config_dir>/status-pulse/config.toml`)
//! 3. Project config (`--config <file>`, else `./pulse.toml`)
//! 4. Environment (`PULSE_DOCUMENT`, `PULSE_LOG_DIR`, `PULSE_ROOTS_JSON`,
//!    `PULSE_GENERATOR_CMD`)
//! 5. Command-line overrides
//!
//! Tables merge key by key; arrays and scalars are replaced wholesale.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pulse_fs::{ConfigStore, NormalizedPath};
use serde::Deserialize;
use serde_json::Value;

use super::settings::{PulseConfig, RootConfig};
use crate::{Error, Result};

/// Environment variables consulted by layer 4.
pub const ENV_DOCUMENT: &str = "PULSE_DOCUMENT";
pub const ENV_LOG_DIR: &str = "PULSE_LOG_DIR";
pub const ENV_ROOTS_JSON: &str = "PULSE_ROOTS_JSON";
pub const ENV_GENERATOR_CMD: &str = "PULSE_GENERATOR_CMD";

const PROJECT_CONFIG: &str = "pulse.toml";

/// Values supplied on the command line (layer 5).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub document: Option<PathBuf>,
    /// Replaces every configured root when non-empty.
    pub roots: Vec<RootConfig>,
}

/// Entry of `PULSE_ROOTS_JSON`: a bare path or a `{name, path}` object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RootEntry {
    Path(PathBuf),
    Full(RootConfig),
}

impl From<RootEntry> for RootConfig {
    fn from(entry: RootEntry) -> Self {
        match entry {
            RootEntry::Path(path) => RootConfig::new(None, path),
            RootEntry::Full(root) => root,
        }
    }
}

/// Resolves a [`PulseConfig`] from every configuration layer.
pub struct ConfigResolver {
    /// Directory relative paths are resolved against (normally the cwd).
    base_dir: PathBuf,

    /// `--config` path; must exist when given.
    explicit: Option<PathBuf>,

    /// Override for the user config directory (used for testing).
    /// When `None`, `dirs::config_dir()` is used.
    user_config_dir_override: Option<PathBuf>,

    /// `PULSE_*` variables, captured at construction.
    env: BTreeMap<String, String>,
}

impl ConfigResolver {
    /// Create a resolver rooted at `base_dir`, reading the process environment.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            explicit: None,
            user_config_dir_override: None,
            env: std::env::vars()
                .filter(|(key, _)| key.starts_with("PULSE_"))
                .collect(),
        }
    }

    /// Load this file instead of `./pulse.toml`.
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    /// Use a custom user config directory instead of the platform one.
    pub fn with_user_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_config_dir_override = Some(dir.into());
        self
    }

    /// Replace the captured environment.
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    fn user_config_path(&self) -> Option<PathBuf> {
        self.user_config_dir_override
            .clone()
            .or_else(|| dirs::config_dir().map(|d| d.join("status-pulse")))
            .map(|dir| dir.join("config.toml"))
    }

    fn project_config_path(&self) -> Result<Option<PathBuf>> {
        match &self.explicit {
            Some(path) => {
                let path = if path.is_relative() {
                    self.base_dir.join(path)
                } else {
                    path.clone()
                };
                if path.is_file() {
                    Ok(Some(path))
                } else {
                    Err(Error::ConfigNotFound { path })
                }
            }
            None => {
                let path = self.base_dir.join(PROJECT_CONFIG);
                Ok(path.is_file().then_some(path))
            }
        }
    }

    /// Configuration files that [`resolve`](Self::resolve) would load, in
    /// layer order.
    pub fn sources(&self) -> Result<Vec<PathBuf>> {
        let user = self.user_config_path().filter(|p| p.is_file());
        Ok(user.into_iter().chain(self.project_config_path()?).collect())
    }

    /// `PULSE_*` variables that feed layer 4.
    pub fn env_overrides(&self) -> Vec<&str> {
        [ENV_DOCUMENT, ENV_LOG_DIR, ENV_ROOTS_JSON, ENV_GENERATOR_CMD]
            .into_iter()
            .filter(|key| self.env.contains_key(*key))
            .collect()
    }

    /// Merge every layer and return the effective configuration, with
    /// relative paths anchored at the base directory.
    pub fn resolve(&self, overrides: &Overrides) -> Result<PulseConfig> {
        let store = ConfigStore::new();
        let mut merged = to_value(&PulseConfig::default())?;

        // Layer 2 - User config
        if let Some(path) = self.user_config_path().filter(|p| p.is_file()) {
            tracing::debug!(?path, "Loading user config (layer 2)");
            let layer: Value = store.load(&NormalizedPath::new(&path))?;
            deep_merge_value(&mut merged, &layer);
        }

        // Layer 3 - Project config
        if let Some(path) = self.project_config_path()? {
            tracing::debug!(?path, "Loading project config (layer 3)");
            let layer: Value = store.load(&NormalizedPath::new(&path))?;
            deep_merge_value(&mut merged, &layer);
        }

        // Layer 4 - Environment
        deep_merge_value(&mut merged, &self.env_layer());

        // Layer 5 - Command line
        if let Some(document) = &overrides.document {
            merged["document"] = to_value(document)?;
        }
        if !overrides.roots.is_empty() {
            merged["roots"] = to_value(&overrides.roots)?;
        }

        let mut config: PulseConfig =
            serde_json::from_value(merged).map_err(|e| Error::ConfigInvalid {
                message: e.to_string(),
            })?;
        config.anchor(&self.base_dir);
        Ok(config)
    }

    fn env_layer(&self) -> Value {
        let mut layer = serde_json::Map::new();

        if let Some(document) = self.env.get(ENV_DOCUMENT) {
            layer.insert("document".into(), Value::String(document.clone()));
        }
        if let Some(log_dir) = self.env.get(ENV_LOG_DIR) {
            layer.insert("log_dir".into(), Value::String(log_dir.clone()));
        }
        if let Some(command) = self.env.get(ENV_GENERATOR_CMD) {
            layer.insert(
                "generator".into(),
                serde_json::json!({ "command": command }),
            );
        }
        if let Some(raw) = self.env.get(ENV_ROOTS_JSON) {
            match parse_roots_json(raw) {
                Ok(roots) => {
                    let roots = roots
                        .iter()
                        .filter_map(|root| serde_json::to_value(root).ok())
                        .collect();
                    layer.insert("roots".into(), Value::Array(roots));
                }
                Err(e) => {
                    tracing::warn!("Ignoring malformed {}: {}", ENV_ROOTS_JSON, e);
                }
            }
        }

        Value::Object(layer)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

fn parse_roots_json(raw: &str) -> serde_json::Result<Vec<RootConfig>> {
    let entries: Vec<RootEntry> = serde_json::from_str(raw)?;
    Ok(entries.into_iter().map(RootConfig::from).collect())
}

fn to_value<T: serde::Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::ConfigInvalid {
        message: e.to_string(),
    })
}

/// Deep merge two JSON values
///
/// If both values are objects, merge them recursively with `other` taking precedence.
/// Otherwise, `other` replaces `base`.
fn deep_merge_value(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            for (key, other_val) in other_map {
                if let Some(base_val) = base_map.get_mut(key) {
                    deep_merge_value(base_val, other_val);
                } else {
                    base_map.insert(key.clone(), other_val.clone());
                }
            }
        }
        (base, other) => {
            *base = other.clone();
        }
    }
}
