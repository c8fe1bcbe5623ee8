//! The init command: write a starter configuration.

use std::path::Path;

use colored::Colorize;

use pulse_core::PulseConfig;
use pulse_fs::{ConfigStore, NormalizedPath};

use crate::error::{CliError, Result};

/// File name `init` writes and the resolver picks up by default.
pub const CONFIG_FILE: &str = "pulse.toml";

/// Run the init command
///
/// Writes the built-in defaults to `pulse.toml` in `dir`. An existing file is
/// only replaced with `force`.
pub fn run_init(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    ConfigStore::new().save(&NormalizedPath::new(&path), &PulseConfig::default())?;

    println!(
        "{} Wrote {}",
        "OK".green().bold(),
        path.display().to_string().cyan()
    );
    println!("Add a [[roots]] entry, then run {}.", "pulse sync".cyan());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_loadable_defaults() {
        let temp = TempDir::new().unwrap();
        run_init(temp.path(), false).unwrap();

        let loaded: PulseConfig = ConfigStore::new()
            .load(&NormalizedPath::new(temp.path().join(CONFIG_FILE)))
            .unwrap();
        assert_eq!(loaded, PulseConfig::default());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "mission = \"mine\"\n").unwrap();

        assert!(run_init(temp.path(), false).is_err());
        assert!(run_init(temp.path(), true).is_ok());
        let text = std::fs::read_to_string(temp.path().join(CONFIG_FILE)).unwrap();
        assert!(!text.contains("mine"));
    }
}
