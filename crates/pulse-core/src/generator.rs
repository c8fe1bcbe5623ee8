//! Reflection text generation.
//!
//! The pipeline only sees [`ReflectionGenerator`]; any error from it means
//! "use the deterministic fallback", never "abort".

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use pulse_scan::ScanSummary;
use tokio::io::AsyncWriteExt;

use crate::config::GeneratorConfig;

/// Why a reflection could not be generated.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("No generator configured")]
    NotConfigured,

    #[error("Failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Generator timed out after {}s", timeout.as_secs())]
    Timeout { timeout: Duration },

    #[error("Generator exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Generator produced no output")]
    Empty,

    #[error("Generator I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Input handed to a generator.
#[derive(Debug, Clone)]
pub struct ReflectionRequest<'a> {
    pub timestamp: &'a str,
    pub summary: &'a ScanSummary,
    pub prompt: String,
}

impl<'a> ReflectionRequest<'a> {
    pub fn new(timestamp: &'a str, summary: &'a ScanSummary) -> Self {
        Self {
            timestamp,
            summary,
            prompt: pulse_render::reflection_prompt(timestamp, summary),
        }
    }
}

pub trait ReflectionGenerator {
    fn generate(&self, request: &ReflectionRequest<'_>) -> Result<String, GenerationError>;
}

/// Always unavailable; selected when no command is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGenerator;

impl ReflectionGenerator for FallbackGenerator {
    fn generate(&self, _request: &ReflectionRequest<'_>) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured)
    }
}

/// Runs an external command with the prompt on stdin and takes its stdout
/// as the reflection. The child is killed if it outlives the timeout.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// `None` when the configuration names no command.
    pub fn from_config(config: &GeneratorConfig) -> Option<Self> {
        let command = config.command.as_deref().map(str::trim)?;
        if command.is_empty() {
            return None;
        }
        Some(Self::new(
            command,
            config.args.clone(),
            Duration::from_secs(config.timeout_secs),
        ))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Where the program would be started from: the path itself when it
    /// names a directory component, else the first `PATH` entry holding it.
    pub fn locate(&self) -> Option<PathBuf> {
        let program = Path::new(&self.program);
        if program.components().count() > 1 {
            return program.is_file().then(|| program.to_path_buf());
        }
        let search = std::env::var_os("PATH")?;
        std::env::split_paths(&search).find_map(|dir| {
            executable_names(&self.program)
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    async fn run(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut child = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| GenerationError::Spawn {
                command: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(prompt.as_bytes()).await {
                // A command that ignores its input may exit before reading it
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                other => other?,
            }
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| GenerationError::Timeout {
                timeout: self.timeout,
            })??;

        if !output.status.success() {
            return Err(GenerationError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(GenerationError::Empty);
        }
        Ok(text)
    }
}

impl ReflectionGenerator for CommandGenerator {
    fn generate(&self, request: &ReflectionRequest<'_>) -> Result<String, GenerationError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        tracing::debug!(command = %self.program, "Requesting reflection");
        runtime.block_on(self.run(&request.prompt))
    }
}

#[cfg(windows)]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    ["", ".exe", ".cmd", ".bat"]
        .into_iter()
        .map(move |ext| format!("{program}{ext}"))
}

#[cfg(not(windows))]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(program.to_string())
}

/// The generator a configuration asks for.
pub fn from_config(config: &GeneratorConfig) -> Box<dyn ReflectionGenerator> {
    match CommandGenerator::from_config(config) {
        Some(generator) => Box::new(generator),
        None => Box::new(FallbackGenerator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(summary: &ScanSummary) -> ReflectionRequest<'_> {
        ReflectionRequest::new("T", summary)
    }

    #[test]
    fn fallback_is_never_available() {
        let summary = ScanSummary::new();
        assert!(matches!(
            FallbackGenerator.generate(&request(&summary)),
            Err(GenerationError::NotConfigured)
        ));
    }

    #[test]
    fn blank_command_is_not_configured() {
        let config = GeneratorConfig {
            command: Some("  ".into()),
            ..Default::default()
        };
        assert!(CommandGenerator::from_config(&config).is_none());
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let summary = ScanSummary::new();
        let generator = CommandGenerator::new(
            "pulse-no-such-program-1b7e",
            Vec::new(),
            Duration::from_secs(5),
        );
        assert!(matches!(
            generator.generate(&request(&summary)),
            Err(GenerationError::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn command_output_becomes_reflection() {
        let summary = ScanSummary::new();
        let generator = CommandGenerator::new(
            "sh",
            vec!["-c".into(), "cat >/dev/null; echo '  Calm.  '".into()],
            Duration::from_secs(10),
        );
        assert_eq!(generator.generate(&request(&summary)).unwrap(), "Calm.");
    }

    #[cfg(unix)]
    #[test]
    fn slow_command_times_out() {
        let summary = ScanSummary::new();
        let generator = CommandGenerator::new(
            "sh",
            vec!["-c".into(), "sleep 5".into()],
            Duration::from_millis(200),
        );
        assert!(matches!(
            generator.generate(&request(&summary)),
            Err(GenerationError::Timeout { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_reports_status() {
        let summary = ScanSummary::new();
        let generator = CommandGenerator::new(
            "sh",
            vec!["-c".into(), "echo boom >&2; exit 3".into()],
            Duration::from_secs(10),
        );
        match generator.generate(&request(&summary)) {
            Err(GenerationError::Failed { stderr, .. }) => assert_eq!(stderr, "boom"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn unknown_program_is_not_located() {
        let generator =
            CommandGenerator::new("pulse-no-such-program-1b7e", Vec::new(), Duration::from_secs(5));
        assert_eq!(generator.locate(), None);
    }

    #[test]
    fn explicit_path_is_located_without_search() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("reflect");
        std::fs::write(&script, "").unwrap();

        let found = CommandGenerator::new(script.to_string_lossy(), Vec::new(), Duration::from_secs(5));
        let gone = CommandGenerator::new(
            dir.path().join("absent").to_string_lossy(),
            Vec::new(),
            Duration::from_secs(5),
        );

        assert_eq!(found.locate(), Some(script));
        assert_eq!(gone.locate(), None);
    }

    #[cfg(unix)]
    #[test]
    fn shell_is_found_on_path() {
        let generator = CommandGenerator::new("sh", Vec::new(), Duration::from_secs(5));
        assert!(generator.locate().is_some());
    }
}
