//! [`TestWorkspace`] builder for end-to-end status-pulse scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::tree::write_file;

/// A temporary directory holding a status document and any number of
/// source roots.
///
/// # Example
///
/// ```rust,no_run
/// use pulse_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_root_file("core", "main.py", "print(1)\n");
/// ws.write_document("# Status\n");
/// ws.assert_document_contains("# Status");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("TestWorkspace::new: failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the status document (`README.md` in the workspace root).
    pub fn document(&self) -> PathBuf {
        self.root().join("README.md")
    }

    /// Path of a named source root. The directory is not created.
    pub fn root_path(&self, name: &str) -> PathBuf {
        self.root().join("roots").join(name)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root().join("logs")
    }

    pub fn write_document(&self, content: &str) {
        fs::write(self.document(), content).expect("write_document: failed to write");
    }

    pub fn read_document(&self) -> String {
        fs::read_to_string(self.document())
            .unwrap_or_else(|e| panic!("read_document: {}: {e}", self.document().display()))
    }

    /// Write a file inside the named root, creating the root as needed.
    pub fn write_root_file(&self, root: &str, relative: &str, content: impl AsRef<[u8]>) {
        write_file(&self.root_path(root), relative, content);
    }

    /// Write `pulse.toml` in the workspace root and return its path.
    pub fn write_config(&self, content: &str) -> PathBuf {
        write_file(self.root(), "pulse.toml", content)
    }

    /// Run-log files currently present, sorted by name.
    pub fn run_logs(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(self.logs_dir()) else {
            return Vec::new();
        };
        let mut logs: Vec<PathBuf> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "log"))
            .collect();
        logs.sort();
        logs
    }

    /// # Panics
    /// Panics if the document cannot be read or does not contain `content`.
    pub fn assert_document_contains(&self, content: &str) {
        let document = self.read_document();
        assert!(
            document.contains(content),
            "Document does not contain expected content.\nExpected: {content}\nActual: {document}"
        );
    }

    /// Number of non-overlapping occurrences of `needle` in the document.
    pub fn document_count(&self, needle: &str) -> usize {
        self.read_document().matches(needle).count()
    }
}
