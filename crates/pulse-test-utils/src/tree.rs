//! Source tree fixtures.
//!
//! Files are written with a known number of lines so tests can assert exact
//! counts without re-reading what they wrote.

use std::fs;
use std::path::{Path, PathBuf};

/// `count` newline-terminated lines of the form `line N`.
pub fn lines(count: usize) -> String {
    (1..=count).map(|n| format!("line {n}\n")).collect()
}

/// Write `content` to `root/relative`, creating parent directories.
///
/// # Panics
/// Panics if any filesystem operation fails.
pub fn write_file(root: &Path, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("write_file: failed to create {}: {e}", parent.display()));
    }
    fs::write(&path, content)
        .unwrap_or_else(|e| panic!("write_file: failed to write {}: {e}", path.display()));
    path
}

/// A small Python project: three counted files with 2, 3 and 5 lines, plus
/// an excluded `.venv` and `__pycache__` that must never be counted.
///
/// Realism level: **FAKE** (file layout only).
///
/// Returns `(file_count, total_lines)` for the counted part.
pub fn python_project(root: &Path) -> (u64, u64) {
    write_file(root, "main.py", lines(2));
    write_file(root, "pkg/__init__.py", lines(3));
    write_file(root, "pkg/util.py", lines(5));
    write_file(root, "README.md", lines(7));
    write_file(root, ".venv/lib/site.py", lines(100));
    write_file(root, "pkg/__pycache__/util.cpython.py", lines(50));
    (3, 10)
}
