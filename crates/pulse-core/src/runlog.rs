//! Per-run plain-text log files.

use std::path::{Path, PathBuf};

use pulse_fs::NormalizedPath;
use pulse_scan::ScanSummary;

/// Write the run log for `timestamp` into `log_dir` and return its path.
pub fn write_run_log(
    log_dir: &Path,
    timestamp: &str,
    summary: &ScanSummary,
    reflection: &str,
) -> pulse_fs::Result<PathBuf> {
    let path = log_dir.join(pulse_render::run_log_file_name(timestamp));
    let text = pulse_render::run_log_text(timestamp, summary, reflection);
    pulse_fs::io::write_text(&NormalizedPath::new(&path), &text)?;
    Ok(path)
}
