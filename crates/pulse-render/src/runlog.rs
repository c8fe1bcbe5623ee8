//! Plain-text run log.

use pulse_scan::ScanSummary;

/// File name for a run's log: `pulse_scan_<timestamp>.log` with `:` and `-`
/// removed so the name is portable.
pub fn run_log_file_name(timestamp: &str) -> String {
    let stamp: String = timestamp.chars().filter(|c| !matches!(c, ':' | '-')).collect();
    format!("pulse_scan_{stamp}.log")
}

pub fn run_log_text(timestamp: &str, summary: &ScanSummary, reflection: &str) -> String {
    let mut out = format!("Status pulse run at {timestamp}\n\nRepositories:\n");
    if summary.is_empty() {
        out.push_str("  (none)\n");
    }
    for root in summary.iter() {
        out.push_str(&format!(
            "  - {}: {} files, {} LOC\n",
            root.name, root.metrics.file_count, root.metrics.total_lines
        ));
    }
    out.push_str(&format!(
        "  Total: {} files, {} LOC\n\nReflection:\n{}\n",
        summary.total_files(),
        summary.total_lines(),
        reflection.trim_end()
    ));
    out
}
