//! Region payloads.

use pulse_scan::{HygieneReport, RankedFile, RootStatus, ScanSummary};

use crate::{defuse, table_cell};

/// Per-root file and line counts followed by the reflection text.
///
/// A summary with no roots still renders the header and a zero total row.
pub fn diagnostics_payload(timestamp: &str, summary: &ScanSummary, reflection: &str) -> String {
    let mut out = String::new();
    out.push_str("### System Diagnostics\n\n");
    out.push_str(&format!("_Last scan: {timestamp}_\n\n"));
    out.push_str("| Repository | Files | LOC |\n");
    out.push_str("|---|---:|---:|\n");

    for root in summary.iter() {
        let name = match &root.status {
            RootStatus::Scanned => table_cell(&root.name),
            RootStatus::Missing => format!("{} (missing)", table_cell(&root.name)),
            RootStatus::Unreadable(_) => format!("{} (unreadable)", table_cell(&root.name)),
        };
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            name, root.metrics.file_count, root.metrics.total_lines
        ));
    }
    out.push_str(&format!(
        "| **Total** | **{}** | **{}** |\n\n",
        summary.total_files(),
        summary.total_lines()
    ));

    out.push_str("#### Reflection\n\n");
    out.push_str("```text\n");
    out.push_str(defuse(reflection).trim_end());
    out.push_str("\n```");
    out
}

/// Mission statement with the time it was last synchronized.
pub fn mission_payload(timestamp: &str, mission: &str) -> String {
    format!(
        "### Mission\n\n{}\n\n_Last sync: {timestamp}_",
        defuse(mission).trim()
    )
}

/// Whitespace hygiene summary. `applied` selects between "cleaned" and
/// "needing cleanup" wording and which file list is shown.
pub fn sanitize_payload(timestamp: &str, report: &HygieneReport, applied: bool) -> String {
    let (label, files) = if applied {
        ("Files cleaned", &report.cleaned)
    } else {
        ("Files needing cleanup", &report.dirty)
    };

    let mut out = String::new();
    out.push_str("### Sanitize Log\n\n");
    out.push_str(&format!("_Last run: {timestamp}_\n\n"));
    out.push_str(&format!("- Files scanned: {}\n", report.scanned));
    out.push_str(&format!("- {label}: {}\n", files.len()));
    if !report.failed.is_empty() {
        out.push_str(&format!("- Failures: {}\n", report.failed.len()));
    }

    if !files.is_empty() {
        out.push('\n');
        for file in files {
            out.push_str(&format!("- `{}`\n", defuse(file)));
        }
    }
    for failure in &report.failed {
        out.push_str(&format!(
            "- failed `{}`: {}\n",
            defuse(&failure.path),
            defuse(&failure.reason)
        ));
    }

    out.truncate(out.trim_end().len());
    out
}

/// Ranked table of the riskiest files across all roots.
pub fn mutation_risk_payload(timestamp: &str, ranked: &[RankedFile]) -> String {
    let mut out = String::new();
    out.push_str("### Mutation Risk\n\n");
    out.push_str(&format!("_Last scan: {timestamp}_\n\n"));

    if ranked.is_empty() {
        out.push_str("_No risky patterns detected._");
        return out;
    }

    out.push_str("| Rank | File | Score |\n");
    out.push_str("|---:|---|---:|");
    for (rank, file) in ranked.iter().enumerate() {
        out.push_str(&format!(
            "\n| {} | `{}` | {} |",
            rank + 1,
            table_cell(&file.display_path()),
            file.score
        ));
    }
    out
}
