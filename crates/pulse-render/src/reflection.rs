//! Reflection prompt, closing line and the deterministic fallback.

use pulse_scan::ScanSummary;

/// The line every reflection must end with.
pub fn closing_line(timestamp: &str) -> String {
    format!("Neural synchronization achieved at {timestamp}.")
}

/// Prompt handed to the text generator.
pub fn reflection_prompt(timestamp: &str, summary: &ScanSummary) -> String {
    let mut prompt = String::from(
        "Write a stoic reflection of 3 to 5 short lines on the current state of these \
         repositories. Plain text only: no HTML, no Markdown, no emoji.\n\n",
    );
    prompt.push_str(&format!("Timestamp: {timestamp}\n"));
    prompt.push_str("Repositories:\n");
    if summary.is_empty() {
        prompt.push_str("  (none)\n");
    }
    for root in summary.iter() {
        prompt.push_str(&format!(
            "  - {}: {} files, {} LOC\n",
            root.name, root.metrics.file_count, root.metrics.total_lines
        ));
    }
    prompt.push_str(&format!(
        "\nEnd with exactly this line:\n{}\n",
        closing_line(timestamp)
    ));
    prompt
}

/// Deterministic reflection used whenever generation is unavailable.
///
/// # Example
/// ```
/// use pulse_scan::ScanSummary;
///
/// let text = pulse_render::fallback_reflection("T", &ScanSummary::new());
/// assert_eq!(
///     text,
///     "System evaluation complete. No integrity drift detected.\n\
///      No repositories detected.\n\
///      Neural synchronization achieved at T."
/// );
/// ```
pub fn fallback_reflection(timestamp: &str, summary: &ScanSummary) -> String {
    let roots = if summary.is_empty() {
        "No repositories detected.".to_string()
    } else {
        summary
            .iter()
            .map(|r| {
                format!(
                    "{}: {} files, {} LOC",
                    r.name, r.metrics.file_count, r.metrics.total_lines
                )
            })
            .collect::<Vec<_>>()
            .join(" | ")
    };
    format!(
        "System evaluation complete. No integrity drift detected.\n{roots}\n{}",
        closing_line(timestamp)
    )
}

/// Trim a generated reflection and make sure it ends with the closing line.
pub fn ensure_closing_line(text: &str, timestamp: &str) -> String {
    let closing = closing_line(timestamp);
    let trimmed = text.trim();
    if trimmed.ends_with(&closing) {
        trimmed.to_string()
    } else if trimmed.is_empty() {
        closing
    } else {
        format!("{trimmed}\n{closing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use pulse_scan::{RepoMetrics, RootStatus};

    fn summary() -> ScanSummary {
        let mut summary = ScanSummary::new();
        for (name, files, lines) in [("core", 3, 10), ("web", 1, 4)] {
            summary.insert(
                name,
                RootStatus::Scanned,
                RepoMetrics {
                    file_count: files,
                    total_lines: lines,
                    ..Default::default()
                },
            );
        }
        summary
    }

    #[test]
    fn fallback_lists_every_root() {
        assert_eq!(
            fallback_reflection("T", &summary()),
            "System evaluation complete. No integrity drift detected.\n\
             core: 3 files, 10 LOC | web: 1 files, 4 LOC\n\
             Neural synchronization achieved at T."
        );
    }

    #[test]
    fn closing_line_is_appended_once() {
        let once = ensure_closing_line("Quiet code.\n", "T");
        assert_eq!(once, "Quiet code.\nNeural synchronization achieved at T.");
        assert_eq!(ensure_closing_line(&once, "T"), once);
    }

    #[test]
    fn empty_generation_becomes_closing_line() {
        assert_eq!(
            ensure_closing_line("  \n", "T"),
            "Neural synchronization achieved at T."
        );
    }

    #[test]
    fn prompt_names_roots_and_closing_line() {
        let prompt = reflection_prompt("T", &summary());
        assert!(prompt.contains("  - core: 3 files, 10 LOC\n"));
        assert!(prompt.ends_with("Neural synchronization achieved at T.\n"));
    }
}
