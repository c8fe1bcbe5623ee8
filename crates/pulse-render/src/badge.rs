//! Last-sync badge line.

use pulse_blocks::vocabulary::BADGE_LABEL;

/// Escape text for a shields.io static badge path segment.
///
/// Dashes and underscores are doubled and spaces become `%20`.
pub fn shields_escape(text: &str) -> String {
    text.replace('-', "--")
        .replace('_', "__")
        .replace(' ', "%20")
}

/// Markdown image reference for the last-sync badge.
///
/// # Example
/// ```
/// let line = pulse_render::badge("2024-05-01T09:30Z");
/// assert_eq!(
///     line,
///     "![Last Neural Sync](https://img.shields.io/badge/Last%20Neural%20Sync-2024--05--01T09:30Z-blueviolet)"
/// );
/// ```
pub fn badge(timestamp: &str) -> String {
    format!(
        "![{BADGE_LABEL}](https://img.shields.io/badge/{}-{}-blueviolet)",
        shields_escape(BADGE_LABEL),
        shields_escape(timestamp)
    )
}
