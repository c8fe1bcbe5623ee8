//! Payload rendering for status-pulse regions
//!
//! Every function here is pure: the timestamp and all data are passed in,
//! nothing touches the clock or the filesystem. Any text that did not
//! originate in this crate (root names, mission text, generated reflections)
//! goes through [`pulse_blocks::neutralize`] before it is embedded, so a
//! payload can never carry a marker literal.

pub mod badge;
pub mod blocks;
pub mod reflection;
pub mod runlog;

pub use badge::{badge, shields_escape};
pub use blocks::{diagnostics_payload, mission_payload, mutation_risk_payload, sanitize_payload};
pub use reflection::{
    closing_line, ensure_closing_line, fallback_reflection, reflection_prompt,
};
pub use runlog::{run_log_file_name, run_log_text};

use pulse_blocks::{neutralize, vocabulary};

/// Defuse externally supplied text for embedding in a payload.
pub(crate) fn defuse(text: &str) -> String {
    let safe = neutralize(text, &vocabulary::all_targets());
    debug_assert!(
        !pulse_blocks::contains_marker(
            &safe,
            [
                &*vocabulary::DIAGNOSTICS,
                &*vocabulary::MISSION,
                &*vocabulary::SANITIZE_LOG,
                &*vocabulary::MUTATION_RISK,
            ]
        ),
        "neutralized text still carries a marker literal"
    );
    safe
}

/// Escape a cell for a Markdown table row.
pub(crate) fn table_cell(text: &str) -> String {
    defuse(text).replace('|', "\\|").replace('\n', " ")
}
