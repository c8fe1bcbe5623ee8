//! The marker vocabulary of the status page.
//!
//! These literals are bit-exact: existing documents already contain them.

use std::sync::LazyLock;

use crate::element::Element;
use crate::marker::Marker;
use crate::sync::Target;

pub const SYNC_START: &str = "<!--SYNC-START-->";
pub const SYNC_END: &str = "<!--SYNC-END-->";

pub const MISSION_START: &str = "<!-- CODEX_MISSION_START -->";
pub const MISSION_END: &str = "<!-- CODEX_MISSION_END -->";

pub const SANITIZE_LOG_START: &str = "<!-- SANITIZE_LOG_START -->";
pub const SANITIZE_LOG_END: &str = "<!-- SANITIZE_LOG_END -->";

pub const MUTATION_SCORE_START: &str = "<!-- CODEX_MUTATION_SCORE_START -->";
pub const MUTATION_SCORE_END: &str = "<!-- CODEX_MUTATION_SCORE_END -->";

/// Alt text of the last-sync badge image.
pub const BADGE_LABEL: &str = "Last Neural Sync";

/// Identifies the badge image anywhere in the document.
pub const BADGE_PATTERN: &str = r"!\[Last Neural Sync\]\([^)]+\)";

/// First level-one heading line; a missing badge is inserted after it.
pub const HEADING_ANCHOR: &str = r"(?m)^# [^\r\n]*";

/// Diagnostics table plus reflection.
pub static DIAGNOSTICS: LazyLock<Marker> = LazyLock::new(|| {
    Marker::new("diagnostics", SYNC_START, SYNC_END).expect("Invalid diagnostics marker")
});

/// Mission / about text.
pub static MISSION: LazyLock<Marker> = LazyLock::new(|| {
    Marker::new("mission", MISSION_START, MISSION_END).expect("Invalid mission marker")
});

/// Whitespace hygiene log.
pub static SANITIZE_LOG: LazyLock<Marker> = LazyLock::new(|| {
    Marker::new("sanitize-log", SANITIZE_LOG_START, SANITIZE_LOG_END)
        .expect("Invalid sanitize log marker")
});

/// Top-N mutation risk table.
pub static MUTATION_RISK: LazyLock<Marker> = LazyLock::new(|| {
    Marker::new("mutation-risk", MUTATION_SCORE_START, MUTATION_SCORE_END)
        .expect("Invalid mutation risk marker")
});

/// Last-sync badge image.
pub static BADGE: LazyLock<Element> = LazyLock::new(|| {
    Element::new("badge", BADGE_PATTERN, Some(HEADING_ANCHOR)).expect("Invalid badge pattern")
});

/// Every target the status page knows about, in synchronization order.
pub fn all_targets() -> Vec<Target> {
    vec![
        Target::Element(BADGE.clone()),
        Target::Region(MISSION.clone()),
        Target::Region(DIAGNOSTICS.clone()),
        Target::Region(SANITIZE_LOG.clone()),
        Target::Region(MUTATION_RISK.clone()),
    ]
}
