//! End-to-end synchronizer scenarios against the real marker vocabulary.

use pretty_assertions::assert_eq;
use pulse_blocks::vocabulary::{self, BADGE, DIAGNOSTICS, MISSION, MUTATION_RISK, SANITIZE_LOG};
use pulse_blocks::{RegionState, Update, inspect, synchronize};

fn diagnostics(payload: &str) -> Update {
    Update::region(DIAGNOSTICS.clone(), payload)
}

#[test]
fn empty_document_then_second_run() {
    let first = synchronize("", &[diagnostics("X")]).unwrap();
    assert_eq!(first.document, "<!--SYNC-START-->\nX\n<!--SYNC-END-->");

    let second = synchronize(&first.document, &[diagnostics("Y")]).unwrap();
    assert_eq!(second.document, "<!--SYNC-START-->\nY\n<!--SYNC-END-->");
}

#[test]
fn three_duplicate_blocks_collapse_to_one() {
    let stale = "<!--SYNC-START-->\nstale\n<!--SYNC-END-->";
    let doc = format!("# Daemon\n\nIntro.\n\n{stale}\n{stale}\n{stale}\n");

    let out = synchronize(&doc, &[diagnostics("fresh")]).unwrap();

    assert_eq!(out.document.matches("<!--SYNC-START-->").count(), 1);
    assert_eq!(out.document.matches("<!--SYNC-END-->").count(), 1);
    assert!(out.document.contains("<!--SYNC-START-->\nfresh\n<!--SYNC-END-->"));
    assert!(!out.document.contains("stale"));
    assert!(out.document.starts_with("# Daemon\n\nIntro.\n"));
    assert_eq!(
        out.report.regions[0].state,
        RegionState::Duplicated { count: 3 }
    );
}

#[test]
fn first_run_keeps_trailing_whitespace() {
    let doc = "# Daemon\n\nNotes   \n\t\n";
    let out = synchronize(doc, &[diagnostics("X")]).unwrap();
    assert!(out.document.starts_with(doc));
    assert_eq!(
        &out.document[doc.len()..],
        "\n<!--SYNC-START-->\nX\n<!--SYNC-END-->"
    );
}

#[test]
fn changing_one_payload_changes_only_that_region() {
    let updates = |mission: &str| {
        vec![
            Update::region(MISSION.clone(), mission),
            diagnostics("table"),
            Update::region(MUTATION_RISK.clone(), "risk"),
        ]
    };
    let base = synchronize("# Daemon\n\nhand text\n", &updates("v1")).unwrap().document;
    let next = synchronize(&base, &updates("v2")).unwrap().document;

    assert_eq!(next, base.replacen("\nv1\n", "\nv2\n", 1));
}

#[test]
fn all_regions_in_one_pass_are_idempotent() {
    let updates = vec![
        Update::element(
            BADGE.clone(),
            "![Last Neural Sync](https://img.shields.io/badge/Last%20Neural%20Sync-2026--10--19T12:00Z-purple?style=for-the-badge)",
        ),
        Update::region(MISSION.clone(), "mission"),
        diagnostics("diagnostics"),
        Update::region(SANITIZE_LOG.clone(), "sanitize"),
        Update::region(MUTATION_RISK.clone(), "risk"),
    ];
    let once = synchronize("# Daemon\n\nBody text.\n", &updates).unwrap();
    let twice = synchronize(&once.document, &updates).unwrap();

    assert_eq!(once.document, twice.document);
    assert!(!twice.report.changed());
    assert!(
        once.document
            .starts_with("# Daemon\n\n![Last Neural Sync](https://img.shields.io/")
    );
    for (_, state) in inspect(&twice.document, &vocabulary::all_targets()) {
        assert_eq!(state, RegionState::Present);
    }
}

#[test]
fn later_region_not_swallowed_by_earlier_one() {
    let doc = "<!--SYNC-START-->\na\n<!--SYNC-END-->\n\nkeep me\n\n<!-- CODEX_MISSION_START -->\nm\n<!-- CODEX_MISSION_END -->";
    let out = synchronize(doc, &[diagnostics("b")]).unwrap();
    assert_eq!(
        out.document,
        "<!--SYNC-START-->\nb\n<!--SYNC-END-->\n\nkeep me\n\n<!-- CODEX_MISSION_START -->\nm\n<!-- CODEX_MISSION_END -->"
    );
}

#[test]
fn unmatched_end_flagged_and_left_in_place() {
    let doc = "# Daemon\n\nold tool left <!--SYNC-END--> here\n";
    let out = synchronize(doc, &[diagnostics("X")]).unwrap();

    assert!(out.document.starts_with(doc));
    assert_eq!(out.report.anomalies.len(), 1);
    assert_eq!(out.report.anomalies[0].line, 3);
    assert!(out.report.regions[0].state.is_malformed());

    let again = synchronize(&out.document, &[diagnostics("X")]).unwrap();
    assert_eq!(again.document, out.document);
    assert_eq!(again.report.anomalies.len(), 1);
}

const BADGE_LINE: &str = "![Last Neural Sync](https://img.shields.io/badge/Last%20Neural%20Sync-now-blueviolet)";

#[test]
fn badge_never_lands_inside_a_region() {
    let doc = "Intro text.\n\n<!--SYNC-START-->\n# mutate later\n<!--SYNC-END-->";
    let updates = [
        Update::element(BADGE.clone(), BADGE_LINE),
        diagnostics("# mutate later"),
    ];

    let first = synchronize(doc, &updates).unwrap();
    assert_eq!(BADGE.find_all(&first.document).len(), 1);
    assert!(first.document.starts_with(&format!("{BADGE_LINE}\n\nIntro text.")));
    assert_eq!(first.report.regions[0].state, RegionState::Missing);

    let second = synchronize(&first.document, &updates).unwrap();
    assert_eq!(second.document, first.document);
    assert_eq!(second.report.regions[0].state, RegionState::Present);
}

#[test]
fn badge_inside_a_region_counts_as_missing() {
    let doc = format!("# Daemon\n\n<!--SYNC-START-->\n{BADGE_LINE}\n<!--SYNC-END-->\n");
    let targets = vocabulary::all_targets();

    let before = inspect(&doc, &targets);
    assert_eq!(before[0], ("badge".to_string(), RegionState::Missing));

    let out = synchronize(&doc, &[Update::element(BADGE.clone(), BADGE_LINE), diagnostics("table")])
        .unwrap();
    assert_eq!(BADGE.find_all(&out.document).len(), 1);
    assert!(out.document.starts_with(&format!("# Daemon\n\n{BADGE_LINE}\n\n")));
    assert!(out.document.contains("<!--SYNC-START-->\ntable\n<!--SYNC-END-->"));
}
