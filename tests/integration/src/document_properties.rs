//! Property tests over whole runs: whatever prose a document starts with is
//! carried through, and a repeated run at the same instant is a no-op.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use pulse_blocks::RegionState;
use pulse_core::{FallbackGenerator, PulseConfig, RootConfig, RunOptions, check, run};
use pulse_test_utils::TestWorkspace;

fn prose() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9 .,:;()-]{0,40}", 0..8).prop_map(|lines| lines.join("\n"))
}

fn config_for(ws: &TestWorkspace) -> PulseConfig {
    PulseConfig {
        document: ws.document(),
        log_dir: ws.logs_dir(),
        roots: vec![RootConfig::new(Some("core".into()), ws.root_path("core"))],
        ..Default::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prose_is_preserved_and_reruns_are_stable(text in prose(), files in 1usize..4) {
        let ws = TestWorkspace::new();
        for i in 0..files {
            ws.write_root_file("core", &format!("f{i}.py"), "x = 1\n");
        }
        ws.write_document(&text);
        let config = config_for(&ws);
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

        run(&config, &FallbackGenerator, now, &RunOptions::default()).unwrap();
        let first = ws.read_document();
        let again = run(&config, &FallbackGenerator, now, &RunOptions::default()).unwrap();

        prop_assert!(first.contains(&text));
        prop_assert!(!again.document_changed);
        prop_assert_eq!(ws.read_document(), first);
        let expected_row = format!("| core | {files} | {files} |");
        prop_assert!(ws.read_document().contains(&expected_row));
        for (_, state) in check(&config).unwrap() {
            prop_assert_eq!(state, RegionState::Present);
        }
    }
}
