//! End-to-end scenarios: configuration files on disk, resolved through every
//! layer, driving full runs against real trees.

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use pulse_blocks::{RegionState, vocabulary};
use pulse_core::{
    ConfigResolver, FallbackGenerator, Overrides, PulseConfig, RunOptions, RunReport, check, run,
};
use pulse_test_utils::TestWorkspace;
use pulse_test_utils::tree::{lines, python_project};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, hour, minute, 0).unwrap()
}

/// Resolve the workspace's configuration with no user file and no env.
fn resolve(ws: &TestWorkspace, overrides: &Overrides) -> PulseConfig {
    ConfigResolver::new(ws.root())
        .with_user_config_dir(ws.root().join(".user-config"))
        .with_env(Vec::<(String, String)>::new())
        .resolve(overrides)
        .unwrap()
}

fn sync(config: &PulseConfig, now: DateTime<Utc>) -> RunReport {
    run(config, &FallbackGenerator, now, &RunOptions::default()).unwrap()
}

#[test]
fn toml_config_drives_a_multi_root_run() {
    let ws = TestWorkspace::new();
    let (files, loc) = python_project(&ws.root_path("backend"));
    ws.write_root_file("tools", "cli.py", lines(7));
    ws.write_config(
        r#"
mission = "Keep every service observable."

[[roots]]
name = "backend"
path = "roots/backend"

[[roots]]
name = "tools"
path = "roots/tools"
"#,
    );
    let config = resolve(&ws, &Overrides::default());

    let report = sync(&config, at(8, 0));

    assert_eq!(report.summary.total_files(), files + 1);
    assert_eq!(report.summary.total_lines(), loc + 7);
    ws.assert_document_contains("Keep every service observable.");
    ws.assert_document_contains(&format!("| backend | {files} | {loc} |"));
    ws.assert_document_contains("| tools | 1 | 7 |");
    ws.assert_document_contains(&format!(
        "| **Total** | **{}** | **{}** |",
        files + 1,
        loc + 7
    ));
}

#[test]
fn json_and_yaml_configs_are_equivalent() {
    let toml_ws = TestWorkspace::new();
    toml_ws.write_root_file("core", "a.py", lines(3));
    toml_ws.write_config("extensions = [\".py\"]\n\n[[roots]]\nname = \"core\"\npath = \"roots/core\"\n");
    let from_toml = resolve(&toml_ws, &Overrides::default());

    let json_ws = TestWorkspace::new();
    json_ws.write_root_file("core", "a.py", lines(3));
    std::fs::write(
        json_ws.root().join("pulse.json"),
        r#"{"extensions": [".py"], "roots": [{"name": "core", "path": "roots/core"}]}"#,
    )
    .unwrap();
    let from_json = ConfigResolver::new(json_ws.root())
        .with_config_file(Some("pulse.json".into()))
        .with_user_config_dir(json_ws.root().join(".user-config"))
        .with_env(Vec::<(String, String)>::new())
        .resolve(&Overrides::default())
        .unwrap();

    let yaml_ws = TestWorkspace::new();
    yaml_ws.write_root_file("core", "a.py", lines(3));
    std::fs::write(
        yaml_ws.root().join("pulse.yaml"),
        "extensions: [\".py\"]\nroots:\n  - name: core\n    path: roots/core\n",
    )
    .unwrap();
    let from_yaml = ConfigResolver::new(yaml_ws.root())
        .with_config_file(Some("pulse.yaml".into()))
        .with_user_config_dir(yaml_ws.root().join(".user-config"))
        .with_env(Vec::<(String, String)>::new())
        .resolve(&Overrides::default())
        .unwrap();

    let summaries: Vec<_> = [(&toml_ws, from_toml), (&json_ws, from_json), (&yaml_ws, from_yaml)]
        .into_iter()
        .map(|(ws, config)| {
            sync(&config, at(8, 0));
            ws.read_document()
        })
        .collect();
    assert_eq!(summaries[0], summaries[1]);
    assert_eq!(summaries[1], summaries[2]);
}

#[test]
fn environment_and_cli_layers_stack() {
    let ws = TestWorkspace::new();
    ws.write_root_file("env-root", "a.py", lines(2));
    ws.write_root_file("cli-root", "b.py", lines(9));
    ws.write_config("document = \"FROM_FILE.md\"\n");

    let roots_json = serde_json::json!([{"name": "env", "path": ws.root_path("env-root")}]);
    let resolver = ConfigResolver::new(ws.root())
        .with_user_config_dir(ws.root().join(".user-config"))
        .with_env([
            ("PULSE_DOCUMENT".to_string(), "FROM_ENV.md".to_string()),
            ("PULSE_ROOTS_JSON".to_string(), roots_json.to_string()),
        ]);

    let env_only = resolver.resolve(&Overrides::default()).unwrap();
    assert_eq!(env_only.document, ws.root().join("FROM_ENV.md"));
    assert_eq!(env_only.roots.len(), 1);

    let with_cli = resolver
        .resolve(&Overrides {
            document: Some("FROM_CLI.md".into()),
            roots: vec![pulse_core::RootConfig::parse("cli=roots/cli-root")],
        })
        .unwrap();
    sync(&with_cli, at(8, 0));

    let page = std::fs::read_to_string(ws.root().join("FROM_CLI.md")).unwrap();
    assert!(page.contains("| cli | 1 | 9 |"));
    assert!(!page.contains("| env |"));
    assert!(!ws.root().join("FROM_ENV.md").exists());
    assert!(!ws.root().join("FROM_FILE.md").exists());
}

#[test]
fn hand_written_content_survives_many_runs() {
    let ws = TestWorkspace::new();
    ws.write_root_file("core", "a.py", lines(1));
    ws.write_config("[[roots]]\nname = \"core\"\npath = \"roots/core\"\n");
    let intro = "# Project\n\nIntro paragraph.\n\n## Notes\n\n- keep me\n";
    ws.write_document(intro);
    let config = resolve(&ws, &Overrides::default());

    for minute in 0..5 {
        ws.write_root_file("core", &format!("m{minute}.py"), lines(1));
        sync(&config, at(9, minute));
    }

    let doc = ws.read_document();
    assert!(doc.starts_with("# Project\n\n![Last Neural Sync]("));
    assert!(doc.contains("Intro paragraph.\n\n## Notes\n\n- keep me\n"));
    assert!(doc.contains("| core | 6 | 6 |"));
    assert!(doc.contains("2025-01-15T09:04Z"));
    assert_eq!(doc.matches("![Last Neural Sync]").count(), 1);
    for (_, state) in check(&config).unwrap() {
        assert_eq!(state, RegionState::Present);
    }
}

#[test]
fn disabled_regions_are_left_alone() {
    let ws = TestWorkspace::new();
    ws.write_config("[regions]\nmission = false\nsanitize_log = false\nmutation_risk = false\n");
    let existing = format!(
        "# Status\n\n{}\nhand-kept mission\n{}\n",
        vocabulary::MISSION_START,
        vocabulary::MISSION_END
    );
    ws.write_document(&existing);
    let config = resolve(&ws, &Overrides::default());

    let report = sync(&config, at(10, 0));

    let names: Vec<&str> = report.sync.regions.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["badge", "diagnostics"]);
    let doc = ws.read_document();
    assert!(doc.contains("hand-kept mission"));
    assert!(!doc.contains(vocabulary::SANITIZE_LOG_START));
    assert!(!doc.contains(vocabulary::MUTATION_SCORE_START));
}

#[test]
fn reordered_regions_are_updated_where_they_stand() {
    let ws = TestWorkspace::new();
    let document = format!(
        "# Status\n\n{}\nold risk\n{}\n\nMiddle text.\n\n{}\nold diagnostics\n{}\n",
        vocabulary::MUTATION_SCORE_START,
        vocabulary::MUTATION_SCORE_END,
        vocabulary::SYNC_START,
        vocabulary::SYNC_END,
    );
    ws.write_document(&document);
    let config = resolve(&ws, &Overrides::default());

    sync(&config, at(11, 0));

    let doc = ws.read_document();
    let risk = doc.find(vocabulary::MUTATION_SCORE_START).unwrap();
    let middle = doc.find("Middle text.").unwrap();
    let diagnostics = doc.find(vocabulary::SYNC_START).unwrap();
    assert!(risk < middle && middle < diagnostics);
    assert!(!doc.contains("old risk"));
    assert!(!doc.contains("old diagnostics"));
}
