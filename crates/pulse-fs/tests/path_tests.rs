use pulse_fs::NormalizedPath;
use rstest::rstest;

#[rstest]
#[case("foo/bar/baz", "foo/bar/baz")]
#[case("foo\\bar\\baz", "foo/bar/baz")]
#[case("foo/bar\\baz", "foo/bar/baz")]
#[case("foo//bar/", "foo/bar")]
#[case("/abs/path", "/abs/path")]
fn normalizes_separators(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).as_str(), expected);
}

#[test]
fn join_paths() {
    let base = NormalizedPath::new("foo/bar");
    assert_eq!(base.join("baz").as_str(), "foo/bar/baz");
}

#[test]
fn parent_and_file_name() {
    let path = NormalizedPath::new("logs/pulse_scan_20261019T1200Z.log");
    assert_eq!(path.parent().unwrap().as_str(), "logs");
    assert_eq!(path.file_name(), Some("pulse_scan_20261019T1200Z.log"));
    assert_eq!(path.extension(), Some("log"));
}

#[test]
fn dotfile_has_no_extension() {
    assert_eq!(NormalizedPath::new("dir/.env").extension(), None);
}

#[test]
fn exists_false_for_nonexistent() {
    let path = NormalizedPath::new("/nonexistent/path/that/does/not/exist");
    assert!(!path.exists());
}
