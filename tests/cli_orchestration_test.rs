use std::fs;
use std::path::Path;

use release_bump::analyzer::ChangeSignal;
use release_bump::boundary::ReleaseWarning;
use release_bump::cli::{run_bump_workflow, write_outputs, BumpWorkflowArgs};
use release_bump::config::Config;
use release_bump::domain::ChangeType;
use release_bump::ReleaseError;
use tempfile::{tempdir, TempDir};

const PACKAGE_JSON: &str = "{\n  \"name\": \"demo\",\n  \"version\": \"1.2.3\"\n}\n";

const CHANGELOG: &str = "# Changelog\n\n## [1.2.3] - 01-12-2023\n\n* old entry\n";

fn workspace(manifest: &str, changelog: Option<&str>) -> (TempDir, Config) {
    let dir = tempdir().unwrap();
    let manifest_path = dir.path().join("package.json");
    fs::write(&manifest_path, manifest).unwrap();

    let changelog_path = dir.path().join("CHANGELOG.md");
    if let Some(text) = changelog {
        fs::write(&changelog_path, text).unwrap();
    }

    let mut config = Config::default();
    config.manifest.path = manifest_path.to_string_lossy().into_owned();
    config.changelog.filename = changelog_path.to_string_lossy().into_owned();
    (dir, config)
}

fn args(signal: ChangeSignal, message: Option<&str>) -> BumpWorkflowArgs {
    BumpWorkflowArgs {
        signal,
        changelog_message: message.map(str::to_string),
        date: Some("01-01-2024".to_string()),
        dry_run: false,
    }
}

fn read(path: &str) -> String {
    fs::read_to_string(Path::new(path)).unwrap()
}

#[test]
fn test_bump_from_title_updates_manifest() {
    let (_dir, config) = workspace(PACKAGE_JSON, None);

    let result = run_bump_workflow(
        args(ChangeSignal::Text("[minor] add export".to_string()), None),
        &config,
    )
    .unwrap();

    assert_eq!(result.current_version, "1.2.3");
    assert_eq!(result.new_version, "1.3.0");
    assert_eq!(result.change_type, ChangeType::Minor);
    assert!(!result.changelog_updated);
    assert!(read(&config.manifest.path).contains("\"version\": \"1.3.0\""));
}

#[test]
fn test_bump_from_labels() {
    let (_dir, config) = workspace(PACKAGE_JSON, None);

    let signal = ChangeSignal::Labels(vec!["dependencies".into(), "release:major".into()]);
    let result = run_bump_workflow(args(signal, None), &config).unwrap();
    assert_eq!(result.new_version, "2.0.0");
}

#[test]
fn test_bump_with_changelog_entry() {
    let (_dir, mut config) = workspace(PACKAGE_JSON, Some(CHANGELOG));
    config.changelog.add_entry = true;

    let message = "Release notes\n\n* added X\n\n* fixed Y\n\nThanks!";
    let result = run_bump_workflow(
        args(ChangeSignal::Declared(ChangeType::Patch), Some(message)),
        &config,
    )
    .unwrap();

    assert!(result.changelog_updated);
    assert!(result.warnings.is_empty());
    assert_eq!(
        read(&config.changelog.filename),
        "# Changelog\n\n## [1.2.4] - 01-01-2024\n\n* added X\n\n* fixed Y\n\n## [1.2.3] - 01-12-2023\n\n* old entry\n"
    );
}

#[test]
fn test_missing_changelog_is_created() {
    let (_dir, mut config) = workspace(PACKAGE_JSON, None);
    config.changelog.add_entry = true;

    let result = run_bump_workflow(
        args(ChangeSignal::Text("#patch".to_string()), Some("* fix")),
        &config,
    )
    .unwrap();

    assert_eq!(
        read(&config.changelog.filename),
        "## [1.2.4] - 01-01-2024\n\n* fix\n"
    );
    assert!(result
        .warnings
        .iter()
        .any(|w| matches!(w, ReleaseWarning::FirstChangelogEntry { .. })));
}

#[test]
fn test_empty_body_skips_changelog() {
    let (_dir, mut config) = workspace(PACKAGE_JSON, Some(CHANGELOG));
    config.changelog.add_entry = true;

    let result = run_bump_workflow(
        args(
            ChangeSignal::Text("#patch".to_string()),
            Some("prose only, no bullets"),
        ),
        &config,
    )
    .unwrap();

    assert!(!result.changelog_updated);
    assert_eq!(
        result.warnings,
        vec![ReleaseWarning::EmptyChangelogBody {
            version: "1.2.4".to_string()
        }]
    );
    assert_eq!(read(&config.changelog.filename), CHANGELOG);
    assert!(read(&config.manifest.path).contains("1.2.4"));
}

#[test]
fn test_add_entry_without_message_is_config_error() {
    let (_dir, mut config) = workspace(PACKAGE_JSON, Some(CHANGELOG));
    config.changelog.add_entry = true;

    let err = run_bump_workflow(args(ChangeSignal::Text("#patch".to_string()), None), &config)
        .unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
    assert_eq!(read(&config.manifest.path), PACKAGE_JSON);
}

#[test]
fn test_unknown_change_type_aborts_without_writes() {
    let (_dir, config) = workspace(PACKAGE_JSON, None);

    let err = run_bump_workflow(
        args(ChangeSignal::Text("update readme".to_string()), None),
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, ReleaseError::UnknownChangeType { .. }));
    assert!(err.to_string().contains("[major]"));
    assert_eq!(read(&config.manifest.path), PACKAGE_JSON);
}

#[test]
fn test_invalid_manifest_version() {
    let (_dir, config) = workspace("{\n  \"version\": \"1.2\"\n}\n", None);

    let err = run_bump_workflow(args(ChangeSignal::Declared(ChangeType::Major), None), &config)
        .unwrap_err();
    assert!(matches!(err, ReleaseError::InvalidSemVer(_)));
}

#[test]
fn test_strict_changelog_without_entries() {
    let (_dir, mut config) = workspace(PACKAGE_JSON, Some("# Changelog\n"));
    config.changelog.add_entry = true;
    config.changelog.require_existing_entry = true;

    let err = run_bump_workflow(
        args(ChangeSignal::Text("#minor".to_string()), Some("* thing")),
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, ReleaseError::MalformedDocument(_)));
    assert_eq!(read(&config.manifest.path), PACKAGE_JSON);
}

#[test]
fn test_malformed_date_aborts_without_writes() {
    let (_dir, mut config) = workspace(PACKAGE_JSON, Some(CHANGELOG));
    config.changelog.add_entry = true;

    for date in ["2024/1/5", "2024-01-05", "31-02-2024", "tomorrow"] {
        let mut workflow_args = args(ChangeSignal::Text("#minor".to_string()), Some("* thing"));
        workflow_args.date = Some(date.to_string());

        let err = run_bump_workflow(workflow_args, &config).unwrap_err();
        assert!(matches!(err, ReleaseError::Config(_)), "{}: {:?}", date, err);
    }
    assert_eq!(read(&config.manifest.path), PACKAGE_JSON);
    assert_eq!(read(&config.changelog.filename), CHANGELOG);
}

#[test]
fn test_short_date_is_zero_padded() {
    let (_dir, mut config) = workspace(PACKAGE_JSON, None);
    config.changelog.add_entry = true;

    let mut workflow_args = args(ChangeSignal::Text("#patch".to_string()), Some("* fix"));
    workflow_args.date = Some("5-1-2024".to_string());
    run_bump_workflow(workflow_args, &config).unwrap();

    assert_eq!(
        read(&config.changelog.filename),
        "## [1.2.4] - 05-01-2024\n\n* fix\n"
    );
}

#[test]
fn test_failed_changelog_write_leaves_manifest_untouched() {
    let (dir, mut config) = workspace(PACKAGE_JSON, None);
    config.changelog.add_entry = true;
    config.changelog.filename = dir
        .path()
        .join("missing")
        .join("CHANGELOG.md")
        .to_string_lossy()
        .into_owned();

    let err = run_bump_workflow(
        args(ChangeSignal::Text("#patch".to_string()), Some("* fix")),
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, ReleaseError::Io(_)));
    assert_eq!(read(&config.manifest.path), PACKAGE_JSON);
}

#[test]
fn test_dry_run_writes_nothing() {
    let (_dir, mut config) = workspace(PACKAGE_JSON, Some(CHANGELOG));
    config.changelog.add_entry = true;

    let mut workflow_args = args(ChangeSignal::Text("#major".to_string()), Some("* big"));
    workflow_args.dry_run = true;
    let result = run_bump_workflow(workflow_args, &config).unwrap();

    assert_eq!(result.new_version, "2.0.0");
    assert!(result.changelog_updated);
    assert_eq!(read(&config.manifest.path), PACKAGE_JSON);
    assert_eq!(read(&config.changelog.filename), CHANGELOG);
}

#[test]
fn test_prerelease_suffix_warning() {
    let (_dir, config) = workspace("{\"version\": \"1.0.0-beta.2\"}", None);

    let result = run_bump_workflow(args(ChangeSignal::Declared(ChangeType::Patch), None), &config)
        .unwrap();
    assert_eq!(result.new_version, "1.0.1-beta.2");
    assert_eq!(
        result.warnings,
        vec![ReleaseWarning::PrereleaseSuffixKept {
            version: "1.0.1-beta.2".to_string()
        }]
    );
}

#[test]
fn test_repeated_runs_stack_newest_first() {
    let (_dir, mut config) = workspace(PACKAGE_JSON, Some(CHANGELOG));
    config.changelog.add_entry = true;

    for _ in 0..2 {
        run_bump_workflow(
            args(ChangeSignal::Text("#patch".to_string()), Some("* fix")),
            &config,
        )
        .unwrap();
    }

    let changelog = read(&config.changelog.filename);
    let newest = changelog.find("## [1.2.5]").unwrap();
    let previous = changelog.find("## [1.2.4]").unwrap();
    assert!(newest < previous);
}

#[test]
fn test_write_outputs_appends() {
    let (dir, config) = workspace(PACKAGE_JSON, None);
    let result = run_bump_workflow(args(ChangeSignal::Declared(ChangeType::Minor), None), &config)
        .unwrap();

    let output_path = dir.path().join("github_output");
    fs::write(&output_path, "existing=1\n").unwrap();
    write_outputs(&output_path, &result).unwrap();

    assert_eq!(
        fs::read_to_string(&output_path).unwrap(),
        "existing=1\ncurrent_version=1.2.3\nnew_version=1.3.0\n"
    );
}
