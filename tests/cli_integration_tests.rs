//! Integration tests for argument handling and the `checks` command.

mod common;

use common::TestFixture;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    glossary_guard!()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("checks"));
}

#[test]
fn version_flag() {
    glossary_guard!()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("glossary-guard"));
}

#[test]
fn unknown_flag_is_usage_error() {
    glossary_guard!()
        .args(["validate", "--bogus"])
        .assert()
        .code(2);
}

#[test]
fn validate_without_files_is_usage_error() {
    let fixture = TestFixture::new();
    glossary_guard!()
        .current_dir(fixture.path())
        .args(["validate", "--no-config"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage error: no input files"));
}

#[test]
fn checks_lists_builtin_rules_in_order() {
    let fixture = TestFixture::new();
    glossary_guard!()
        .current_dir(fixture.path())
        .arg("checks")
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)ensure-csv-extension.*ensure-utf8-encoding.*ensure-header-and-rows.*ensure-flag-values").unwrap())
        .stdout(predicate::str::contains("critical"));
}

#[test]
fn checks_json_output() {
    let fixture = TestFixture::new();
    let output = glossary_guard!()
        .current_dir(fixture.path())
        .args(["checks", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let list = parsed.as_array().unwrap();
    assert_eq!(list.len(), 7);
    assert_eq!(list[0]["name"], "ensure-csv-extension");
    assert_eq!(list[0]["fail_fast"], true);
    assert_eq!(list[1]["fixable"], true);
}

#[test]
fn checks_respects_config_disable_and_priority() {
    let fixture = TestFixture::new();
    fixture.create_config(
        "[checks]\ndisable = [\"ensure-flag-values\"]\n\n[checks.priority]\nensure-lang-columns = 0\n",
    );
    let output = glossary_guard!()
        .current_dir(fixture.path())
        .args(["checks", "--format", "json"])
        .output()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names.len(), 6);
    assert!(!names.contains(&"ensure-flag-values".to_string()));
    assert_eq!(names[3], "ensure-lang-columns");
}

#[test]
fn no_config_ignores_local_file() {
    let fixture = TestFixture::new();
    fixture.create_config("[checks]\ndisable = [\"ensure-flag-values\"]\n");
    glossary_guard!()
        .current_dir(fixture.path())
        .args(["checks", "--no-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ensure-flag-values"));
}

#[test]
fn unknown_check_in_config_is_config_error() {
    let fixture = TestFixture::new();
    fixture.create_config("[checks]\ndisable = [\"no-such-check\"]\n");
    glossary_guard!()
        .current_dir(fixture.path())
        .arg("checks")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown check 'no-such-check'"));
}

#[test]
fn invalid_config_is_config_error() {
    let fixture = TestFixture::new();
    fixture.create_config("[validate]\nparallel = \"many\"\n");
    glossary_guard!()
        .current_dir(fixture.path())
        .arg("checks")
        .assert()
        .code(2)
        .stderr(predicate::str::contains(".glossary-guard.toml"));
}

#[test]
fn explicit_missing_config_is_error() {
    let fixture = TestFixture::new();
    glossary_guard!()
        .current_dir(fixture.path())
        .args(["checks", "--config", "missing.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read file: missing.toml"));
}

#[test]
fn disabling_every_check_refuses_to_run() {
    let fixture = TestFixture::new();
    fixture.create_file("g.csv", common::VALID_GLOSSARY);
    fixture.create_config(
        "[checks]\ndisable = [\"ensure-csv-extension\", \"ensure-utf8-encoding\", \
         \"ensure-header-and-rows\", \"ensure-non-empty-term\", \"ensure-unique-terms\", \
         \"ensure-lang-columns\", \"ensure-flag-values\"]\n",
    );
    glossary_guard!()
        .current_dir(fixture.path())
        .args(["validate", "g.csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No checks registered. Nothing to run."));
}
