//! Integration tests for the ossec-qpack binary
//!
//! Each test runs the binary inside a fresh temp directory, since the default
//! input and output paths are relative to the working directory.

#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE_DB: &str = "# comment
etc/passwd!Acme Rootkit: installs backdoor
*tmp/hidden!Acme Rootkit: installs backdoor
/bin/evil!Other-One: variant
";

fn setup(db: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("rootkit_files.txt"), db).unwrap();
    dir
}

fn qpack(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ossec-qpack").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn read_pack(path: &Path) -> serde_json::Value {
    let contents = fs::read_to_string(path).unwrap();
    serde_json::from_str(&contents).unwrap()
}

// ============================================================================
// Default invocation
// ============================================================================

#[test]
fn test_no_args_writes_default_output() {
    let dir = setup(SAMPLE_DB);

    qpack(dir.path()).assert().success();

    let pack = read_pack(&dir.path().join("ossec-rootkit.conf"));
    assert_eq!(pack["platform"], "linux");
    assert_eq!(pack["version"], "1.4.5");

    let queries = pack["queries"].as_object().unwrap();
    assert_eq!(queries.len(), 2);
    assert_eq!(
        queries["acme_rootkit"]["query"],
        "select * from file where path in ('/etc/passwd');"
    );
    assert_eq!(
        queries["other_one"]["query"],
        "select * from file where path in ('/bin/evil');"
    );
    assert_eq!(queries["other_one"]["interval"], "3600");
    assert_eq!(queries["other_one"]["platform"], "linux");
    assert_eq!(queries["other_one"]["description"], "other_one");
    assert_eq!(queries["other_one"]["value"], "Artifacts used by this malware");
}

#[test]
fn test_wildcard_diagnostic_on_stdout() {
    let dir = setup(SAMPLE_DB);

    qpack(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Ignoring file starting with wildcard: *tmp/hidden",
        ));

    let contents = fs::read_to_string(dir.path().join("ossec-rootkit.conf")).unwrap();
    assert!(!contents.contains("hidden"));
}

#[test]
fn test_clean_database_prints_nothing() {
    let dir = setup("bin/a!Kit\n# only a comment\nno separator\n");

    qpack(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_blank_parts_reported_and_skipped() {
    let dir = setup("   !Kit\nbin/a!  :desc\nbin/b!Kit\n");

    qpack(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Ignoring entry with empty file path (line 1)",
        ))
        .stdout(predicate::str::contains(
            "Ignoring entry with empty rootkit name (line 2)",
        ));

    let pack = read_pack(&dir.path().join("ossec-rootkit.conf"));
    let queries = pack["queries"].as_object().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(
        queries["kit"]["query"],
        "select * from file where path in ('/bin/b');"
    );
}

#[test]
fn test_run_twice_is_byte_identical() {
    let dir = setup(SAMPLE_DB);
    let out = dir.path().join("ossec-rootkit.conf");

    qpack(dir.path()).assert().success();
    let first = fs::read(&out).unwrap();

    qpack(dir.path()).assert().success();
    let second = fs::read(&out).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_existing_output_is_overwritten() {
    let dir = setup(SAMPLE_DB);
    let out = dir.path().join("ossec-rootkit.conf");
    fs::write(&out, "not json at all").unwrap();

    qpack(dir.path()).assert().success();

    let pack = read_pack(&out);
    assert!(pack["queries"].is_object());
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn test_missing_input_fails_without_output() {
    let dir = TempDir::new().unwrap();

    qpack(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("rootkit_files.txt"));

    assert!(!dir.path().join("ossec-rootkit.conf").exists());
}

#[test]
fn test_missing_input_keeps_existing_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("ossec-rootkit.conf");
    fs::write(&out, "previous pack").unwrap();

    qpack(dir.path()).assert().failure();

    assert_eq!(fs::read_to_string(&out).unwrap(), "previous pack");
}

#[test]
fn test_unwritable_output_fails() {
    let dir = setup(SAMPLE_DB);

    qpack(dir.path())
        .arg("--output")
        .arg(dir.path().join("no_such_dir").join("pack.conf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write query pack"));
}

// ============================================================================
// Optional flags
// ============================================================================

#[test]
fn test_custom_input_output_and_interval() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("db.txt");
    let output = dir.path().join("pack.json");
    fs::write(&input, "usr/bin/x!Some Kit\n").unwrap();

    qpack(dir.path())
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--interval")
        .arg("600")
        .assert()
        .success();

    let pack = read_pack(&output);
    assert_eq!(pack["queries"]["some_kit"]["interval"], "600");
    assert!(!dir.path().join("ossec-rootkit.conf").exists());
}

#[test]
fn test_debug_flag_logs_to_stderr() {
    let dir = setup(SAMPLE_DB);

    qpack(dir.path())
        .arg("--debug")
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed rootkit database"));
}

#[test]
fn test_queries_follow_database_order() {
    let dir = setup("z!Zeta Kit\na!Alpha Kit\nz2!Zeta Kit\n");

    qpack(dir.path()).assert().success();

    let contents = fs::read_to_string(dir.path().join("ossec-rootkit.conf")).unwrap();
    let zeta = contents.find("\"zeta_kit\"").unwrap();
    let alpha = contents.find("\"alpha_kit\"").unwrap();
    assert!(zeta < alpha);
    assert!(contents.contains("select * from file where path in ('/z', '/z2');"));
}
