// Regression tests for the CLI surface: exit codes, diagnostics, list mode.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::{contains, is_empty};
use tempfile::TempDir;

fn proba() -> Command {
    Command::cargo_bin("proba").unwrap()
}

#[test]
fn conflicting_only_flags_exit_with_config_code() {
    proba()
        .args(["--parse-only", "--int-only"])
        .assert()
        .code(10)
        .stderr(contains("mutually exclusive").or(contains("conflicting")));
}

#[test]
fn parse_only_with_int_script_is_rejected_before_any_test() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("case.src"), b"").unwrap();

    proba()
        .arg("--directory")
        .arg(dir.path())
        .args(["--parse-only", "--int-script", "whatever"])
        .assert()
        .code(10)
        .stdout(is_empty());
}

#[test]
fn invalid_directory_exits_41() {
    proba()
        .args(["--directory", "no/such/dir"])
        .assert()
        .code(41)
        .stderr(contains("does not exist"));
}

#[test]
fn list_prints_discovered_bases_without_running() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("alpha.src"), b"").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/beta.out"), b"").unwrap();

    let canonical = dir.path().canonicalize().unwrap();
    proba()
        .arg("--directory")
        .arg(dir.path())
        .arg("--recursive")
        .arg("--list")
        .assert()
        .success()
        .stdout(contains(canonical.join("alpha").display().to_string()))
        .stdout(contains(canonical.join("sub/beta").display().to_string()));

    // listing must not seed missing siblings
    assert!(!dir.path().join("alpha.in").exists());
    assert!(!dir.path().join("sub/beta.src").exists());
}

#[cfg(unix)]
mod end_to_end {
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    use super::*;

    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    struct Suite {
        _dir: TempDir,
        suite: PathBuf,
        parser: PathBuf,
        interpreter: PathBuf,
    }

    /// Parser uppercases; interpreter passes its stdin through.
    fn passing_suite() -> Suite {
        let dir = TempDir::new().unwrap();
        let suite = dir.path().join("suite");
        fs::create_dir(&suite).unwrap();
        fs::write(suite.join("case.src"), b"hi").unwrap();
        fs::write(suite.join("case.out"), b"HI").unwrap();
        let parser = script(dir.path(), "parser", "tr a-z A-Z");
        let interpreter = script(dir.path(), "interpreter", "cat");
        Suite {
            _dir: dir,
            suite,
            parser,
            interpreter,
        }
    }

    fn run(suite: &Suite) -> Command {
        let mut cmd = proba();
        cmd.arg("--directory")
            .arg(&suite.suite)
            .arg("--parse-script")
            .arg(&suite.parser)
            .arg("--int-script")
            .arg(&suite.interpreter);
        cmd
    }

    #[test]
    fn full_run_reports_pass_and_exits_zero() {
        let suite = passing_suite();
        run(&suite)
            .assert()
            .success()
            .stdout(contains("PASS").and(contains("Passed 1 of 1 tests")));
    }

    #[test]
    fn failing_test_still_exits_zero() {
        let suite = passing_suite();
        fs::write(suite.suite.join("case.out"), b"WRONG").unwrap();

        run(&suite)
            .assert()
            .success()
            .stdout(contains("FAIL").and(contains("Passed 0 of 1 tests")))
            .stderr(contains("Failed tests:"));
    }

    #[test]
    fn html_report_is_written_to_out_file() {
        let suite = passing_suite();
        let out = suite.suite.join("report.html");

        run(&suite)
            .args(["--report", "html"])
            .arg("--out")
            .arg(&out)
            .assert()
            .success();

        let html = fs::read_to_string(&out).unwrap();
        assert!(html.contains("<table>"));
        assert!(html.contains("Passed 1 of 1 tests"));
    }

    #[test]
    fn json_report_round_trips() {
        let suite = passing_suite();
        let output = run(&suite).args(["--report", "json"]).output().unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["passed"], 1);
        assert_eq!(value["reports"][0]["output_status"], "OK");
    }
}
