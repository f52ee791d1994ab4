// CLI regression tests for pre-flight behavior: everything here must fail
// (or print help) before the runner ever touches a database server.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn sqltest() -> Command {
    Command::cargo_bin("sqltest").unwrap()
}

#[test]
fn help_documents_the_full_surface() {
    sqltest()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            contains("Usage")
                .and(contains("--db"))
                .and(contains("--setup"))
                .and(contains("--teardown"))
                .and(contains("--no-rm"))
                .and(contains("--approve"))
                .and(contains("--run")),
        );
}

#[test]
fn version_prints_the_tool_name() {
    sqltest()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("sqltest"));
}

#[test]
fn missing_positional_arguments_are_a_usage_error() {
    sqltest().assert().failure().stderr(contains("Usage"));
}

#[test]
fn unreadable_input_directory_is_fatal() {
    let expected = tempfile::tempdir().unwrap();
    sqltest()
        .arg("/nonexistent/sqltest-input")
        .arg(expected.path())
        .assert()
        .failure()
        .stderr(contains("input directory"));
}

#[test]
fn invalid_run_filter_is_fatal() {
    let dir_in = tempfile::tempdir().unwrap();
    let expected = tempfile::tempdir().unwrap();
    sqltest()
        .arg(dir_in.path())
        .arg(expected.path())
        .args(["--run", "("])
        .assert()
        .failure()
        .stderr(contains("invalid filter pattern"));
}

#[test]
fn invalid_approve_filter_is_fatal() {
    let dir_in = tempfile::tempdir().unwrap();
    let expected = tempfile::tempdir().unwrap();
    sqltest()
        .arg(dir_in.path())
        .arg(expected.path())
        .args(["--approve", "["])
        .assert()
        .failure()
        .stderr(contains("invalid filter pattern"));
}

#[test]
fn unparsable_database_uri_is_fatal() {
    let dir_in = tempfile::tempdir().unwrap();
    let expected = tempfile::tempdir().unwrap();
    sqltest()
        .arg(dir_in.path())
        .arg(expected.path())
        .args(["--db", "not a uri"])
        .assert()
        .failure()
        .stderr(contains("invalid database URI"));
}
