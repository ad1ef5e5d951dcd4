use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn feedwatch_cmd() -> Command {
    Command::cargo_bin("feedwatch").unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    feedwatch_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("items"))
        .stdout(predicate::str::contains("translate"));
}

#[test]
fn test_run_help_shows_dry_run_flag() {
    feedwatch_cmd()
        .arg("run")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_items_help_shows_limit_flag() {
    feedwatch_cmd()
        .arg("items")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--limit"));
}

#[test]
fn test_missing_feeds_env_fails_with_hint() {
    feedwatch_cmd()
        .arg("run")
        .env_remove("FEEDWATCH_FEEDS")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FEEDWATCH_FEEDS"));
}

#[test]
fn test_invalid_feed_url_is_rejected() {
    feedwatch_cmd()
        .arg("run")
        .env("FEEDWATCH_FEEDS", "not a url")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid feed URL"));
}

#[test]
fn test_run_with_unreachable_feed_reports_failed_run() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    // The run itself degrades to a zero-dispatch report; the process exits
    // cleanly so the periodic trigger does not alert.
    feedwatch_cmd()
        .arg("run")
        .env("FEEDWATCH_FEEDS", "http://127.0.0.1:1/feed")
        .env("FEEDWATCH_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("no items fetched from any feed"));
}

#[test]
fn test_dry_run_with_unreachable_feed_pushes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    feedwatch_cmd()
        .arg("run")
        .arg("--dry-run")
        .env("FEEDWATCH_FEEDS", "http://127.0.0.1:1/feed")
        .env("FEEDWATCH_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to push."));
}

#[test]
fn test_items_with_unreachable_feed_prints_empty() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    feedwatch_cmd()
        .arg("items")
        .env("FEEDWATCH_FEEDS", "http://127.0.0.1:1/feed")
        .env("FEEDWATCH_DB_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("No items fetched."));
}
