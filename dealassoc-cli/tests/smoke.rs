//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn dealassoc() -> Command {
    let mut cmd = Command::cargo_bin("dealassoc").unwrap();
    cmd.env_remove("DATABASE_URL").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    dealassoc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    dealassoc()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--in-memory"));
}

#[test]
fn test_migrate_without_database_url_fails() {
    dealassoc()
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_serve_without_database_url_fails() {
    dealassoc()
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_serve_in_memory_ignores_database_url() {
    // 192.0.2.1 (TEST-NET-1) is never a local address, so binding fails fast
    // after storage selection instead of serving forever.
    dealassoc()
        .env("DATABASE_URL", "postgres://localhost/unreachable")
        .args(["serve", "--in-memory", "--bind", "192.0.2.1:3030"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Server error"))
        .stderr(predicate::str::contains("cannot be used with").not())
        .stderr(predicate::str::contains("database pool").not());
}
