//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_root_help_lists_commands() {
    let mut cmd = Command::cargo_bin("medstock").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("total"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("medstock").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--bind"))
        .stdout(predicate::str::contains("--backend"))
        .stdout(predicate::str::contains("--cors-permissive"));
}

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("medstock").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_total_memory_backend_is_zero() {
    let mut cmd = Command::cargo_bin("medstock").unwrap();
    cmd.env_remove("MEDSTOCK_BACKEND")
        .arg("total")
        .arg("--backend")
        .arg("memory")
        .arg("--json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"{"totalQuantity":0}"#));
}

#[test]
fn test_supabase_backend_requires_url() {
    let mut cmd = Command::cargo_bin("medstock").unwrap();
    cmd.env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_KEY")
        .current_dir(std::env::temp_dir())
        .arg("total")
        .arg("--backend")
        .arg("supabase");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("SUPABASE_URL not set"));
}

#[test]
fn test_rejects_unknown_backend() {
    let mut cmd = Command::cargo_bin("medstock").unwrap();
    cmd.arg("total").arg("--backend").arg("mysql");

    cmd.assert().failure();
}
