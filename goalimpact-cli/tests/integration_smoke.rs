//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the user's config and environment
fn goalimpact(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("goalimpact").unwrap();
    cmd.env("HOME", home.path())
        .current_dir(home.path())
        .env_remove("GOALIMPACT_API_URL")
        .env_remove("GOALIMPACT_SITE_URL")
        .env_remove("GOALIMPACT_DEBOUNCE_MS")
        .env_remove("GOALIMPACT_TIMEOUT_SECS");
    cmd
}

// === Search Command Tests ===

#[test]
fn test_search_help() {
    let home = TempDir::new().unwrap();
    let mut cmd = goalimpact(&home);
    cmd.arg("search").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Output format"));
}

#[test]
fn test_search_blank_query_fails() {
    let home = TempDir::new().unwrap();
    let mut cmd = goalimpact(&home);
    cmd.arg("search").arg("   ");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No query provided"));
}

#[test]
fn test_search_rejects_unknown_type() {
    let home = TempDir::new().unwrap();
    let mut cmd = goalimpact(&home);
    cmd.arg("search").arg("messi").arg("--type").arg("stadium");

    cmd.assert().failure();
}

// === Route Command Tests ===

#[test]
fn test_route_player() {
    let home = TempDir::new().unwrap();
    let mut cmd = goalimpact(&home);
    cmd.arg("route").arg("player").arg("7");

    cmd.assert().success().stdout("/players/7\n");
}

#[test]
fn test_route_competition_uses_leagues_path() {
    let home = TempDir::new().unwrap();
    let mut cmd = goalimpact(&home);
    cmd.arg("route").arg("competition").arg("12");

    cmd.assert().success().stdout("/leagues/12\n");
}

#[test]
fn test_route_url_uses_site_override() {
    let home = TempDir::new().unwrap();
    let mut cmd = goalimpact(&home);
    cmd.env("GOALIMPACT_SITE_URL", "https://staging.goalimpact.example")
        .arg("route")
        .arg("nation")
        .arg("3")
        .arg("--url");

    cmd.assert()
        .success()
        .stdout("https://staging.goalimpact.example/nations/3\n");
}

#[test]
fn test_route_url_keeps_site_base_path() {
    let home = TempDir::new().unwrap();
    let mut cmd = goalimpact(&home);
    cmd.env("GOALIMPACT_SITE_URL", "https://example.com/goal")
        .arg("route")
        .arg("competition")
        .arg("12")
        .arg("--url");

    cmd.assert()
        .success()
        .stdout("https://example.com/goal/leagues/12\n");
}

// === Config Command Tests ===

/// Write an unparsable config file under `home`
fn write_broken_config(home: &TempDir) {
    let dir = home.path().join(".goalimpact");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[search\n").unwrap();
}

#[test]
fn test_config_init_force_repairs_broken_file() {
    let home = TempDir::new().unwrap();
    write_broken_config(&home);

    goalimpact(&home)
        .arg("config")
        .arg("init")
        .arg("--force")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    goalimpact(&home)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("debounce_ms = 300"));
}

#[test]
fn test_config_path_works_with_broken_file() {
    let home = TempDir::new().unwrap();
    write_broken_config(&home);

    goalimpact(&home)
        .arg("config")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    goalimpact(&home)
        .arg("config")
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));

    goalimpact(&home)
        .arg("route")
        .arg("player")
        .arg("7")
        .assert()
        .failure();
}

#[test]
fn test_config_path_under_home() {
    let home = TempDir::new().unwrap();
    let mut cmd = goalimpact(&home);
    cmd.arg("config").arg("path");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(".goalimpact").and(predicate::str::contains("config.toml")));
}

#[test]
fn test_config_init_then_refuses_overwrite() {
    let home = TempDir::new().unwrap();

    goalimpact(&home)
        .arg("config")
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(home.path().join(".goalimpact/config.toml").exists());

    goalimpact(&home)
        .arg("config")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_config_show_reflects_env_override() {
    let home = TempDir::new().unwrap();
    let mut cmd = goalimpact(&home);
    cmd.env("GOALIMPACT_DEBOUNCE_MS", "450").arg("config").arg("show");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("debounce_ms = 450"));
}

// === TUI Command Tests ===

#[test]
fn test_tui_help() {
    let home = TempDir::new().unwrap();
    let mut cmd = goalimpact(&home);
    cmd.arg("tui").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--compare"));
}
