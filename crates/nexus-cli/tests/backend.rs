//! CLI integration tests against a real NexusMind backend.
//!
//! These tests are opt-in and require environment variables to be set:
//! - NEXUS_TEST_API: Backend base URL
//! - NEXUS_TEST_USERNAME: Test account username
//! - NEXUS_TEST_PASSWORD: Test account password
//!
//! Tests are skipped if these variables are not set.

mod common;

use tempfile::TempDir;

use common::{get_test_credentials, run_cli_with_env, run_cli_with_env_success};

#[test]
fn test_login_whoami_logout() {
    let Some((api, username, password)) = get_test_credentials() else {
        eprintln!("Skipping test_login_whoami_logout: NEXUS_TEST_* not set");
        return;
    };

    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path();

    let stdout = run_cli_with_env_success(
        &[
            "login",
            "--username",
            &username,
            "--password",
            &password,
        ],
        home,
        &api,
    );
    assert!(stdout.contains("Logged in successfully"));

    let stdout = run_cli_with_env_success(&["whoami"], home, &api);
    assert!(stdout.contains(&username));

    run_cli_with_env_success(&["logout"], home, &api);

    // The credential is gone; whoami fails without touching the backend.
    let output = run_cli_with_env(&["whoami"], home, &api);
    assert!(!output.status.success());
}

#[test]
fn test_files_listing() {
    let Some((api, username, password)) = get_test_credentials() else {
        eprintln!("Skipping test_files_listing: NEXUS_TEST_* not set");
        return;
    };

    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path();

    run_cli_with_env_success(
        &[
            "login",
            "--username",
            &username,
            "--password",
            &password,
        ],
        home,
        &api,
    );

    // Every line of output is one JSON object with the wire fields.
    let stdout = run_cli_with_env_success(&["files"], home, &api);
    for line in stdout.lines() {
        let file: serde_json::Value = serde_json::from_str(line).expect("invalid JSON line");
        assert!(file["id"].is_string());
        assert!(file["name"].is_string());
    }
}

#[test]
fn test_search_round_trip() {
    let Some((api, username, password)) = get_test_credentials() else {
        eprintln!("Skipping test_search_round_trip: NEXUS_TEST_* not set");
        return;
    };

    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path();

    run_cli_with_env_success(
        &[
            "login",
            "--username",
            &username,
            "--password",
            &password,
        ],
        home,
        &api,
    );

    let stdout = run_cli_with_env_success(&["search", "test", "--json"], home, &api);
    let items: serde_json::Value = serde_json::from_str(&stdout).expect("invalid JSON output");
    assert!(items.is_array());
}
