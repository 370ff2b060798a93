use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI binary with arguments.
pub fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nexus"));
    cmd.args(args);
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with a custom HOME directory for isolated session storage.
pub fn run_cli_with_env(args: &[&str], home: &Path, api: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nexus"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    if !args.contains(&"--api") {
        cmd.env("NEXUS_API", api);
    }
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with a custom HOME and expect success.
#[allow(dead_code)]
pub fn run_cli_with_env_success(args: &[&str], home: &Path, api: &str) -> String {
    let output = run_cli_with_env(args, home, api);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get test credentials from the environment.
/// Returns None if not set, causing backend tests to be skipped.
#[allow(dead_code)]
pub fn get_test_credentials() -> Option<(String, String, String)> {
    let api = std::env::var("NEXUS_TEST_API").ok()?;
    let username = std::env::var("NEXUS_TEST_USERNAME").ok()?;
    let password = std::env::var("NEXUS_TEST_PASSWORD").ok()?;
    Some((api, username, password))
}
