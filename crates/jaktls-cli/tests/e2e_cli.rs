//! E2E tests for the jaktls CLI.
//!
//! These tests spawn the actual binary and verify exit codes and output.
//! Each run gets an empty config directory and a clean environment so a
//! developer's own setup cannot leak in.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_cli(args: &[&str], config_home: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jaktls"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env("NO_COLOR", "1")
        .env_remove("JAKTLS_COMPILER")
        .env_remove("JAKTLS_LOG")
        .env_remove("JAKTLS_CONFIG")
        .output()
        .expect("Failed to execute CLI binary")
}

fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_str(output: &Output) -> String {
    console::strip_ansi_codes(&String::from_utf8_lossy(&output.stderr)).to_string()
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

// =============================================================================
// Help
// =============================================================================

#[test]
fn e2e_cli_help_shows_usage() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["--help"], dir.path());

    assert!(output.status.success(), "help should exit 0");
    let stdout = stdout_str(&output);
    assert!(stdout.contains("jaktls"));
    assert!(stdout.contains("--compiler"));
    assert!(stdout.contains("inspect"));
}

#[test]
fn e2e_cli_version() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["--version"], dir.path());

    assert!(output.status.success());
    assert!(stdout_str(&output).contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Compiler check
// =============================================================================

#[test]
fn e2e_cli_missing_compiler_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope").join("jakt");
    let output = run_cli(&["-C", missing.to_str().unwrap()], dir.path());

    assert!(!output.status.success());
    let stderr = stderr_str(&output);
    assert!(stderr.contains("Checking compiler path:"), "{stderr}");
    assert!(stderr.contains("ERROR"), "{stderr}");
    assert!(stderr.contains("can't find compiler binary"), "{stderr}");
}

#[test]
fn e2e_cli_directory_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["--compiler", dir.path().to_str().unwrap()], dir.path());

    assert!(!output.status.success());
    assert!(stderr_str(&output).contains("must be a normal executable file"));
}

#[test]
fn e2e_cli_compiler_from_environment() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_jaktls"))
        .env("XDG_CONFIG_HOME", dir.path())
        .env("JAKTLS_COMPILER", dir.path().join("env-jakt"))
        .env_remove("JAKTLS_LOG")
        .env_remove("JAKTLS_CONFIG")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr_str(&output).contains("env-jakt"));
}

#[test]
fn e2e_cli_bad_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.toml", "compiler = 3\n");
    let output = run_cli(&["--config", &config], dir.path());

    assert!(!output.status.success());
    let stderr = stderr_str(&output);
    assert!(stderr.contains("invalid config"), "{stderr}");
    assert!(stderr.contains("config.toml"), "{stderr}");
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn compiler(dir: &TempDir, mode: u32) -> String {
        let path = write_file(dir, "jakt", "#!/bin/sh\nexit 0\n");
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn e2e_cli_usable_compiler_passes() {
        let dir = TempDir::new().unwrap();
        let path = compiler(&dir, 0o755);
        let output = run_cli(&["-C", &path], dir.path());

        assert!(output.status.success(), "{}", stderr_str(&output));
        let stderr = stderr_str(&output);
        assert!(stderr.contains(&format!("Checking compiler path: \"{path}\"")), "{stderr}");
        assert!(stderr.contains("OK"), "{stderr}");
    }

    #[test]
    fn e2e_cli_private_compiler_fails() {
        let dir = TempDir::new().unwrap();
        let path = compiler(&dir, 0o700);
        let output = run_cli(&["-C", &path], dir.path());

        assert!(!output.status.success());
        assert!(stderr_str(&output).contains("cannot use compiler binary due to permissions"));
    }

    #[test]
    fn e2e_cli_config_file_supplies_compiler() {
        let dir = TempDir::new().unwrap();
        let path = compiler(&dir, 0o755);
        let config = write_file(&dir, "jaktls.toml", &format!("compiler = {path:?}\n"));
        let output = run_cli(&["--config", &config], dir.path());

        assert!(output.status.success(), "{}", stderr_str(&output));
    }
}

// =============================================================================
// Inspect
// =============================================================================

#[test]
fn e2e_cli_inspect_request() {
    let dir = TempDir::new().unwrap();
    let file = write_file(
        &dir,
        "req.json",
        r#"{"jsonrpc":"2.0","id":"a","method":"textDocument/hover","params":{"x":1},"extra":null}"#,
    );
    let output = run_cli(&["inspect", &file], dir.path());

    assert!(output.status.success(), "{}", stderr_str(&output));
    let stdout = stdout_str(&output);
    assert!(stdout.contains("kind:     request"), "{stdout}");
    assert!(stdout.contains("method:   textDocument/hover"), "{stdout}");
    assert!(stdout.contains("id:       a"), "{stdout}");
    assert!(stdout.contains("leftover: extra"), "{stdout}");
    assert!(stdout.contains(r#"{"jsonrpc":"2.0","id":"a","method":"textDocument\/hover","params":{"x":1}}"#));
}

#[test]
fn e2e_cli_inspect_rejects_invalid_json() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "bad.json", r#"{"jsonrpc":"2.0",}x"#);
    let output = run_cli(&["inspect", &file], dir.path());

    assert!(!output.status.success());
    assert!(stderr_str(&output).contains("not valid JSON"));
}

#[test]
fn e2e_cli_inspect_rejects_responses() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "resp.json", r#"{"jsonrpc":"2.0","id":1,"result":{}}"#);
    let output = run_cli(&["inspect", &file], dir.path());

    assert!(!output.status.success());
    assert!(stderr_str(&output).contains("invalid message"));
}

#[test]
fn e2e_cli_inspect_verbose_logs_rejection() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "bad-id.json", r#"{"jsonrpc":"2.0","id":1.5,"method":"m"}"#);
    let output = run_cli(&["-vv", "inspect", &file], dir.path());

    assert!(!output.status.success());
    let stderr = stderr_str(&output);
    assert!(stderr.contains("DEBUG jaktls::protocol: RequestMessage rejected"), "{stderr}");
}
