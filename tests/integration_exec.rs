// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end tests of the `envbridge` binary.
//!
//! Every run starts from a cleared environment so the host's own
//! variables cannot leak into assertions.

#![cfg(unix)]

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt as _;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::time::Duration;

fn envbridge(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_envbridge"));
    cmd.env_clear()
        .env("PATH", "/usr/bin:/bin")
        .current_dir(dir)
        .arg("--no-default-configs");
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// =============================================================================
// Translation
// =============================================================================

#[test]
fn exec_translates_port() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path()).env("PORT", "8080").args([
        "exec",
        "--",
        "/bin/sh",
        "-c",
        "printf %s \"$APP_PORT\"",
    ]));

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "8080");
    assert!(stderr(&output).contains("APP_PORT: 8080"));
}

#[test]
fn exec_without_port_proceeds() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path()).args([
        "exec",
        "--",
        "/bin/sh",
        "-c",
        "printf %s \"${APP_PORT-absent}\"",
    ]));

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "absent");
    assert!(stderr(&output).contains("APP_PORT: (unset)"));
}

#[test]
fn exec_empty_port_counts_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path()).env("PORT", "").args([
        "exec",
        "--",
        "/bin/sh",
        "-c",
        "printf %s \"${APP_PORT-absent}\"",
    ]));

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "absent");
}

#[test]
fn exec_malformed_port_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path()).env("PORT", "abc").args([
        "exec", "--", "/bin/sh", "-c", "echo ran",
    ]));

    assert!(!output.status.success());
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("PORT=\"abc\""), "{}", stderr(&output));
}

#[test]
fn exec_precedence_override() {
    let dir = tempfile::tempdir().unwrap();
    let script = "printf %s \"$APP_PORT\"";

    let host = run(envbridge(dir.path())
        .env("PORT", "8080")
        .env("APP_PORT", "5678")
        .args(["exec", "--", "/bin/sh", "-c", script]));
    assert_eq!(stdout(&host), "8080");

    let explicit = run(envbridge(dir.path())
        .env("PORT", "8080")
        .env("APP_PORT", "5678")
        .args(["exec", "--precedence", "explicit", "--", "/bin/sh", "-c", script]));
    assert_eq!(stdout(&explicit), "5678");
}

#[test]
fn exec_passes_unrelated_variables() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path())
        .env("WEBHOOK_URL", "https://example.invalid/")
        .args(["exec", "--", "/bin/sh", "-c", "printf %s \"$WEBHOOK_URL\""]));
    assert_eq!(stdout(&output), "https://example.invalid/");
}

#[test]
fn exec_passes_non_utf8_values_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path())
        .env("PORT", "8080")
        .env("DB_HOST", OsStr::from_bytes(b"caf\xe9"))
        .args(["exec", "--", "/bin/sh", "-c", "printf %s \"$DB_HOST\""]));

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(output.stdout, b"caf\xe9");
}

#[test]
fn exec_passes_non_utf8_names_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path())
        .env(OsStr::from_bytes(b"LEGACY_\xff"), OsStr::from_bytes(b"\xfe"))
        .args(["exec", "--", "/usr/bin/env"]));

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(
        output
            .stdout
            .split(|b| *b == b'\n')
            .any(|line| line == b"LEGACY_\xff=\xfe"),
        "{}",
        stdout(&output)
    );
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn diagnostics_never_print_secrets() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bridge.toml");
    std::fs::write(
        &config,
        "[diagnostics]\nkeys = [\"APP_PORT\", \"N8N_ENCRYPTION_KEY\", \"DB_PASSWORD\"]\n",
    )
    .unwrap();

    let output = run(envbridge(dir.path())
        .env("PORT", "8080")
        .env("N8N_ENCRYPTION_KEY", "abc123")
        .env("DB_PASSWORD", "hunter2")
        .arg("-c")
        .arg(&config)
        .args(["exec", "--", "/bin/sh", "-c", "exit 0"]));

    let err = stderr(&output);
    assert!(output.status.success(), "{err}");
    assert!(err.contains("APP_PORT: 8080"));
    assert!(!err.contains("abc123"));
    assert!(!err.contains("hunter2"));
}

#[test]
fn diagnostics_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path()).env("PORT", "8080").args([
        "exec",
        "--no-diagnostics",
        "--",
        "/bin/sh",
        "-c",
        "exit 0",
    ]));
    assert!(output.status.success());
    assert_eq!(stderr(&output), "");
}

// =============================================================================
// Delegation
// =============================================================================

#[test]
fn exec_exit_code_is_transparent() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path()).args(["exec", "--", "/bin/sh", "-c", "exit 7"]));
    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn spawn_exit_code_is_transparent() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path()).args([
        "exec", "--spawn", "--", "/bin/sh", "-c", "exit 3",
    ]));
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn exec_replaces_the_process() {
    let dir = tempfile::tempdir().unwrap();
    let child = envbridge(dir.path())
        .args(["exec", "--", "/bin/sh", "-c", "echo $$"])
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    let pid = child.id();
    let output = child.wait_with_output().unwrap();

    assert_eq!(stdout(&output).trim(), pid.to_string());
}

#[test]
fn spawn_runs_a_child_process() {
    let dir = tempfile::tempdir().unwrap();
    let child = envbridge(dir.path())
        .args(["exec", "--spawn", "--", "/bin/sh", "-c", "echo $$"])
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    let pid = child.id();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_ne!(stdout(&output).trim(), pid.to_string());
}

#[test]
fn exec_missing_entrypoint_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path()).args(["exec", "--", "/nonexistent/docker-entrypoint.sh"]));

    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("/nonexistent/docker-entrypoint.sh"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn exec_uses_configured_entrypoint() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bridge.toml");
    std::fs::write(
        &config,
        "[launch]\nentrypoint = \"/bin/sh\"\nargs = [\"-c\", \"exit 5\"]\n",
    )
    .unwrap();

    let output = run(envbridge(dir.path()).arg("-c").arg(&config).arg("exec"));
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn exec_without_entrypoint_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path()).arg("exec"));
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no entrypoint"), "{}", stderr(&output));
}

#[test]
fn spawn_forwards_sigterm() {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let dir = tempfile::tempdir().unwrap();
    let child = envbridge(dir.path())
        .args([
            "exec",
            "--spawn",
            "--",
            "/bin/sh",
            "-c",
            "trap 'exit 42' TERM; while :; do sleep 0.1; done",
        ])
        .spawn()
        .unwrap();

    std::thread::sleep(Duration::from_secs(1));
    let pid = Pid::from_raw(i32::try_from(child.id()).unwrap());
    kill(pid, Signal::SIGTERM).unwrap();

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(42));
}

#[test]
fn spawn_forwards_sigterm_sent_right_after_start() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path()).args([
        "exec",
        "--spawn",
        "--",
        "/bin/sh",
        "-c",
        "trap 'exit 42' TERM; kill -TERM $PPID; while :; do sleep 0.1; done",
    ]));
    assert_eq!(output.status.code(), Some(42), "{}", stderr(&output));
}

// =============================================================================
// Other commands
// =============================================================================

#[test]
fn resolve_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path())
        .env("PORT", "8080")
        .args(["resolve", "--format", "json"]));

    assert!(output.status.success(), "{}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value, serde_json::json!({ "APP_PORT": "8080" }));
}

#[test]
fn default_config_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("envbridge.toml"),
        "[[translate.rules]]\nsource = \"PORT\"\ntarget = \"N8N_PORT\"\n",
    )
    .unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_envbridge"));
    let output = run(cmd
        .env_clear()
        .env("PORT", "8080")
        .current_dir(dir.path())
        .arg("resolve"));

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "N8N_PORT=8080");
}

#[test]
fn env_prefix_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path())
        .env("ENVBRIDGE_DIAGNOSTICS__ENABLED", "false")
        .env("PORT", "8080")
        .args(["exec", "--", "/bin/sh", "-c", "exit 0"]));

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stderr(&output), "");
}

#[test]
fn version_prints_package_version() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(envbridge(dir.path()).arg("version"));
    assert_eq!(stdout(&output).trim(), env!("CARGO_PKG_VERSION"));
}
