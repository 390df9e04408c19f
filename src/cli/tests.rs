// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::resolve::OutputFormat;
use crate::cli::{Cli, Command};
use crate::config::types::Precedence;
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["envbridge", "version"]).unwrap();
    insta::assert_debug_snapshot!(cli, @r"
    Cli {
        global: GlobalOptions {
            configs: [],
            log_level: None,
            file_log_level: None,
            log_file: None,
            options: [],
            no_default_configs: false,
        },
        command: Some(
            Version,
        ),
    }
    ");
}

#[test]
fn test_parse_exec_trailing_command() {
    let cli = Cli::try_parse_from([
        "envbridge",
        "exec",
        "--spawn",
        "/docker-entrypoint.sh",
        "start",
        "--tunnel",
        "-v",
    ])
    .unwrap();
    let Some(Command::Exec(args)) = cli.command else {
        panic!("expected exec");
    };
    assert!(args.spawn);
    assert!(!args.no_diagnostics);
    assert_eq!(
        args.command,
        ["/docker-entrypoint.sh", "start", "--tunnel", "-v"]
    );
}

#[test]
fn test_parse_exec_double_dash() {
    let cli = Cli::try_parse_from([
        "envbridge",
        "exec",
        "--no-diagnostics",
        "--",
        "n8n",
        "--help",
    ])
    .unwrap();
    let Some(Command::Exec(args)) = cli.command else {
        panic!("expected exec");
    };
    assert!(args.no_diagnostics);
    assert_eq!(args.command, ["n8n", "--help"]);
}

#[test]
fn test_parse_exec_without_program() {
    let cli = Cli::try_parse_from(["envbridge", "exec"]).unwrap();
    let Some(Command::Exec(args)) = cli.command else {
        panic!("expected exec");
    };
    assert!(args.command.is_empty());
}

#[test]
fn test_parse_precedence() {
    let cli = Cli::try_parse_from(["envbridge", "exec", "--precedence", "explicit", "sh"]).unwrap();
    let Some(Command::Exec(args)) = cli.command else {
        panic!("expected exec");
    };
    assert_eq!(args.precedence, Some(Precedence::Explicit));

    assert!(Cli::try_parse_from(["envbridge", "exec", "--precedence", "guest", "sh"]).is_err());
}

#[test]
fn test_parse_resolve() {
    let cli = Cli::try_parse_from(["envbridge", "resolve", "--format", "json", "--all"]).unwrap();
    let Some(Command::Resolve(args)) = cli.command else {
        panic!("expected resolve");
    };
    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.all);
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "envbridge",
        "-l",
        "4",
        "-c",
        "/etc/envbridge.toml",
        "-s",
        "launch.mode=spawn",
        "--no-default-configs",
        "resolve",
    ])
    .unwrap();
    assert_eq!(cli.global.log_level, Some(4));
    assert!(cli.global.no_default_configs);
    insta::assert_debug_snapshot!(cli.global.to_config_overrides(), @r#"
    [
        "launch.mode=spawn",
        "global.output_log_level=4",
        "global.file_log_level=4",
    ]
    "#);
}

#[test]
fn test_parse_rejects_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["envbridge", "-l", "7", "version"]).is_err());
}
