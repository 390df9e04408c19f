// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Exec | Resolve | Options | Configs | Version
//! ```

use std::process::ExitCode;

use envbridge::cli::global::GlobalOptions;
use envbridge::cli::{self, Command};
use envbridge::cmd::config::{run_configs_command, run_options_command};
use envbridge::cmd::exec::run_exec_command;
use envbridge::cmd::resolve::run_resolve_command;
use envbridge::config::loader::ConfigLoader;
use envbridge::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use envbridge::logging::{LogConfig, LogGuard, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if let Some(Command::Version) = cli.command {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let loader = match build_config_loader(&cli.global) {
        Ok(loader) => loader,
        Err(e) => return report(&e),
    };
    let loaded = loader.format_loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => return report(&e.context("failed to load config")),
    };

    let log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => return report(&e),
    };

    dispatch_command(&cli, &config, &loaded, log_guard).await
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .with_log_file(config.global.log_file.clone())
        .build()
}

async fn dispatch_command(
    cli: &cli::Cli,
    config: &Config,
    loaded: &[String],
    log_guard: LogGuard,
) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Exec(args)) => run_exec_command(args, config, Some(log_guard)).await,
        Some(Command::Resolve(args)) => {
            run_resolve_command(args, config).map(|()| ExitCode::SUCCESS)
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Configs) => {
            run_configs_command(loaded);
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Version) => {
            handle_version_command();
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("no command specified"))
        }
    };

    result.unwrap_or_else(|e| report(&e))
}

fn report(e: &anyhow::Error) -> ExitCode {
    eprintln!("envbridge: error: {e:#}");
    ExitCode::FAILURE
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> envbridge::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_configs {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for option in global.to_config_overrides() {
        loader = loader.set_str(&option)?;
    }
    Ok(loader)
}
