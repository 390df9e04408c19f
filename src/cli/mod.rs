// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for envbridge using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! envbridge [global options] <command>
//! exec [--no-diagnostics] [--spawn] [--] [PROGRAM [ARGS...]]
//! resolve [--format text|json] [--all]
//! options
//! configs
//! version
//! ```

pub mod exec;
pub mod global;
pub mod resolve;

#[cfg(test)]
mod tests;

use crate::cli::exec::ExecArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::resolve::ResolveArgs;
use clap::{Parser, Subcommand};

/// Runtime environment adapter.
///
/// Translates host-injected variables for a wrapped application, prints a
/// short diagnostic listing and hands control to the application.
#[derive(Debug, Parser)]
#[command(
    name = "envbridge",
    author,
    version,
    about = "Runtime environment adapter",
    long_about = "envbridge Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Maps the port a container platform injects (PORT) onto the\n\
                  variable the wrapped application reads (APP_PORT by default),\n\
                  prints the resolved values and then execs the application.\n\n\
                  Use it as the container entrypoint:\n\
                  `envbridge exec -- /docker-entrypoint.sh start`.",
    after_help = "CONFIG FILES:\n\n\
                  envbridge loads `envbridge.toml` from the current directory if it\n\
                  exists, then every --config file in order. ENVBRIDGE_<SECTION>__<KEY>\n\
                  variables and --set options override file values. Use\n\
                  --no-default-configs to skip `envbridge.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the config files that were loaded.
    Configs,

    /// Translates the environment, prints diagnostics and delegates.
    Exec(ExecArgs),

    /// Prints the resolved environment without delegating.
    Resolve(ResolveArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}
