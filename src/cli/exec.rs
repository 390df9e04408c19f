// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the `exec` command.

use clap::Args;
use std::ffi::OsString;

use crate::config::types::Precedence;

/// Arguments for `envbridge exec`.
#[derive(Debug, Clone, Default, Args)]
pub struct ExecArgs {
    /// Skips the diagnostic listing.
    #[arg(long = "no-diagnostics")]
    pub no_diagnostics: bool,

    /// Spawns the program as a child instead of replacing this process.
    #[arg(long)]
    pub spawn: bool,

    /// Overrides the precedence of every translation rule.
    #[arg(long, value_name = "host|explicit")]
    pub precedence: Option<Precedence>,

    /// Program and arguments. Defaults to launch.entrypoint and launch.args.
    #[arg(
        value_name = "PROGRAM",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<OsString>,
}
