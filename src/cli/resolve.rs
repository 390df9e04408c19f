// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the `resolve` command.

use clap::{Args, ValueEnum};

use crate::config::types::Precedence;

/// Output format for `resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `KEY=value` lines.
    #[default]
    Text,
    /// A JSON object.
    Json,
}

/// Arguments for `envbridge resolve`.
#[derive(Debug, Clone, Default, Args)]
pub struct ResolveArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Lists every resolved variable instead of the diagnostic keys.
    /// Secret values are shown as [hidden].
    #[arg(long)]
    pub all: bool,

    /// Overrides the precedence of every translation rule.
    #[arg(long, value_name = "host|explicit")]
    pub precedence: Option<Precedence>,
}
