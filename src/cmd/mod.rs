// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   exec, resolve, config (options / configs)
//! ```

pub mod config;
pub mod exec;
pub mod resolve;


use tracing::debug;

use crate::config::Config;
use crate::config::types::Precedence;
use crate::core::env::container::{Env, ResolvedEnv};
use crate::error::Result;
use crate::translate::Translator;

/// Translates `host` with the configured rules.
///
/// # Errors
///
/// Returns an error if the rule set is invalid or the host environment
/// cannot be translated.
pub fn resolve_host(
    config: &Config,
    host: &Env,
    precedence: Option<Precedence>,
) -> Result<ResolvedEnv> {
    let mut translator = Translator::from_config(config)?;
    if let Some(precedence) = precedence {
        translator = translator.with_precedence(precedence);
    }
    let resolved = translator.resolve(host)?;
    debug!(vars = resolved.len(), "host environment resolved");
    Ok(resolved)
}
