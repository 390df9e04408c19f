// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `resolve` command: print the resolved environment, never delegate.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::cli::resolve::{OutputFormat, ResolveArgs};
use crate::config::Config;
use crate::core::env::container::Env;
use crate::core::env::current_env;
use crate::diagnostics::{Emitter, UNSET, escape_value};
use crate::error::Result;

use super::resolve_host;

/// Runs the `resolve` command against the current process environment.
///
/// # Errors
///
/// Returns an error if translation fails or output cannot be serialized.
pub fn run_resolve_command(args: &ResolveArgs, config: &Config) -> Result<()> {
    let output = render_resolved(args, config, &current_env())?;
    println!("{output}");
    Ok(())
}

/// Renders the resolved view of `host`. Secret values are masked.
///
/// Without `--all` only the diagnostic keys appear; unset keys are
/// `(unset)` in text and `null` in JSON. Non UTF-8 names and values are
/// shown lossily. Text output escapes control characters.
///
/// # Errors
///
/// Returns an error if translation fails or output cannot be serialized.
pub fn render_resolved(args: &ResolveArgs, config: &Config, host: &Env) -> Result<String> {
    let resolved = resolve_host(config, host, args.precedence)?;
    let emitter = Emitter::from_config(config)?;

    let entries: Vec<(Cow<'_, str>, Option<Cow<'_, str>>)> = if args.all {
        resolved
            .iter_os()
            .map(|(k, v)| {
                let key = k.to_string_lossy();
                let value = emitter.mask(&key, v.to_string_lossy());
                (key, Some(value))
            })
            .collect()
    } else {
        emitter
            .keys()
            .iter()
            .map(|k| {
                let value = resolved.get_os(k).map(|v| v.to_string_lossy());
                (Cow::Borrowed(k.as_str()), value)
            })
            .collect()
    };

    let output = match args.format {
        OutputFormat::Text => entries
            .iter()
            .map(|(k, v)| {
                let value = v.as_deref().map_or(Cow::Borrowed(UNSET), escape_value);
                format!("{}={value}", escape_value(k))
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => {
            let map: BTreeMap<Cow<'_, str>, Option<Cow<'_, str>>> = entries.into_iter().collect();
            serde_json::to_string_pretty(&map)?
        }
    };
    Ok(output)
}
