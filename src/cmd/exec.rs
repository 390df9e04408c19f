// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `exec` command: translate → emit diagnostics → delegate.
//!
//! ```text
//! current_env() --> resolve_host() --> Emitter::emit(stderr)
//!                                            |
//!                                            v
//!                        Launcher::prepare() --> delegate()
//!                        (missing entrypoint     exec: no return
//!                         fails here)            spawn: child exit code
//! ```

use std::ffi::OsString;
use std::process::ExitCode;

use tracing::{debug, info};

use crate::cli::exec::ExecArgs;
use crate::config::Config;
use crate::config::types::LaunchMode;
use crate::core::env::container::{Env, ResolvedEnv};
use crate::core::env::current_env;
use crate::diagnostics::Emitter;
use crate::error::{LaunchError, Result};
use crate::launch::{Launcher, PreparedLaunch};
use crate::logging::LogGuard;

use super::resolve_host;

/// Runs the `exec` command against the current process environment.
///
/// # Errors
///
/// Returns an error for malformed host variables, missing required
/// variables, a missing entrypoint, or a failed exec/spawn.
pub async fn run_exec_command(
    args: &ExecArgs,
    config: &Config,
    log_guard: Option<LogGuard>,
) -> Result<ExitCode> {
    let host = current_env();
    let launch = prepare_exec(args, config, &host, &mut std::io::stderr())?;

    info!(program = %launch.program().display(), mode = %launch.launch_mode(), "handing over");
    let exit = launch.delegate(log_guard).await?;
    Ok(ExitCode::from(exit.exit_code()))
}

/// Everything up to delegation: resolve, print diagnostics, locate the
/// entrypoint.
///
/// # Errors
///
/// See [`run_exec_command`].
pub fn prepare_exec<W: std::io::Write>(
    args: &ExecArgs,
    config: &Config,
    host: &Env,
    diagnostics: &mut W,
) -> Result<PreparedLaunch> {
    let resolved = resolve_host(config, host, args.precedence)?;

    if args.no_diagnostics || !config.diagnostics.enabled {
        debug!("diagnostics disabled");
    } else {
        Emitter::from_config(config)?.emit(&resolved, diagnostics);
    }

    let mode = if args.spawn {
        LaunchMode::Spawn
    } else {
        config.launch.mode
    };

    Ok(launcher_for(args, config, resolved)?.mode(mode).prepare()?)
}

fn launcher_for(
    args: &ExecArgs,
    config: &Config,
    resolved: ResolvedEnv,
) -> std::result::Result<Launcher, LaunchError> {
    if let Some((program, rest)) = args.command.split_first() {
        return Ok(Launcher::new(program, resolved).args(rest));
    }

    let program = config
        .launch
        .entrypoint
        .as_ref()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(LaunchError::NoEntrypoint)?;
    Ok(Launcher::new(program, resolved).args(config.launch.args.iter().map(OsString::from)))
}
