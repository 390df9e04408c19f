// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::core::env::container::ResolvedEnv;
use crate::error::LaunchError;

/// Locates the entrypoint the way a shell would.
///
/// A program with a directory component (`./run`, `/docker-entrypoint.sh`)
/// must exist as a file. A bare name is looked up on the `PATH` of the
/// resolved environment, not the shim's own.
///
/// # Errors
///
/// Returns `LaunchError::EntrypointNotFound` naming `program`.
pub fn resolve_entrypoint(program: &Path, env: &ResolvedEnv) -> Result<PathBuf, LaunchError> {
    let not_found = || LaunchError::EntrypointNotFound {
        path: program.to_path_buf(),
    };

    if program.as_os_str().is_empty() {
        return Err(not_found());
    }

    if program.is_absolute() || program.components().count() > 1 {
        return if program.is_file() {
            Ok(program.to_path_buf())
        } else {
            Err(not_found())
        };
    }

    let cwd = std::env::current_dir().unwrap_or_default();
    let found = which::which_in(program, env.get_os("PATH"), cwd).map_err(|_| not_found())?;
    trace!(program = %program.display(), resolved = %found.display(), "entrypoint found on PATH");
    Ok(found)
}
