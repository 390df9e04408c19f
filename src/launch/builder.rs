// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Launcher builder and the prepared launch it produces.
//!
//! ```text
//! Launcher
//!  • new(program, env) / arg / args / mode
//!  • prepare() -> PreparedLaunch (entrypoint resolved)
//!
//! PreparedLaunch
//!  • program / args / env / command_line
//!  • delegate(), exec() (unix), spawn()
//! ```

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use crate::config::types::LaunchMode;
use crate::core::env::container::ResolvedEnv;
use crate::error::LaunchError;

use super::entrypoint::resolve_entrypoint;

/// Builder for handing control to the wrapped entrypoint.
#[derive(Debug, Clone)]
pub struct Launcher {
    program: PathBuf,
    args: Vec<OsString>,
    env: ResolvedEnv,
    mode: LaunchMode,
}

impl Launcher {
    /// Creates a launcher for `program` with the resolved environment.
    pub fn new(program: impl AsRef<OsStr>, env: ResolvedEnv) -> Self {
        Self {
            program: PathBuf::from(program.as_ref()),
            args: Vec::new(),
            env,
            mode: LaunchMode::default(),
        }
    }

    /// Adds an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Adds multiple arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    #[must_use]
    pub const fn mode(mut self, mode: LaunchMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub const fn launch_mode(&self) -> LaunchMode {
        self.mode
    }

    /// Resolves the entrypoint without starting anything.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::EntrypointNotFound` if the program does not exist
    /// or is not on the resolved `PATH`.
    pub fn prepare(self) -> Result<PreparedLaunch, LaunchError> {
        let resolved = resolve_entrypoint(&self.program, &self.env)?;
        Ok(PreparedLaunch {
            program: resolved,
            invoked_as: self.program.into_os_string(),
            args: self.args,
            env: self.env,
            mode: self.mode,
        })
    }
}

/// A launch whose entrypoint is known to exist.
#[derive(Debug, Clone)]
pub struct PreparedLaunch {
    program: PathBuf,
    /// Program name as given by the caller; `argv[0]` on Unix.
    #[cfg_attr(not(unix), allow(dead_code))]
    invoked_as: OsString,
    args: Vec<OsString>,
    env: ResolvedEnv,
    mode: LaunchMode,
}

impl PreparedLaunch {
    /// Absolute or relative path of the executable that will run.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    #[must_use]
    pub const fn env(&self) -> &ResolvedEnv {
        &self.env
    }

    #[must_use]
    pub const fn launch_mode(&self) -> LaunchMode {
        self.mode
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program.display());
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Builds the std command: cleared environment, resolved variables
    /// (raw ones byte for byte), inherited stdio. `argv[0]` is the program
    /// name as the caller gave it.
    pub(super) fn command(&self) -> std::process::Command {
        let mut command = std::process::Command::new(&self.program);
        command
            .args(&self.args)
            .env_clear()
            .envs(self.env.iter_os());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt as _;
            command.arg0(&self.invoked_as);
        }

        command
    }
}

/// How the wrapped application ended (spawn mode only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildExit {
    code: Option<i32>,
    signal: Option<i32>,
}

impl ChildExit {
    #[must_use]
    pub const fn new(code: Option<i32>, signal: Option<i32>) -> Self {
        Self { code, signal }
    }

    /// Exit code, if the child exited normally.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        self.code
    }

    /// Terminating signal, if the child was killed by one.
    #[must_use]
    pub const fn signal(&self) -> Option<i32> {
        self.signal
    }

    /// Exit code for the shim: the child's code, or `128 + signal` if it was
    /// killed. A code outside `0..=255` becomes `1`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match (self.code, self.signal) {
            (_, Some(signal)) => u8::try_from(128 + signal).unwrap_or(u8::MAX),
            (Some(code), None) => u8::try_from(code).unwrap_or(1),
            (None, None) => 1,
        }
    }
}

impl From<ExitStatus> for ChildExit {
    fn from(status: ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt as _;
            status.signal()
        };
        #[cfg(not(unix))]
        let signal = None;

        Self::new(status.code(), signal)
    }
}
