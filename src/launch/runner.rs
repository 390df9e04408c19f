// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exec and spawn-and-wait delegation.
//!
//! ```text
//! delegate(log_guard)
//!       |
//!   +---+--------------------+
//!   v                        v
//! Exec (unix)              Spawn
//! drop(log_guard)          register SIGTERM, SIGINT, SIGHUP, SIGQUIT
//! execve ---> app          tokio::process::Command
//! (returns only on error)  select! { wait, signal }
//!                          forward signal -> child
//!                          ChildExit
//! ```

use std::io;
use std::process::ExitStatus;

use tokio::process::Child;
use tracing::{debug, info, trace};

use super::builder::{ChildExit, PreparedLaunch};
use crate::config::types::LaunchMode;
use crate::error::LaunchError;
use crate::logging::LogGuard;

impl PreparedLaunch {
    /// Hands control to the entrypoint according to the launch mode.
    ///
    /// In exec mode this only returns on failure. `log_guard` is dropped
    /// before `execve` so pending file logs are flushed.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::ExecFailed`, `SpawnFailed` or `WaitFailed`.
    pub async fn delegate(self, log_guard: Option<LogGuard>) -> Result<ChildExit, LaunchError> {
        debug!(cmd = %self.command_line(), mode = %self.launch_mode(), "delegating");

        match self.launch_mode() {
            #[cfg(unix)]
            LaunchMode::Exec => {
                drop(log_guard);
                Err(self.exec())
            }
            #[cfg(not(unix))]
            LaunchMode::Exec => {
                tracing::warn!("exec is not available on this platform, spawning instead");
                let exit = self.spawn().await;
                drop(log_guard);
                exit
            }
            LaunchMode::Spawn => {
                let exit = self.spawn().await;
                drop(log_guard);
                exit
            }
        }
    }

    /// Replaces the current process image with the entrypoint.
    ///
    /// Returns only if `execve` failed.
    #[cfg(unix)]
    #[must_use]
    pub fn exec(self) -> LaunchError {
        use std::os::unix::process::CommandExt as _;

        let source = self.command().exec();
        LaunchError::ExecFailed {
            program: self.program().to_path_buf(),
            source,
        }
    }

    /// Spawns the entrypoint, forwards termination signals to it and waits.
    ///
    /// Signal handlers are installed before the child starts, so a signal
    /// that arrives right after spawning is still forwarded.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::SpawnFailed` if the child cannot start and
    /// `LaunchError::WaitFailed` if waiting or signal setup fails.
    pub async fn spawn(self) -> Result<ChildExit, LaunchError> {
        let program = self.program().to_path_buf();

        let mut signals = Signals::register().map_err(|source| LaunchError::WaitFailed {
            program: program.clone(),
            source,
        })?;

        let mut child = tokio::process::Command::from(self.command())
            .spawn()
            .map_err(|source| LaunchError::SpawnFailed {
                program: program.clone(),
                source,
            })?;
        trace!(pid = ?child.id(), "spawned");

        let status = supervise(&mut child, &mut signals)
            .await
            .map_err(|source| LaunchError::WaitFailed { program, source })?;

        let exit = ChildExit::from(status);
        debug!(code = ?exit.code(), signal = ?exit.signal(), "child exited");
        Ok(exit)
    }
}

/// Termination signals the supervisor forwards.
#[cfg(unix)]
struct Signals {
    terminate: tokio::signal::unix::Signal,
    interrupt: tokio::signal::unix::Signal,
    hangup: tokio::signal::unix::Signal,
    quit: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Signals {
    fn register() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            terminate: signal(SignalKind::terminate())?,
            interrupt: signal(SignalKind::interrupt())?,
            hangup: signal(SignalKind::hangup())?,
            quit: signal(SignalKind::quit())?,
        })
    }

    async fn recv(&mut self) -> nix::sys::signal::Signal {
        use nix::sys::signal::Signal;

        tokio::select! {
            _ = self.terminate.recv() => Signal::SIGTERM,
            _ = self.interrupt.recv() => Signal::SIGINT,
            _ = self.hangup.recv() => Signal::SIGHUP,
            _ = self.quit.recv() => Signal::SIGQUIT,
        }
    }
}

#[cfg(unix)]
async fn supervise(child: &mut Child, signals: &mut Signals) -> io::Result<ExitStatus> {
    loop {
        let received = tokio::select! {
            status = child.wait() => return status,
            received = signals.recv() => received,
        };
        forward_signal(child.id(), received);
    }
}

#[cfg(unix)]
fn forward_signal(pid: Option<u32>, received: nix::sys::signal::Signal) {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    let Some(pid) = pid.and_then(|p| i32::try_from(p).ok()) else {
        trace!(signal = %received, "child already reaped, signal dropped");
        return;
    };
    match kill(Pid::from_raw(pid), received) {
        Ok(()) => info!(signal = %received, pid, "forwarded signal to child"),
        Err(e) => tracing::warn!(signal = %received, pid, error = %e, "failed to forward signal"),
    }
}

#[cfg(not(unix))]
struct Signals {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(not(unix))]
impl Signals {
    fn register() -> io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }
}

#[cfg(not(unix))]
async fn supervise(child: &mut Child, signals: &mut Signals) -> io::Result<ExitStatus> {
    loop {
        tokio::select! {
            status = child.wait() => return status,
            _ = signals.ctrl_c.recv() => {
                // The console delivers Ctrl-C to the child as well.
                info!("interrupt received, waiting for child to exit");
            }
        }
    }
}
