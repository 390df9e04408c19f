// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//! anyhow::Result at the command boundary
//!            |
//!   +--------+---------+
//!   v        v         v
//! Config  Translate  Launch
//!
//!   Config     InvalidValue, InvalidOverride
//!   Translate  MalformedPort, MissingRequired
//!   Launch     NoEntrypoint, EntrypointNotFound, ExecFailed, SpawnFailed, WaitFailed
//!
//! Fatal at the boundary:   EntrypointNotFound, MalformedPort, MissingRequired
//! Never fatal:             diagnostic stream failures (logged, not returned)
//! ```
//!
//! Library code returns the typed enums; `cmd` and `main` wrap them in
//! `anyhow` so callers can still `downcast_ref` to the concrete error.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A `--set` option that is not `section.key=value`.
    #[error("invalid option '{option}', expected section.key=value")]
    InvalidOverride { option: String },
}

// --- Translate Errors ---

/// Errors raised while resolving the host environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslateError {
    /// A host variable declared as a port is not a valid TCP port.
    #[error("malformed host variable {var}={value:?}: expected a port number in 1..=65535")]
    MalformedPort { var: String, value: String },

    /// A variable the wrapped application requires is absent or empty.
    #[error("required variable {var} is not set")]
    MissingRequired { var: String },
}

// --- Launch Errors ---

/// Errors raised while handing control to the wrapped entrypoint.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// No entrypoint was given on the command line or in the config.
    #[error("no entrypoint configured (pass PROGRAM or set launch.entrypoint)")]
    NoEntrypoint,

    /// The entrypoint path does not exist or is not on PATH.
    #[error("entrypoint not found: {}", path.display())]
    EntrypointNotFound { path: PathBuf },

    /// `execve` returned, so the process image was not replaced.
    #[error("failed to exec '{}': {source}", program.display())]
    ExecFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The child process could not be started.
    #[error("failed to spawn '{}': {source}", program.display())]
    SpawnFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child process failed.
    #[error("failed to wait for '{}': {source}", program.display())]
    WaitFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
