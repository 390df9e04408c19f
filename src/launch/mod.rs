// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Delegation to the wrapped application's entrypoint.
//!
//! ```text
//! Launcher::new(program, ResolvedEnv)
//!   .args() .mode()
//!   .prepare()           entrypoint lookup (path or resolved PATH)
//!       |                missing -> EntrypointNotFound
//!       v
//!   PreparedLaunch
//!   .delegate(log_guard)
//!     Exec  (unix)  -> execve, never returns on success
//!     Spawn         -> tokio child, forward SIGTERM/SIGINT/SIGHUP/SIGQUIT
//!                      -> ChildExit { code | 128 + signal }
//! ```
//!
//! The wrapped process sees exactly the resolved environment: the inherited
//! one is cleared first.

pub mod builder;
mod entrypoint;
mod runner;

pub use builder::{ChildExit, Launcher, PreparedLaunch};
pub use entrypoint::resolve_entrypoint;
