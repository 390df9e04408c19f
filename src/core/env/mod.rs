// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable management.
//!
//! # Architecture
//!
//! ```text
//! Env (copy-on-write BTreeMap<EnvKey, String>)
//! Sources: current_env(), Env::from_map(), FromIterator
//! Ops: set/get/get_non_empty/remove/iter, set_os/get_os/iter_os for raw entries
//! ResolvedEnv: frozen Env handed to the launcher
//! ```
//!
//! - **Case-insensitive on Windows**
//! - **Copy-on-write**: Clones share data until modified
//! - **UTF-8 internal**: entries that are not UTF-8 stay raw `OsString`s

pub mod container;
pub mod types;


use tracing::debug;

/// Captures the current process environment.
///
/// This is the only place the process-global environment is read. Entries
/// that are not valid UTF-8 are kept as raw bytes and passed on unchanged.
#[must_use]
pub fn current_env() -> container::Env {
    let mut env = container::Env::new();
    for (key, value) in std::env::vars_os() {
        env.insert_os(key, value);
    }
    if env.raw_len() > 0 {
        debug!(count = env.raw_len(), "non UTF-8 environment entries kept verbatim");
    }
    env
}
