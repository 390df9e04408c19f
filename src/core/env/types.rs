// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Key type for environment variable management.
//!
//! ```text
//! EnvKey: case-insensitive on Windows (PATH == Path == path)
//!         case-sensitive elsewhere    (PORT != port)
//! Ordering follows the same folding, so BTreeMap iteration is deterministic.
//! ```

use std::cmp::Ordering;

/// An environment variable name with host-OS comparison semantics.
#[derive(Debug, Clone, Eq)]
pub(crate) struct EnvKey(String);

impl EnvKey {
    pub(crate) fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(windows)]
fn fold_cmp(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

#[cfg(not(windows))]
fn fold_cmp(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

impl PartialEq for EnvKey {
    fn eq(&self, other: &Self) -> bool {
        fold_cmp(&self.0, &other.0) == Ordering::Equal
    }
}

impl PartialOrd for EnvKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnvKey {
    fn cmp(&self, other: &Self) -> Ordering {
        fold_cmp(&self.0, &other.0)
    }
}
