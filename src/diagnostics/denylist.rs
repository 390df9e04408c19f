// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Secret-name denylist.
//!
//! ```text
//! built-in patterns + [diagnostics].denylist
//!        |  upper-cased, compiled once
//!        v
//! is_denied("DB_POSTGRESDB_PASSWORD") -> true
//! is_denied("APP_PORT")               -> false
//! ```
//!
//! Matching is case-insensitive. Config patterns extend the built-ins and
//! cannot remove them.

use wax::{Glob, Program as _};

use crate::error::ConfigError;

/// Patterns that are always denied.
pub const BUILTIN_PATTERNS: &[&str] = &[
    "*PASSWORD*",
    "*PASSWD*",
    "*_PASS",
    "*PASS_*",
    "*APIKEY*",
    "*AUTH*",
    "*SECRET*",
    "*TOKEN*",
    "*CREDENTIAL*",
    "*ENCRYPTION*",
    "*PRIVATE*",
    "*_KEY",
    "*_KEY_*",
    "KEY",
];

/// Compiled set of secret-name globs.
#[derive(Debug, Clone)]
pub struct Denylist {
    globs: Vec<Glob<'static>>,
}

impl Default for Denylist {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Denylist {
    /// The built-in patterns only.
    #[must_use]
    pub fn builtin() -> Self {
        let globs = BUILTIN_PATTERNS
            .iter()
            .filter_map(|p| Glob::new(p).ok().map(Glob::into_owned))
            .collect();
        Self { globs }
    }

    /// The built-in patterns plus `extra`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a pattern that is not a glob.
    pub fn with_extra<S: AsRef<str>>(extra: &[S]) -> Result<Self, ConfigError> {
        let mut list = Self::builtin();
        for pattern in extra {
            let upper = pattern.as_ref().to_ascii_uppercase();
            let glob = Glob::new(&upper)
                .map(Glob::into_owned)
                .map_err(|e| ConfigError::InvalidValue {
                    section: "diagnostics".to_string(),
                    key: "denylist".to_string(),
                    message: format!("invalid pattern '{}': {e}", pattern.as_ref()),
                })?;
            list.globs.push(glob);
        }
        Ok(list)
    }

    /// Returns true if `name` looks like a secret.
    #[must_use]
    pub fn is_denied(&self, name: &str) -> bool {
        let upper = name.to_ascii_uppercase();
        self.globs.iter().any(|g| g.is_match(upper.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.globs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }
}
