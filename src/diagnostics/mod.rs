// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Best-effort diagnostic listing printed before delegation.
//!
//! ```text
//! envbridge: resolved configuration
//! APP_PORT: 8080
//! WEBHOOK_URL: (unset)
//! ```
//!
//! Keys come from `[diagnostics].keys` followed by the translation targets,
//! duplicates dropped. Denylisted keys are skipped entirely. Control
//! characters in values are escaped so a value always stays on its line.
//! A write failure is logged and swallowed.

pub mod denylist;

#[cfg(test)]
mod tests;

use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::Write;

use tracing::{debug, warn};

use crate::config::Config;
use crate::core::env::container::ResolvedEnv;
use crate::error::ConfigError;

use denylist::Denylist;

/// First line of every listing.
pub const HEADER: &str = "envbridge: resolved configuration";

/// Marker printed for keys that are not set.
pub const UNSET: &str = "(unset)";

/// Marker printed instead of secret values.
pub const HIDDEN: &str = "[hidden]";

/// Renders and writes the diagnostic listing.
#[derive(Debug, Clone)]
pub struct Emitter {
    keys: Vec<String>,
    denylist: Denylist,
}

impl Emitter {
    /// Creates an emitter for `keys`, in order.
    ///
    /// Duplicates are dropped. Denied keys are dropped up front.
    pub fn new<I, S>(keys: I, denylist: Denylist) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut listed: Vec<String> = Vec::new();
        for key in keys {
            let key = key.into();
            if key.is_empty() || listed.contains(&key) {
                continue;
            }
            if denylist.is_denied(&key) {
                debug!(key = %key, "denylisted key dropped from diagnostics");
                continue;
            }
            listed.push(key);
        }
        Self {
            keys: listed,
            denylist,
        }
    }

    /// Creates an emitter from `[diagnostics]` plus the translation targets.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an invalid denylist pattern.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let denylist = Denylist::with_extra(&config.diagnostics.denylist)?;
        let keys = config
            .diagnostics
            .keys
            .iter()
            .cloned()
            .chain(config.translate.rules.iter().map(|r| r.target.clone()));
        Ok(Self::new(keys, denylist))
    }

    /// Keys that will be listed.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    #[must_use]
    pub const fn denylist(&self) -> &Denylist {
        &self.denylist
    }

    /// Returns `value`, or [`HIDDEN`] if `key` is denylisted.
    #[must_use]
    pub fn mask<'a>(&self, key: &str, value: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        if self.denylist.is_denied(key) {
            Cow::Borrowed(HIDDEN)
        } else {
            value.into()
        }
    }

    /// Renders the listing. Output depends only on `env` and the key list.
    #[must_use]
    pub fn render(&self, env: &ResolvedEnv) -> String {
        let mut out = String::with_capacity(64 + self.keys.len() * 24);
        out.push_str(HEADER);
        out.push('\n');
        for key in &self.keys {
            match env.get_os(key) {
                Some(value) => {
                    let value = value.to_string_lossy();
                    let _ = writeln!(out, "{key}: {}", escape_value(&value));
                }
                None => {
                    let _ = writeln!(out, "{key}: {UNSET}");
                }
            }
        }
        out
    }

    /// Writes the listing to `stream` and flushes it.
    ///
    /// Returns false if the stream failed. Never returns an error: startup
    /// continues regardless.
    pub fn emit<W: Write>(&self, env: &ResolvedEnv, stream: &mut W) -> bool {
        let text = self.render(env);
        match stream
            .write_all(text.as_bytes())
            .and_then(|()| stream.flush())
        {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "diagnostic stream unavailable, continuing");
                false
            }
        }
    }
}

/// Escapes control characters (`\n`, `\r`, `\t`, `\u{1b}`, ...) in `value`.
///
/// Borrows when there is nothing to escape.
#[must_use]
pub fn escape_value(value: &str) -> Cow<'_, str> {
    if !value.chars().any(char::is_control) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        if c.is_control() {
            escaped.extend(c.escape_default());
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}
