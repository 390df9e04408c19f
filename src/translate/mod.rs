// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Variable translation: host environment in, resolved environment out.
//!
//! ```text
//! host Env (read-only)
//!      |
//!      v
//! translate()      rules, evaluated against the untouched input
//!      |           PORT="8080" ----> APP_PORT="8080"
//!      |           PORT="" / unset -> APP_PORT untouched
//!      v
//! apply_defaults() fill absent names only
//!      |
//!      v
//! check_required() missing or empty -> MissingRequired
//!      |
//!      v
//! ResolvedEnv (frozen)
//! ```
//!
//! Precedence when the host sets both the source and the target:
//!
//! | precedence | source   | target    | result            |
//! |------------|----------|-----------|-------------------|
//! | `host`     | `"8080"` | `"5678"`  | target = `"8080"` |
//! | `explicit` | `"8080"` | `"5678"`  | target = `"5678"` |
//! | `explicit` | `"8080"` | `""`/unset| target = `"8080"` |
//! | either     | `""`/unset | any     | target untouched  |

mod rules;


use tracing::debug;

use crate::config::Config;
use crate::config::types::{DefaultVar, Precedence, TranslationRule, ValueKind};
use crate::core::env::container::{Env, ResolvedEnv};
use crate::error::{ConfigError, TranslateError};

pub use rules::validate_port;

/// Pure translator built from the `[translate]` and `[[defaults]]` sections.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    rules: Vec<TranslationRule>,
    defaults: Vec<DefaultVar>,
    required: Vec<String>,
}

impl Translator {
    /// Creates a translator after checking the rule set.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if a rule has an empty name, maps
    /// a variable onto itself, shares a target with another rule, or writes a
    /// variable another rule reads.
    pub fn new(
        rules: Vec<TranslationRule>,
        defaults: Vec<DefaultVar>,
        required: Vec<String>,
    ) -> Result<Self, ConfigError> {
        rules::check_rules(&rules)?;
        if let Some(d) = defaults.iter().find(|d| d.name.is_empty()) {
            return Err(invalid("defaults", "name", format!("empty name (value {:?})", d.value)));
        }
        if required.iter().any(String::is_empty) {
            return Err(invalid("translate", "required", "empty variable name".to_string()));
        }
        Ok(Self {
            rules,
            defaults,
            required,
        })
    }

    /// Creates a translator from the loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`Translator::new`].
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(
            config.translate.rules.clone(),
            config.defaults.clone(),
            config.translate.required.clone(),
        )
    }

    /// Forces one precedence onto every rule.
    #[must_use]
    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        for rule in &mut self.rules {
            rule.precedence = precedence;
        }
        self
    }

    /// Targets written by the rules, in rule order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.target.as_str())
    }

    /// Applies the rules to `env`, returning a new mapping.
    ///
    /// Every rule reads the original `env`, never a value another rule wrote.
    /// The source variable itself is passed through unchanged.
    ///
    /// # Errors
    ///
    /// Returns `TranslateError::MalformedPort` if a non-empty `port` source is
    /// not a port number.
    pub fn translate(&self, env: &Env) -> Result<Env, TranslateError> {
        let mut out = env.clone();

        for rule in &self.rules {
            let Some(value) = env.get_os(&rule.source).filter(|v| !v.is_empty()) else {
                debug!(source = %rule.source, target = %rule.target, "source unset, target untouched");
                continue;
            };

            if rule.kind == ValueKind::Port {
                validate_port(&rule.source, &value.to_string_lossy())?;
            }

            if rule.precedence == Precedence::Explicit && env.has_value(&rule.target) {
                debug!(source = %rule.source, target = %rule.target, "explicit target kept");
                continue;
            }

            if let Some(current) = env.get_non_empty(&rule.target)
                && value.to_str() != Some(current)
            {
                debug!(
                    target = %rule.target,
                    replaced = %current,
                    "host value overrides explicit target"
                );
            }
            debug!(
                source = %rule.source,
                target = %rule.target,
                value = %value.to_string_lossy(),
                "translated"
            );
            out.set_os(&rule.target, value.to_os_string());
        }

        Ok(out)
    }

    /// Inserts every default whose name is absent from `env`.
    ///
    /// A present but empty host value is kept as is.
    #[must_use]
    pub fn apply_defaults(&self, env: &Env) -> Env {
        let mut out = env.clone();
        for default in &self.defaults {
            if !out.contains(&default.name) {
                debug!(name = %default.name, "default applied");
                out.set(default.name.as_str(), default.value.as_str());
            }
        }
        out
    }

    /// Checks that every required variable is present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns `TranslateError::MissingRequired` for the first missing name.
    pub fn check_required(&self, env: &Env) -> Result<(), TranslateError> {
        match self.required.iter().find(|name| !env.has_value(name)) {
            Some(name) => Err(TranslateError::MissingRequired { var: name.clone() }),
            None => Ok(()),
        }
    }

    /// Runs the whole pipeline and freezes the result.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Translator::translate`] and
    /// [`Translator::check_required`].
    pub fn resolve(&self, host: &Env) -> Result<ResolvedEnv, TranslateError> {
        let translated = self.translate(host)?;
        let filled = self.apply_defaults(&translated);
        self.check_required(&filled)?;
        Ok(ResolvedEnv::new(filled))
    }
}

fn invalid(section: &str, key: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message,
    }
}
