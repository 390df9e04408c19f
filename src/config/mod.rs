// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for envbridge.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. built-in defaults
//! 2. ./envbridge.toml (optional)
//! 3. --config FILE (repeatable)
//! 4. ENVBRIDGE_* env vars
//! 5. --set / CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ENVBRIDGE_LAUNCH__MODE=spawn             → launch.mode = "spawn"
//! ENVBRIDGE_DIAGNOSTICS__ENABLED=false     → diagnostics.enabled = false
//! ENVBRIDGE_GLOBAL__OUTPUT_LOG_LEVEL=4     → global.output_log_level = 4
//! ```
//!
//! # Example
//!
//! ```toml
//! [[translate.rules]]
//! source = "PORT"
//! target = "N8N_PORT"
//! precedence = "host"
//!
//! [[defaults]]
//! name = "GENERIC_TIMEZONE"
//! value = "UTC"
//!
//! [launch]
//! entrypoint = "/docker-entrypoint.sh"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::diagnostics::Emitter;
use crate::diagnostics::denylist::Denylist;
use crate::error::Result;
use crate::translate::Translator;

use loader::ConfigLoader;
use types::{DefaultVar, DiagnosticsConfig, GlobalConfig, LaunchConfig, TranslateConfig};

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "envbridge.toml";

/// Prefix of environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "ENVBRIDGE";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub translate: TranslateConfig,
    /// Static defaults, applied after translation where absent.
    pub defaults: Vec<DefaultVar>,
    pub diagnostics: DiagnosticsConfig,
    pub launch: LaunchConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use envbridge::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("envbridge.toml")
    ///     .with_env_prefix("ENVBRIDGE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Check the rule set and the denylist patterns.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for conflicting rules, empty names, or
    /// denylist patterns that are not valid globs.
    pub fn validate(&self) -> Result<()> {
        Translator::from_config(self)?;
        Emitter::from_config(self)?;
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Defaults whose name is on the denylist are shown as `[hidden]`.
    /// Output is deterministically ordered.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_translate_options(&mut options);
        self.format_default_options(&mut options);
        self.format_diagnostics_options(&mut options);
        self.format_launch_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), self.global.log_file.clone());
    }

    fn format_translate_options(&self, options: &mut BTreeMap<String, String>) {
        for (i, rule) in self.translate.rules.iter().enumerate() {
            options.insert(
                format!("translate.rules.{i}"),
                format!(
                    "{} -> {} ({}, {})",
                    rule.source, rule.target, rule.kind, rule.precedence
                ),
            );
        }
        options.insert(
            "translate.required".into(),
            self.translate.required.join(","),
        );
    }

    fn format_default_options(&self, options: &mut BTreeMap<String, String>) {
        let denylist = Denylist::with_extra(&self.diagnostics.denylist).unwrap_or_default();
        for default in &self.defaults {
            let value = if denylist.is_denied(&default.name) {
                "[hidden]".to_string()
            } else {
                default.value.clone()
            };
            options.insert(format!("defaults.{}", default.name), value);
        }
    }

    fn format_diagnostics_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "diagnostics.enabled".into(),
            self.diagnostics.enabled.to_string(),
        );
        options.insert(
            "diagnostics.keys".into(),
            self.diagnostics.keys.join(","),
        );
        options.insert(
            "diagnostics.denylist".into(),
            self.diagnostics.denylist.join(","),
        );
    }

    fn format_launch_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("launch.mode".into(), self.launch.mode.to_string());
        options.insert(
            "launch.entrypoint".into(),
            self.launch
                .entrypoint
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("launch.args".into(), self.launch.args.join(" "));
    }
}
