// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for envbridge.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, TranslateConfig, [DefaultVar], DiagnosticsConfig, LaunchConfig
//! TranslationRule: source -> target, kind (port|text), precedence (host|explicit)
//! LaunchMode: Exec (unix default) | Spawn
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Host variable conventionally injected by container platforms.
pub const HOST_PORT_VAR: &str = "PORT";

/// Port variable the wrapped application reads.
pub const APP_PORT_VAR: &str = "APP_PORT";

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console (stderr) output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. Empty disables file logging.
    pub log_file: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::TRACE,
            log_file: String::new(),
        }
    }
}

/// How a translated value is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// TCP port: ASCII digits, `1..=65535`.
    #[default]
    Port,
    /// Passed through verbatim.
    Text,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Port => write!(f, "port"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Which value wins when both the host source and the application target
/// are present in the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precedence {
    /// The platform's variable wins; platform routing depends on it.
    #[default]
    Host,
    /// An explicit, non-empty target wins; the source only fills a gap.
    Explicit,
}

impl std::fmt::Display for Precedence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Host => write!(f, "host"),
            Self::Explicit => write!(f, "explicit"),
        }
    }
}

impl std::str::FromStr for Precedence {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "host" => Ok(Self::Host),
            "explicit" => Ok(Self::Explicit),
            _ => Err(ConfigError::InvalidValue {
                section: "translate.rules".to_string(),
                key: "precedence".to_string(),
                message: format!("expected 'host' or 'explicit', got '{s}'"),
            }),
        }
    }
}

/// One host-variable to application-variable mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslationRule {
    /// Host-injected variable read.
    pub source: String,
    /// Application variable written.
    pub target: String,
    #[serde(default)]
    pub kind: ValueKind,
    #[serde(default)]
    pub precedence: Precedence,
}

impl TranslationRule {
    /// Creates a `port` rule with host precedence.
    pub fn port(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: ValueKind::Port,
            precedence: Precedence::Host,
        }
    }

    #[must_use]
    pub const fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }
}

impl Default for TranslationRule {
    fn default() -> Self {
        Self::port(HOST_PORT_VAR, APP_PORT_VAR)
    }
}

/// Translation section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslateConfig {
    /// Rules applied in order against the untouched host environment.
    pub rules: Vec<TranslationRule>,
    /// Variables that must be present and non-empty after resolution.
    pub required: Vec<String>,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            rules: vec![TranslationRule::default()],
            required: Vec::new(),
        }
    }
}

/// A static default, applied only where the variable is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultVar {
    pub name: String,
    pub value: String,
}

impl DefaultVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Diagnostic listing section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    pub enabled: bool,
    /// Keys listed at startup, in this order. Rule targets are appended.
    pub keys: Vec<String>,
    /// Extra glob patterns of secret names, on top of the built-in ones.
    pub denylist: Vec<String>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            keys: vec![APP_PORT_VAR.to_string()],
            denylist: Vec::new(),
        }
    }
}

/// How control is handed to the wrapped entrypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    /// Replace the current process image.
    Exec,
    /// Spawn a child, forward signals, mirror its exit code.
    Spawn,
}

impl Default for LaunchMode {
    fn default() -> Self {
        if cfg!(unix) { Self::Exec } else { Self::Spawn }
    }
}

impl std::fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exec => write!(f, "exec"),
            Self::Spawn => write!(f, "spawn"),
        }
    }
}

/// Launch section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchConfig {
    pub mode: LaunchMode,
    /// Entrypoint used when no PROGRAM is given on the command line.
    pub entrypoint: Option<PathBuf>,
    /// Arguments for `entrypoint`.
    pub args: Vec<String>,
}
