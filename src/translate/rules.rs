// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rule-set checks and value validation.

use std::collections::BTreeSet;

use super::invalid;
use crate::config::types::TranslationRule;
use crate::core::env::types::EnvKey;
use crate::error::{ConfigError, TranslateError};

/// Validates a port value: ASCII digits only, `1..=65535`.
///
/// Leading zeros are accepted; the value is propagated verbatim.
///
/// # Errors
///
/// Returns `TranslateError::MalformedPort` naming `var` and `value`.
pub fn validate_port(var: &str, value: &str) -> Result<u16, TranslateError> {
    let malformed = || TranslateError::MalformedPort {
        var: var.to_string(),
        value: value.to_string(),
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    match value.parse::<u16>() {
        Ok(0) | Err(_) => Err(malformed()),
        Ok(port) => Ok(port),
    }
}

/// Rejects rule sets whose result would depend on rule order.
///
/// A rule whose target is another rule's source would make a second
/// translation pass differ from the first. Names compare the way the host
/// compares variable names, so `port` and `PORT` are one name on Windows.
pub(super) fn check_rules(rules: &[TranslationRule]) -> Result<(), ConfigError> {
    let sources: BTreeSet<EnvKey> = rules
        .iter()
        .map(|r| EnvKey::new(r.source.as_str()))
        .collect();
    let mut targets = BTreeSet::new();

    for (i, rule) in rules.iter().enumerate() {
        let section = format!("translate.rules.{i}");
        if rule.source.is_empty() {
            return Err(invalid(&section, "source", "must not be empty".to_string()));
        }
        if rule.target.is_empty() {
            return Err(invalid(&section, "target", "must not be empty".to_string()));
        }
        let target = EnvKey::new(rule.target.as_str());
        if EnvKey::new(rule.source.as_str()) == target {
            return Err(invalid(
                &section,
                "target",
                format!("'{}' maps onto itself", rule.target),
            ));
        }
        if sources.contains(&target) {
            return Err(invalid(
                &section,
                "target",
                format!("'{}' is also the source of another rule", rule.target),
            ));
        }
        if !targets.insert(target) {
            return Err(invalid(
                &section,
                "target",
                format!("'{}' is the target of more than one rule", rule.target),
            ));
        }
    }

    Ok(())
}
