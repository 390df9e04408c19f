// envbridge: Runtime Environment Adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable struct and copy-on-write implementation.
//!
//! ```text
//! Env (copy-on-write)
//! vars: Arc<BTreeMap<EnvKey, String>>       UTF-8 entries
//! raw:  Arc<Vec<(OsString, OsString)>>      everything else, kept verbatim
//! clone shares both Arcs until the first set()/remove()
//!
//! ResolvedEnv (read-only view, built by Translator::resolve)
//! ```

use super::types::EnvKey;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::sync::Arc;

/// A set of environment variables with copy-on-write semantics.
///
/// Clones share data until one of them is modified, so handing a snapshot of
/// the host environment to the translator costs a pointer copy.
///
/// Entries whose name or value is not valid UTF-8 are stored as raw
/// `OsString` pairs and reach the child byte for byte. `get`/`iter` only see
/// the UTF-8 entries; `get_os`/`iter_os` see both.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: Arc<BTreeMap<EnvKey, String>>,
    raw: Arc<Vec<(OsString, OsString)>>,
}

fn raw_name_matches(name: &OsStr, key: &str) -> bool {
    name.to_str()
        .is_some_and(|name| EnvKey::new(name) == EnvKey::new(key))
}

impl Env {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment from a map of variables.
    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        vars.into_iter().collect()
    }

    /// Sets an environment variable, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        self.drop_raw(&key);
        Arc::make_mut(&mut self.vars).insert(EnvKey::new(key), value.into());
        self
    }

    /// Sets a variable whose value may not be valid UTF-8.
    pub fn set_os(&mut self, key: &str, value: OsString) -> &mut Self {
        match value.into_string() {
            Ok(value) => self.set(key, value),
            Err(value) => {
                self.remove(key);
                Arc::make_mut(&mut self.raw).push((OsString::from(key), value));
                self
            }
        }
    }

    /// Inserts an entry as read from the OS. UTF-8 entries go to the map,
    /// anything else is kept verbatim.
    pub fn insert_os(&mut self, key: OsString, value: OsString) -> &mut Self {
        match key.into_string() {
            Ok(key) => self.set_os(&key, value),
            Err(key) => {
                let raw = Arc::make_mut(&mut self.raw);
                raw.retain(|(name, _)| *name != key);
                raw.push((key, value));
                self
            }
        }
    }

    /// Gets an environment variable value.
    ///
    /// Returns `None` for a variable whose value is not valid UTF-8; use
    /// [`Env::get_os`] to see those.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(&EnvKey::new(key)).map(String::as_str)
    }

    /// Gets a value, treating an empty string as absent.
    #[must_use]
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Gets a value whether or not it is valid UTF-8.
    #[must_use]
    pub fn get_os(&self, key: &str) -> Option<&OsStr> {
        self.get(key).map(OsStr::new).or_else(|| {
            self.raw
                .iter()
                .find(|(name, _)| raw_name_matches(name, key))
                .map(|(_, value)| value.as_os_str())
        })
    }

    /// Returns true if `key` is set to a non-empty value, UTF-8 or not.
    #[must_use]
    pub fn has_value(&self, key: &str) -> bool {
        self.get_os(key).is_some_and(|v| !v.is_empty())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(&EnvKey::new(key))
            || self.raw.iter().any(|(name, _)| raw_name_matches(name, key))
    }

    /// Removes an environment variable.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        let env_key = EnvKey::new(key);
        if self.vars.contains_key(&env_key) {
            Arc::make_mut(&mut self.vars).remove(&env_key);
        }
        self.drop_raw(key);
        self
    }

    fn drop_raw(&mut self, key: &str) {
        if self.raw.iter().any(|(name, _)| raw_name_matches(name, key)) {
            Arc::make_mut(&mut self.raw).retain(|(name, _)| !raw_name_matches(name, key));
        }
    }

    /// Returns the UTF-8 variables as a map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    /// Returns an iterator over the UTF-8 variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns an iterator over every variable: the UTF-8 ones in key order,
    /// then the raw ones in the order they were inserted.
    pub fn iter_os(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars
            .iter()
            .map(|(k, v)| (OsStr::new(k.as_str()), OsStr::new(v.as_str())))
            .chain(self.raw.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str())))
    }

    /// Number of entries that are not valid UTF-8.
    #[must_use]
    pub fn raw_len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.raw.is_empty()
    }

    /// Number of variables, UTF-8 and raw.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len() + self.raw.len()
    }

    /// Returns true if both handles point at the same shared data.
    #[must_use]
    pub fn shares_data_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.vars, &other.vars) && Arc::ptr_eq(&self.raw, &other.raw)
    }
}

impl PartialEq for Env {
    fn eq(&self, other: &Self) -> bool {
        self.shares_data_with(other)
            || (self.vars.len() == other.vars.len()
                && self.raw.len() == other.raw.len()
                && self
                    .vars
                    .iter()
                    .zip(other.vars.iter())
                    .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
                && self.raw.iter().all(|entry| other.raw.contains(entry)))
    }
}

impl Eq for Env {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter
            .into_iter()
            .map(|(k, v)| (EnvKey::new(k), v.into()))
            .collect();
        Self {
            vars: Arc::new(vars),
            raw: Arc::default(),
        }
    }
}

/// The final environment handed to the wrapped application.
///
/// Only [`crate::translate::Translator::resolve`] constructs one. There is no
/// mutating API: once resolution is done the mapping is frozen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnv(Env);

impl ResolvedEnv {
    pub(crate) const fn new(env: Env) -> Self {
        Self(env)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    #[must_use]
    pub fn get_os(&self, key: &str) -> Option<&OsStr> {
        self.0.get_os(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter()
    }

    /// Every variable handed to the child, raw entries included.
    pub fn iter_os(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.0.iter_os()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying mapping, e.g. to translate it again.
    #[must_use]
    pub const fn as_env(&self) -> &Env {
        &self.0
    }
}
