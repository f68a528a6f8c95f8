// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory environment mapping with copy-on-write semantics.
//!
//! # Architecture
//!
//! ```text
//! Env (copy-on-write)
//! vars: Arc<BTreeMap<EnvKey, String>>
//! clone shares the Arc until the first set()/remove()
//!
//! EnvKey: case-insensitive on Windows (PATH == Path == path)
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// An environment variable name, compared the way the host OS compares them.
#[derive(Debug, Clone)]
struct EnvKey(String);

impl EnvKey {
    fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    fn as_str(&self) -> &str {
        &self.0
    }

    fn folded(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars().map(|c| {
            if cfg!(windows) {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
    }
}

impl PartialEq for EnvKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EnvKey {}

impl PartialOrd for EnvKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnvKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

/// A set of environment variables with copy-on-write semantics.
///
/// Used as a mount target when the process environment should stay
/// untouched, and as the snapshot [`super::current_env`] returns.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: Arc<BTreeMap<EnvKey, String>>,
}

impl Env {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment from a map of variables.
    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self {
            vars: Arc::new(vars.into_iter().map(|(k, v)| (EnvKey::new(k), v)).collect()),
        }
    }

    /// Sets an environment variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        Arc::make_mut(&mut self.vars).insert(EnvKey::new(key), value.into());
        self
    }

    /// Gets an environment variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(&EnvKey::new(key)).map(String::as_str)
    }

    /// Removes an environment variable.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        let key = EnvKey::new(key);
        if self.vars.contains_key(&key) {
            Arc::make_mut(&mut self.vars).remove(&key);
        }
        self
    }

    /// Returns all environment variables as a map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    /// Returns an iterator over environment variables.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }
}
