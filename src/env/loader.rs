// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Raw environment loaders.
//!
//! ```text
//! EnvLoader::load(mode, dir, prefixes) -> RawEnv
//!   ProcessEnvLoader  current process env, prefix-filtered
//!   MapLoader         fixed base map + per-mode overlays, prefix-filtered
//!   (host)            anything that reads .env files
//! ```
//!
//! Reading `.env` files is the host's job; a host that already did it hands
//! the result over through [`MapLoader`] or its own [`EnvLoader`].

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::bail;

use super::{RawEnv, current_env};
use crate::error::Result;

/// Prefixes used when the caller does not pass any.
pub const DEFAULT_PREFIXES: &[&str] = &["VITE_"];

/// Source of raw environment variables for a build mode.
pub trait EnvLoader: Send + Sync {
    /// Load the variables visible to `mode`.
    ///
    /// Only variables starting with one of `prefixes` are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the variables cannot be read or `prefixes`
    /// contains an empty string.
    fn load(&self, mode: &str, dir: &Path, prefixes: &[String]) -> Result<RawEnv>;
}

/// Keep only the variables exposed by `prefixes`.
///
/// An empty prefix would expose every variable, secrets included, so it is
/// rejected.
///
/// # Errors
///
/// Returns an error if `prefixes` contains an empty string.
pub fn filter_by_prefix<'a, I>(vars: I, prefixes: &[String]) -> Result<RawEnv>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    if prefixes.iter().any(String::is_empty) {
        bail!(
            "env prefix contains an empty string, which could expose every environment variable"
        );
    }

    Ok(vars
        .into_iter()
        .filter(|(key, _)| prefixes.iter().any(|p| key.starts_with(p.as_str())))
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect())
}

/// Loads prefixed variables from the current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvLoader;

impl EnvLoader for ProcessEnvLoader {
    fn load(&self, _mode: &str, _dir: &Path, prefixes: &[String]) -> Result<RawEnv> {
        filter_by_prefix(current_env().iter(), prefixes)
    }
}

/// Loads prefixed variables from fixed maps.
///
/// Variables registered for the requested mode override the base ones, the
/// way `.env.<mode>` overrides `.env`.
#[derive(Debug, Clone, Default)]
pub struct MapLoader {
    base: RawEnv,
    modes: BTreeMap<String, RawEnv>,
}

impl MapLoader {
    #[must_use]
    pub const fn new(base: RawEnv) -> Self {
        Self {
            base,
            modes: BTreeMap::new(),
        }
    }

    /// Adds variables that only apply to `mode`.
    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>, vars: RawEnv) -> Self {
        self.modes.entry(mode.into()).or_default().extend(vars);
        self
    }
}

impl EnvLoader for MapLoader {
    fn load(&self, mode: &str, _dir: &Path, prefixes: &[String]) -> Result<RawEnv> {
        let mut merged = self.base.clone();
        if let Some(overlay) = self.modes.get(mode) {
            merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        filter_by_prefix(
            merged.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            prefixes,
        )
    }
}
