// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build invocation descriptor and mode mapping.
//!
//! ```text
//! ConfigEnv { mode: "development", command: Serve }
//!
//! ModeMapping (logical -> actual)
//!   dev  -> development
//!   prod -> production
//!   test -> test
//!   + user entries, merged over the defaults
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ToolkitError;

pub const DEV: &str = "dev";
pub const PROD: &str = "prod";
pub const TEST: &str = "test";

/// The build tool command being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Build,
    Serve,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build => write!(f, "build"),
            Self::Serve => write!(f, "serve"),
        }
    }
}

impl FromStr for Command {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(Self::Build),
            "serve" => Ok(Self::Serve),
            other => Err(ToolkitError::InvalidCommand(other.into())),
        }
    }
}

/// Describes the current build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEnv {
    mode: String,
    command: Command,
}

impl ConfigEnv {
    #[must_use]
    pub fn new(mode: impl Into<String>, command: Command) -> Self {
        Self {
            mode: mode.into(),
            command,
        }
    }

    #[must_use]
    pub fn mode(&self) -> &str {
        &self.mode
    }

    #[must_use]
    pub const fn command(&self) -> Command {
        self.command
    }
}

/// Logical mode names mapped to the build tool's actual mode strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModeMapping(BTreeMap<String, String>);

impl Default for ModeMapping {
    fn default() -> Self {
        Self(BTreeMap::from([
            (DEV.to_string(), "development".to_string()),
            (PROD.to_string(), "production".to_string()),
            (TEST.to_string(), "test".to_string()),
        ]))
    }
}

impl ModeMapping {
    /// The default mapping (`dev`, `prod`, `test`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps the logical `key` to `mode`, overriding a default if present.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, mode: impl Into<String>) -> Self {
        self.0.insert(key.into(), mode.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ModeMapping {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl<'de> Deserialize<'de> for ModeMapping {
    /// Partial maps are merged over the defaults.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let overrides = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut mapping = Self::default();
        mapping.extend(overrides);
        Ok(mapping)
    }
}
