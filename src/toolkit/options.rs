// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Toolkit options.
//!
//! ```text
//! modeMapping             defaults merged with user entries
//! allowMountToProcessEnv  false
//! envConverter            {} (code only, not deserialized)
//! ```

use bon::Builder;
use serde::Deserialize;

use super::mode::ModeMapping;
use crate::value::ConverterTable;

/// Options for a [`super::Toolkit`].
///
/// Built in code with [`ToolkitOptions::builder`], or deserialized from the
/// host's configuration (camelCase keys, every field optional).
#[derive(Debug, Clone, Builder, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolkitOptions {
    /// Logical to actual mode names.
    #[builder(setters(name = with_mode_mapping), default)]
    mode_mapping: ModeMapping,

    /// Mirror loaded variables into the process environment.
    ///
    /// The process environment only holds text, so anything other than a
    /// string is JSON-serialized:
    ///
    /// ```text
    /// { a: 1, b: [{c: 2}], d: null, e: "4" }
    /// a => "1"   b => "[{\"c\":2}]"   d => "null"   e => "4"
    /// ```
    #[builder(setters(name = with_allow_mount_to_process_env), default)]
    allow_mount_to_process_env: bool,

    /// Per-key overrides for the default literal coercion.
    #[builder(setters(name = with_env_converter), default)]
    #[serde(skip)]
    env_converter: ConverterTable,
}

impl Default for ToolkitOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ToolkitOptions {
    #[must_use]
    pub const fn mode_mapping(&self) -> &ModeMapping {
        &self.mode_mapping
    }

    #[must_use]
    pub const fn allow_mount_to_process_env(&self) -> bool {
        self.allow_mount_to_process_env
    }

    #[must_use]
    pub const fn env_converter(&self) -> &ConverterTable {
        &self.env_converter
    }

    /// Replaces the converter table, keeping the other options.
    ///
    /// Useful after deserializing, since converters only exist in code.
    #[must_use]
    pub fn with_env_converter(mut self, converters: ConverterTable) -> Self {
        self.env_converter = converters;
        self
    }
}
