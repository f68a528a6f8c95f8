// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable loading, coercion and flattening.
//!
//! # Architecture
//!
//! ```text
//! EnvLoader ──RawEnv──> transform_env ──CoercedEnv──> flatten_env ──> define
//!                             |
//!                             v
//!                       EnvTarget (optional mount)
//!                       ProcessEnv | Env
//! ```
//!
//! - **Order**: coerced and flattened maps keep insertion order
//! - **Mount**: process env only accepts text; non-strings are JSON-serialized

pub mod container;
pub mod flatten;
pub mod loader;
pub mod transform;


use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::warn;

pub use container::Env;
pub use flatten::{FlattenOptions, flatten_env, flatten_env_with, is_identifier};
pub use loader::{DEFAULT_PREFIXES, EnvLoader, MapLoader, ProcessEnvLoader};
pub use transform::{mount_text, transform_env, transform_env_into};

/// Raw variables as read by a loader.
pub type RawEnv = BTreeMap<String, String>;

/// Variables after coercion, in the raw map's order.
pub type CoercedEnv = Map<String, Value>;

/// Path expression (`ROOT.a.b`, `ROOT.a.c[0]`) to `define` value.
pub type FlattenedEnv = Map<String, Value>;

/// Somewhere coerced variables can be mirrored to.
pub trait EnvTarget {
    fn set_var(&mut self, key: &str, value: &str);
}

/// The current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvTarget for ProcessEnv {
    /// Pairs the OS cannot store (empty name, `=` in the name, NUL anywhere)
    /// are skipped with a warning.
    fn set_var(&mut self, key: &str, value: &str) {
        if !is_mountable(key, value) {
            warn!(
                key,
                "Skipping env mount, name or value not valid for the process environment"
            );
            return;
        }
        // SAFETY: Mounting happens during the host's single-threaded
        // configuration phase, before any threads that read the environment.
        unsafe {
            std::env::set_var(key, value);
        }
    }
}

impl EnvTarget for Env {
    fn set_var(&mut self, key: &str, value: &str) {
        self.set(key, value);
    }
}

/// Whether `key=value` can be stored in the process environment.
#[must_use]
pub fn is_mountable(key: &str, value: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0']) && !value.contains('\0')
}

/// Captures the current process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
#[must_use]
pub fn current_env() -> Env {
    let vars = std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect();
    Env::from_map(vars)
}
