// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Flattening of coerced env into `define` entries.
//!
//! ```text
//! flatten_env("__ENV__", { a: { b: 1, c: [1, 2] }, d: "4", "e-5": 6 })
//!
//! __ENV__.a    -> { b: 1, c: [1, 2] }
//! __ENV__.a.b  -> 1
//! __ENV__.a.c  -> [1, 2]          (arrays are leaves)
//! __ENV__.d    -> "\"4\""         (strings are JSON-quoted)
//!                                 ("e-5" is not an identifier: dropped)
//! ```
//!
//! Objects are read with `env.a.b`, arrays only with `env[index]`. Do not
//! `define` another constant under the same root name, the substitutions
//! would collide.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::FlattenedEnv;
use crate::error::FlattenError;

/// Options for [`flatten_env_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Also emit `path[index]` entries for array elements and recurse into
    /// objects inside arrays.
    pub expand_sequences: bool,
}

/// Flatten `env` under the root `name`, treating arrays as leaves.
///
/// # Errors
///
/// Returns [`FlattenError::MissingName`] if `name` is empty.
pub fn flatten_env(name: &str, env: &Map<String, Value>) -> Result<FlattenedEnv, FlattenError> {
    flatten_env_with(name, env, FlattenOptions::default())
}

/// Flatten `env` under the root `name`.
///
/// # Errors
///
/// Returns [`FlattenError::MissingName`] if `name` is empty.
pub fn flatten_env_with(
    name: &str,
    env: &Map<String, Value>,
    options: FlattenOptions,
) -> Result<FlattenedEnv, FlattenError> {
    if name.is_empty() {
        return Err(FlattenError::MissingName);
    }

    let mut flattener = Flattener {
        options,
        out: FlattenedEnv::new(),
    };
    flattener.walk_object(name, env);

    debug!(name, entries = flattener.out.len(), "Env flattened");
    Ok(flattener.out)
}

/// Whether `key` can be used as a bare attribute name.
#[must_use]
pub fn is_identifier(key: &str) -> bool {
    static IDENTIFIER: OnceLock<Option<Regex>> = OnceLock::new();
    IDENTIFIER
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(key))
}

struct Flattener {
    options: FlattenOptions,
    out: FlattenedEnv,
}

impl Flattener {
    fn walk_object(&mut self, path: &str, object: &Map<String, Value>) {
        for (key, value) in object {
            if !is_identifier(key) {
                trace!(path, key, "Skipping invalid attribute name");
                continue;
            }
            self.visit(format!("{path}.{key}"), value);
        }
    }

    fn walk_sequence(&mut self, path: &str, items: &[Value]) {
        for (index, value) in items.iter().enumerate() {
            self.visit(format!("{path}[{index}]"), value);
        }
    }

    /// Emit `path` itself, then its children.
    fn visit(&mut self, path: String, value: &Value) {
        self.out.insert(path.clone(), encode_leaf(value));
        match value {
            Value::Object(object) => self.walk_object(&path, object),
            Value::Array(items) if self.options.expand_sequences => {
                self.walk_sequence(&path, items);
            }
            _ => {}
        }
    }
}

/// Strings become their JSON-quoted text; other values are kept as-is.
fn encode_leaf(value: &Value) -> Value {
    match value {
        Value::String(_) => Value::String(value.to_string()),
        other => other.clone(),
    }
}
