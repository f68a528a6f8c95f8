// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Coercion of a whole raw environment.
//!
//! ```text
//! RawEnv ──for each key──> coerce(value, converters[key]) ──> CoercedEnv
//!                                   |
//!                          mount target given?
//!                                   v
//!                      target.set_var(key, mount_text(value))
//! ```

use serde_json::Value;
use tracing::{debug, trace};

use super::{CoercedEnv, EnvTarget, ProcessEnv, RawEnv};
use crate::value::{ConverterTable, coerce};

/// Coerce every variable in `raw`.
///
/// With `allow_mount` set, each coerced value is also written to the process
/// environment (see [`mount_text`] for the text form).
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use serde_json::json;
/// use vite_toolkit::env::transform_env;
/// use vite_toolkit::value::ConverterTable;
///
/// let raw = BTreeMap::from([
///     ("A".to_string(), "1".to_string()),
///     ("B".to_string(), "hi".to_string()),
/// ]);
/// let env = transform_env(&raw, false, &ConverterTable::new());
/// assert_eq!(env["A"], json!(1));
/// assert_eq!(env["B"], json!("hi"));
/// ```
#[must_use]
pub fn transform_env(raw: &RawEnv, allow_mount: bool, converters: &ConverterTable) -> CoercedEnv {
    if allow_mount {
        transform_env_into(raw, Some(&mut ProcessEnv), converters)
    } else {
        transform_env_into(raw, None, converters)
    }
}

/// Coerce every variable in `raw`, mounting into `target` when one is given.
#[must_use]
pub fn transform_env_into(
    raw: &RawEnv,
    mut target: Option<&mut dyn EnvTarget>,
    converters: &ConverterTable,
) -> CoercedEnv {
    debug!(
        count = raw.len(),
        mount = target.is_some(),
        "Transforming env"
    );

    let mut env = CoercedEnv::new();
    for (key, raw_value) in raw {
        let converter = converters.get(key);
        trace!(
            key,
            value = raw_value,
            custom = converter.is_some(),
            "Converting"
        );

        let coercion = coerce(raw_value, converter);
        if let Some(reason) = coercion.reason() {
            debug!(key, %reason, "Conversion failed, keeping raw string");
        }
        let value = coercion.into_value();

        if let Some(target) = &mut target {
            let text = mount_text(&value);
            trace!(key, text, "Mounting to env");
            target.set_var(key, &text);
        }

        env.insert(key.clone(), value);
    }

    debug!("Env transformed");
    env
}

/// Text written to an environment mapping for a coerced value.
///
/// Strings are written as-is; everything else is JSON-serialized, so `null`
/// becomes `"null"` and `[{"c":2}]` stays `[{"c":2}]`.
#[must_use]
pub fn mount_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
