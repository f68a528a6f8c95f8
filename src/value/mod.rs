// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Value coercion for raw environment strings.
//!
//! # Pipeline
//!
//! ```text
//! raw ──trim──> trimmed
//!                 |
//!      converter registered?
//!        yes |            | no
//!            v            v
//!     converter(trimmed)  empty? ──yes──> ""
//!        Ok | Err           | no
//!           |  |            v
//!           |  |      parse_literal
//!           |  |        Ok | Err
//!           v  v           v  v
//!     Coerced  Fallback(trimmed string, reason)
//! ```
//!
//! Coercion never fails outward. A [`Coercion::Fallback`] carries the reason
//! so callers can report it; [`convert_value`] reports it via `tracing`.

pub mod literal;


use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::{CoerceError, Result};

pub use literal::parse_literal;

type ConvertFn = dyn Fn(&str) -> Result<Value> + Send + Sync;

/// A per-key override for the default literal coercion.
///
/// Cheap to clone; the callback is shared.
#[derive(Clone)]
pub struct Converter(Arc<ConvertFn>);

impl Converter {
    /// Wrap a fallible conversion callback.
    ///
    /// # Example
    ///
    /// ```
    /// use vite_toolkit::value::Converter;
    ///
    /// let port = Converter::new(|raw| Ok(raw.parse::<u16>()?));
    /// assert_eq!(port.call("5173").unwrap(), 5173);
    /// ```
    pub fn new<F, T>(f: F) -> Self
    where
        F: Fn(&str) -> Result<T> + Send + Sync + 'static,
        T: Into<Value>,
    {
        Self(Arc::new(move |raw| f(raw).map(Into::into)))
    }

    /// Run the converter on an already trimmed value.
    ///
    /// # Errors
    ///
    /// Returns whatever error the callback produced.
    pub fn call(&self, raw: &str) -> Result<Value> {
        (self.0)(raw)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Converter(..)")
    }
}

/// Converters keyed by environment variable name.
#[derive(Debug, Clone, Default)]
pub struct ConverterTable {
    converters: BTreeMap<String, Converter>,
}

impl ConverterTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a converter for `key`, replacing any previous one.
    #[must_use]
    pub fn with<F, T>(mut self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> Result<T> + Send + Sync + 'static,
        T: Into<Value>,
    {
        self.insert(key, Converter::new(f));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, converter: Converter) -> &mut Self {
        self.converters.insert(key.into(), converter);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Converter> {
        self.converters.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.converters.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Converter)> for ConverterTable {
    fn from_iter<I: IntoIterator<Item = (K, Converter)>>(iter: I) -> Self {
        Self {
            converters: iter.into_iter().map(|(k, c)| (k.into(), c)).collect(),
        }
    }
}

/// Outcome of coercing one raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion {
    /// The converter or literal parser produced a value.
    Coerced(Value),
    /// Coercion failed; `value` is the trimmed raw string.
    Fallback { value: Value, reason: CoerceError },
}

impl Coercion {
    #[must_use]
    pub const fn value(&self) -> &Value {
        match self {
            Self::Coerced(value) | Self::Fallback { value, .. } => value,
        }
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Coerced(value) | Self::Fallback { value, .. } => value,
        }
    }

    #[must_use]
    pub const fn reason(&self) -> Option<&CoerceError> {
        match self {
            Self::Coerced(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Coerce a raw value, keeping the failure reason.
///
/// A registered converter always wins, even for an empty value. Without one,
/// an empty value stays an empty string and is never parsed.
#[must_use]
pub fn coerce(raw: &str, converter: Option<&Converter>) -> Coercion {
    let trimmed = raw.trim();
    let fallback = |reason| Coercion::Fallback {
        value: Value::String(trimmed.to_string()),
        reason,
    };

    if let Some(converter) = converter {
        return match converter.call(trimmed) {
            Ok(value) => Coercion::Coerced(value),
            Err(e) => fallback(CoerceError::Converter {
                message: format!("{e:#}"),
            }),
        };
    }

    if trimmed.is_empty() {
        return Coercion::Coerced(Value::String(String::new()));
    }

    match parse_literal(trimmed) {
        Ok(value) => Coercion::Coerced(value),
        Err(reason) => fallback(reason),
    }
}

/// Coerce a raw value, falling back to the trimmed string on failure.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use vite_toolkit::value::convert_value;
///
/// assert_eq!(convert_value(" 42 ", None), json!(42));
/// assert_eq!(convert_value("[1,2]", None), json!([1, 2]));
/// assert_eq!(convert_value("hello", None), json!("hello"));
/// ```
#[must_use]
pub fn convert_value(raw: &str, converter: Option<&Converter>) -> Value {
    let coercion = coerce(raw, converter);
    if let Some(reason) = coercion.reason() {
        debug!(%reason, "Conversion failed, keeping raw string");
    }
    coercion.into_value()
}
