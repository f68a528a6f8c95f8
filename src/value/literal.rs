// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Safe data-literal parsing.
//!
//! ```text
//! "undefined"      -> null
//! 'single quoted'  -> string
//! anything else    -> serde_json (numbers, bools, null, "strings", [..], {..})
//! ```
//!
//! Nothing is evaluated. A bare word such as `hello` is simply not a literal.

use serde_json::Value;

use crate::error::CoerceError;

/// Parse `text` as a data literal.
///
/// # Errors
///
/// Returns [`CoerceError::InvalidLiteral`] if `text` is not one of the
/// accepted literal forms.
pub fn parse_literal(text: &str) -> Result<Value, CoerceError> {
    if text == "undefined" {
        return Ok(Value::Null);
    }

    if text.starts_with('\'') {
        return single_quoted(text)
            .and_then(|json| serde_json::from_str::<String>(&json).ok())
            .map(Value::String)
            .ok_or_else(|| CoerceError::InvalidLiteral {
                value: text.to_string(),
                message: "unterminated or malformed single-quoted string".to_string(),
            });
    }

    serde_json::from_str(text).map_err(|e| CoerceError::InvalidLiteral {
        value: text.to_string(),
        message: e.to_string(),
    })
}

/// Rewrite a `'...'` literal as the equivalent `"..."` JSON string.
///
/// Returns `None` if the quotes are unbalanced or an unescaped `'` appears
/// inside.
fn single_quoted(text: &str) -> Option<String> {
    let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;

    let mut json = String::with_capacity(inner.len() + 2);
    json.push('"');

    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                '\'' => json.push('\''),
                escaped => {
                    json.push('\\');
                    json.push(escaped);
                }
            },
            '\'' => return None,
            '"' => json.push_str("\\\""),
            c => json.push(c),
        }
    }

    json.push('"');
    Some(json)
}
