// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          ToolkitError (~24 bytes)
//!                  |
//!     +--------+---+-----+-----------+
//!     |        |         |           |
//!     v        v         v           v
//!  Flatten   Load     Logging  InvalidCommand
//!   Box     Box<str>  Box<str>    Box<str>
//!
//! Recovered locally, never in ToolkitError:
//!   CoerceError  InvalidLiteral, Converter
//! ```
//!
//! [`CoerceError`] is carried by [`crate::value::Coercion::Fallback`] and
//! reported as a diagnostic; coercion itself never fails.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
///
/// Converter callbacks and environment loaders return this type.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ToolkitError`].
pub type ToolkitResult<T> = std::result::Result<T, ToolkitError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// Flattening was rejected.
    #[error("flatten error: {0}")]
    Flatten(#[from] Box<FlattenError>),

    /// The environment loader failed.
    #[error("load error: {0}")]
    Load(Box<str>),

    /// The logging system could not be installed.
    #[error("logging error: {0}")]
    Logging(Box<str>),

    /// A build command name is not `build` or `serve`.
    #[error("invalid command '{0}', expected 'build' or 'serve'")]
    InvalidCommand(Box<str>),
}

/// Create a [`ToolkitError::Load`] from any displayable loader failure.
pub fn load_failed(message: impl std::fmt::Display) -> ToolkitError {
    ToolkitError::Load(message.to_string().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ToolkitError {
                fn from(err: $error) -> Self {
                    ToolkitError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    FlattenError => Flatten,
}

// --- Coerce Errors ---

/// Reasons a raw environment value was kept as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    /// The value is not a data literal.
    #[error("'{value}' is not a literal: {message}")]
    InvalidLiteral { value: String, message: String },

    /// A user-supplied converter rejected the value.
    #[error("converter failed: {message}")]
    Converter { message: String },
}

// --- Flatten Errors ---

/// Flattening errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlattenError {
    /// The root name used as the path prefix is empty.
    #[error("missing parameter \"name\"")]
    MissingName,
}
