// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Logging infrastructure using the `tracing` ecosystem.
//!
//! ```text
//! init_logging(&LogConfig)
//!        |
//!        v
//!    registry
//!        |
//!        v
//!     Console
//!     EnvFilter
//!     ANSI
//!     timestamps (optional)
//!
//! LogLevel:  0=OFF  1=ERROR  2=WARN  3=INFO
//!            4=DEBUG  5=TRACE
//! ```
//!
//! The library itself only emits events. Coercion fallbacks, mount writes and
//! skipped flatten keys are reported at `debug`/`trace`, so a host that never
//! installs a subscriber sees nothing.

use bon::Builder;
use serde::{Deserialize, Deserializer};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{ToolkitError, ToolkitResult};

/// Log level (0-5) for configuration.
///
/// - 0: Silent - no output at all
/// - 1: Error - only errors
/// - 2: Warn - errors and warnings
/// - 3: Info - default, general information
/// - 4: Debug - coercion fallbacks and mount writes
/// - 5: Trace - every key visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(u8);

impl Default for LogLevel {
    fn default() -> Self {
        Self::INFO
    }
}

impl LogLevel {
    pub const SILENT: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const WARN: Self = Self(2);
    pub const INFO: Self = Self(3);
    pub const DEBUG: Self = Self(4);
    pub const TRACE: Self = Self(5);

    /// Convert from u8 value, returning None if out of range.
    #[must_use]
    pub const fn from_u8(level: u8) -> Option<Self> {
        if level <= 5 { Some(Self(level)) } else { None }
    }

    /// Get the raw u8 value.
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Convert to `EnvFilter` directive string.
    #[must_use]
    pub const fn to_filter_string(self) -> &'static str {
        match self.0 {
            0 => "off",
            1 => "error",
            2 => "warn",
            3 => "info",
            4 => "debug",
            _ => "trace",
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::from_u8(value).ok_or_else(|| {
            serde::de::Error::custom(format!("log level must be 0-5, got {value}"))
        })
    }
}

/// Configuration for the logging system.
///
/// Built in code or deserialized next to the toolkit options:
///
/// ```text
/// { "consoleLevel": 4, "showTimestamps": false }
/// ```
#[derive(Debug, Clone, Builder, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default = LogLevel::INFO)]
    console_level: LogLevel,
    #[builder(setters(name = with_show_timestamps), default = true)]
    show_timestamps: bool,
    #[builder(setters(name = with_show_target), default = true)]
    show_target: bool,
    #[builder(setters(name = with_ansi), default = true)]
    ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    #[must_use]
    pub const fn console_level(&self) -> LogLevel {
        self.console_level
    }

    #[must_use]
    pub const fn show_timestamps(&self) -> bool {
        self.show_timestamps
    }

    /// Check if target (module path) should be shown in output.
    #[must_use]
    pub const fn show_target(&self) -> bool {
        self.show_target
    }

    #[must_use]
    pub const fn ansi(&self) -> bool {
        self.ansi
    }

    /// Filter directive for this configuration.
    ///
    /// Library events are filtered at the configured level, everything else
    /// stays at `warn` so the host's own dependencies do not flood the console.
    #[must_use]
    pub fn filter_directive(&self) -> String {
        let level = self.console_level.to_filter_string();
        if self.console_level.as_u8() <= LogLevel::WARN.as_u8() {
            level.to_string()
        } else {
            format!("warn,vite_toolkit={level}")
        }
    }
}

/// Install a console subscriber for the library's diagnostics.
///
/// Hosts that already run their own `tracing` subscriber should skip this;
/// the library's events flow into whatever subscriber is installed.
///
/// # Errors
///
/// Returns [`ToolkitError::Logging`] if a global subscriber was already set.
///
/// # Example
///
/// ```no_run
/// use vite_toolkit::logging::{init_logging, LogConfig, LogLevel};
///
/// let config = LogConfig::builder()
///     .with_console_level(LogLevel::DEBUG)
///     .build();
///
/// init_logging(&config).expect("Failed to initialize logging");
/// tracing::info!("Logging initialized");
/// ```
pub fn init_logging(config: &LogConfig) -> ToolkitResult<()> {
    let filter = EnvFilter::new(config.filter_directive());

    let layer = fmt::layer()
        .with_target(config.show_target())
        .with_level(true)
        .with_ansi(config.ansi());

    let result = if config.show_timestamps() {
        tracing_subscriber::registry()
            .with(layer.with_filter(filter))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(layer.without_time().with_filter(filter))
            .try_init()
    };

    result.map_err(|e| ToolkitError::Logging(e.to_string().into_boxed_str()))
}
