// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Toolkit facade for a build configuration.
//!
//! # Lifecycle
//!
//! ```text
//! create_toolkit(config_env, options)   explicit value, pass it around
//! Toolkit::create_instance(..)          process-wide, first call wins
//! Toolkit::get_instance()               None until created
//! ```
//!
//! # Delegation
//!
//! ```text
//! load_env(mode?, dir?, prefixes?)
//!   EnvLoader::load ──RawEnv──> transform_env(mount flag, converters)
//!
//! load_flattened_env(name, mode?, dir?, prefixes?)
//!   load_env ──CoercedEnv──> flatten_env(name)
//!
//! is_dev/is_prod/is_test ──> eq_mode(key) ──> mode_mapping[key] == mode
//! is_build/is_serve      ──> eq_command(cmd) ──> command == cmd
//! ```

pub mod mode;
pub mod options;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::env::{
    CoercedEnv, DEFAULT_PREFIXES, EnvLoader, FlattenedEnv, ProcessEnvLoader, flatten_env,
    transform_env,
};
use crate::error::{ToolkitResult, load_failed};

pub use mode::{Command, ConfigEnv, ModeMapping};
pub use options::ToolkitOptions;

static INSTANCE: OnceLock<Toolkit> = OnceLock::new();

/// Mode/command introspection and env loading for one build invocation.
#[derive(Clone)]
pub struct Toolkit {
    config_env: ConfigEnv,
    options: ToolkitOptions,
    loader: Arc<dyn EnvLoader>,
}

impl fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolkit")
            .field("config_env", &self.config_env)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Toolkit {
    /// Creates a toolkit that loads variables from the process environment.
    #[must_use]
    pub fn new(config_env: ConfigEnv, options: ToolkitOptions) -> Self {
        Self {
            config_env,
            options,
            loader: Arc::new(ProcessEnvLoader),
        }
    }

    /// Replaces the environment loader.
    #[must_use]
    pub fn with_loader(mut self, loader: impl EnvLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    /// Returns the process-wide toolkit, creating it on the first call.
    ///
    /// Later calls return the first instance unchanged; their arguments are
    /// dropped.
    pub fn create_instance(config_env: ConfigEnv, options: ToolkitOptions) -> &'static Self {
        Self::new(config_env, options).install()
    }

    /// Makes this toolkit the process-wide instance unless one already exists.
    ///
    /// Returns the process-wide instance either way.
    pub fn install(self) -> &'static Self {
        let mut installed = false;
        let instance = INSTANCE.get_or_init(|| {
            installed = true;
            self
        });
        if installed {
            debug!(
                mode = instance.config_env.mode(),
                command = %instance.config_env.command(),
                "Toolkit instance created"
            );
        } else {
            debug!("Toolkit instance already exists, keeping the first one");
        }
        instance
    }

    /// Returns the process-wide toolkit if one was created.
    #[must_use]
    pub fn get_instance() -> Option<&'static Self> {
        INSTANCE.get()
    }

    #[must_use]
    pub const fn config_env(&self) -> &ConfigEnv {
        &self.config_env
    }

    #[must_use]
    pub const fn options(&self) -> &ToolkitOptions {
        &self.options
    }

    /// Load and coerce the environment for a mode.
    ///
    /// Defaults: the current mode, the current working directory and
    /// [`DEFAULT_PREFIXES`]. Coercion uses the toolkit's converter table and
    /// mounts into the process environment when the options allow it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ToolkitError::Load`] if the working directory
    /// cannot be determined or the loader fails.
    pub fn load_env(
        &self,
        mode: Option<&str>,
        dir: Option<&Path>,
        prefixes: Option<&[&str]>,
    ) -> ToolkitResult<CoercedEnv> {
        let mode = mode.unwrap_or_else(|| self.config_env.mode());
        let dir: PathBuf = match dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir()
                .map_err(|e| load_failed(format!("failed to read current directory: {e}")))?,
        };
        let prefixes: Vec<String> = prefixes
            .unwrap_or(DEFAULT_PREFIXES)
            .iter()
            .map(|p| (*p).to_string())
            .collect();

        debug!(mode, dir = %dir.display(), ?prefixes, "Loading env");
        let raw = self
            .loader
            .load(mode, &dir, &prefixes)
            .map_err(|e| load_failed(format!("{e:#}")))?;

        Ok(transform_env(
            &raw,
            self.options.allow_mount_to_process_env(),
            self.options.env_converter(),
        ))
    }

    /// Load the environment like [`Self::load_env`] and flatten it under
    /// `name`, ready to use as `define` entries.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ToolkitError::Load`] if loading fails, or
    /// [`crate::error::ToolkitError::Flatten`] if `name` is empty.
    pub fn load_flattened_env(
        &self,
        name: &str,
        mode: Option<&str>,
        dir: Option<&Path>,
        prefixes: Option<&[&str]>,
    ) -> ToolkitResult<FlattenedEnv> {
        let env = self.load_env(mode, dir, prefixes)?;
        Ok(flatten_env(name, &env)?)
    }

    /// The actual mode string for a logical mode name.
    #[must_use]
    pub fn get_mode(&self, key: &str) -> Option<&str> {
        self.options.mode_mapping().get(key)
    }

    /// Whether the current mode is the one mapped to `key`.
    #[must_use]
    pub fn eq_mode(&self, key: &str) -> bool {
        self.get_mode(key) == Some(self.config_env.mode())
    }

    #[must_use]
    pub fn is_dev(&self) -> bool {
        self.eq_mode(mode::DEV)
    }

    #[must_use]
    pub fn is_prod(&self) -> bool {
        self.eq_mode(mode::PROD)
    }

    #[must_use]
    pub fn is_test(&self) -> bool {
        self.eq_mode(mode::TEST)
    }

    #[must_use]
    pub fn eq_command(&self, command: Command) -> bool {
        self.config_env.command() == command
    }

    #[must_use]
    pub fn is_build(&self) -> bool {
        self.eq_command(Command::Build)
    }

    #[must_use]
    pub fn is_serve(&self) -> bool {
        self.eq_command(Command::Serve)
    }
}

/// Creates a standalone toolkit (not the process-wide instance).
#[must_use]
pub fn create_toolkit(config_env: ConfigEnv, options: ToolkitOptions) -> Toolkit {
    Toolkit::new(config_env, options)
}
