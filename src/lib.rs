// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! Helpers for the configuration phase of a Vite build: typed environment
//! variables, `define` entries for nested env, and dev-server proxies.
//!
//! # Crate Architecture
//!
//! ```text
//!                      host build config
//!                             |
//!               +-------------+-------------+
//!               v                           v
//!      ,------------------,          ,-------------,
//!      |     toolkit      |          |    proxy    |
//!      | mode / command   |          | shorthand ->|
//!      | load_env         |          | route map   |
//!      '--------+---------'          '-------------'
//!               |
//!               v
//!      ,------------------------------------,
//!      |                env                 |
//!      | loader -> transform -> flatten     |
//!      | mount target (process | Env)       |
//!      '-----------------+------------------'
//!                        v
//!                  value (coercion)
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use vite_toolkit::env::{flatten_env, transform_env};
//! use vite_toolkit::value::ConverterTable;
//!
//! let raw = [("VITE_APP".to_string(), r#"{"name":"demo","port":5173}"#.to_string())]
//!     .into_iter()
//!     .collect();
//! let env = transform_env(&raw, false, &ConverterTable::new());
//! let define = flatten_env("__ENV__", &env)?;
//!
//! assert_eq!(define["__ENV__.VITE_APP.name"], json!("\"demo\""));
//! assert_eq!(define["__ENV__.VITE_APP.port"], json!(5173));
//! # Ok::<(), vite_toolkit::error::FlattenError>(())
//! ```

pub mod env;
pub mod error;
pub mod logging;
pub mod proxy;
pub mod toolkit;
pub mod value;

pub use env::{flatten_env, transform_env};
pub use proxy::create_proxy;
pub use toolkit::{Toolkit, create_toolkit};
pub use value::convert_value;
