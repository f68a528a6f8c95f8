// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Development server proxy configuration.
//!
//! # Shorthand
//!
//! ```text
//! (prefix, target, rewrite?, options?)
//!
//! ["/api",        "http://x.cn/"]                     plain
//! ["/api/locale", "http://x.cn/", "/api"]             rewrite prefix
//! ["/api/test",   "http://x.cn/", null, {"ws":false}] override options
//! ["/api/https",  "https://x.cn/"]                    secure = false
//! ```
//!
//! # Resolution
//!
//! ```text
//! { target, changeOrigin: true, ws: true }
//!   <- options (minus target/rewrite)
//!   <- secure: false          if target is https://
//!   +  rewrite ^prefix -> r   if rewrite is non-empty
//! ```
//!
//! Routes keep the order they were given in, since the dev server uses the
//! first prefix that matches. A duplicate prefix replaces the earlier route
//! in its original position.


use indexmap::IndexMap;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Option keys only settable through the item's dedicated positions.
const RESERVED_OPTIONS: &[&str] = &["target", "rewrite"];

const SECURE_SCHEME: &str = "https://";

/// Resolved proxy routes keyed by path prefix, in declaration order.
pub type ProxyConfigMap = IndexMap<String, ProxyConfig>;

/// One proxy shorthand entry.
///
/// Deserializes from the tuple form `[prefix, target, rewrite?, options?]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProxyItem {
    prefix: String,
    target: String,
    #[serde(default)]
    rewrite: Option<String>,
    #[serde(default)]
    options: Option<Map<String, Value>>,
}

impl ProxyItem {
    #[must_use]
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            target: target.into(),
            rewrite: None,
            options: None,
        }
    }

    /// Replace a leading `prefix` in request paths with `rewrite`.
    #[must_use]
    pub fn with_rewrite(mut self, rewrite: impl Into<String>) -> Self {
        self.rewrite = Some(rewrite.into());
        self
    }

    /// Extra options merged over the defaults. `target` and `rewrite` keys
    /// are ignored.
    #[must_use]
    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = Some(options);
        self
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl From<(&str, &str)> for ProxyItem {
    fn from((prefix, target): (&str, &str)) -> Self {
        Self::new(prefix, target)
    }
}

impl From<(&str, &str, &str)> for ProxyItem {
    fn from((prefix, target, rewrite): (&str, &str, &str)) -> Self {
        Self::new(prefix, target).with_rewrite(rewrite)
    }
}

/// Anchored prefix replacement applied to request paths.
#[derive(Debug, Clone)]
pub struct PathRewrite {
    pattern: Regex,
    replacement: String,
}

impl PathRewrite {
    /// Rewrite paths starting with the literal `prefix` to start with
    /// `replacement` instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the escaped prefix exceeds the regex size limit.
    pub fn new(prefix: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&format!("^{}", regex::escape(prefix)))?,
            replacement: replacement.into(),
        })
    }

    /// Apply the rewrite; paths without the prefix are returned unchanged.
    #[must_use]
    pub fn apply(&self, path: &str) -> String {
        self.pattern
            .replace(path, NoExpand(&self.replacement))
            .into_owned()
    }

    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// A resolved proxy route.
///
/// Serializes to the options object; the rewrite callback is not data and is
/// left out.
#[derive(Debug, Clone, Serialize)]
pub struct ProxyConfig {
    target: String,
    #[serde(flatten)]
    options: Map<String, Value>,
    #[serde(skip)]
    rewrite: Option<PathRewrite>,
}

impl ProxyConfig {
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn change_origin(&self) -> bool {
        self.flag("changeOrigin").unwrap_or(false)
    }

    #[must_use]
    pub fn ws(&self) -> bool {
        self.flag("ws").unwrap_or(false)
    }

    /// `None` unless set by an override or forced for `https://` targets.
    #[must_use]
    pub fn secure(&self) -> Option<bool> {
        self.flag("secure")
    }

    /// Merged options, excluding `target`.
    #[must_use]
    pub const fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    #[must_use]
    pub const fn rewrite(&self) -> Option<&PathRewrite> {
        self.rewrite.as_ref()
    }

    /// Path forwarded to the target for an incoming request `path`.
    #[must_use]
    pub fn rewrite_path(&self, path: &str) -> String {
        self.rewrite
            .as_ref()
            .map_or_else(|| path.to_string(), |rewrite| rewrite.apply(path))
    }

    fn flag(&self, key: &str) -> Option<bool> {
        self.options.get(key).and_then(Value::as_bool)
    }
}

/// Build the dev-server proxy map from shorthand items.
///
/// # Example
///
/// ```
/// use vite_toolkit::proxy::create_proxy;
///
/// let proxy = create_proxy([("/api/locale", "http://x.test/", "/api")]);
/// let route = &proxy["/api/locale"];
/// assert!(route.change_origin() && route.ws());
/// assert_eq!(route.rewrite_path("/api/locale/foo"), "/api/foo");
/// ```
pub fn create_proxy<I, T>(items: I) -> ProxyConfigMap
where
    I: IntoIterator<Item = T>,
    T: Into<ProxyItem>,
{
    let mut proxy = ProxyConfigMap::new();
    for item in items {
        let ProxyItem {
            prefix,
            target,
            rewrite,
            options: overrides,
        } = item.into();

        let mut options = Map::new();
        options.insert("changeOrigin".to_string(), Value::Bool(true));
        options.insert("ws".to_string(), Value::Bool(true));

        for (key, value) in overrides.unwrap_or_default() {
            if RESERVED_OPTIONS.contains(&key.as_str()) {
                debug!(prefix, key, "Ignoring reserved proxy option");
                continue;
            }
            options.insert(key, value);
        }

        if target.starts_with(SECURE_SCHEME) {
            options.insert("secure".to_string(), Value::Bool(false));
        }

        let rewrite = rewrite
            .filter(|r| !r.is_empty())
            .and_then(|r| match PathRewrite::new(&prefix, r) {
                Ok(rewrite) => Some(rewrite),
                Err(e) => {
                    warn!(prefix, error = %e, "Skipping proxy rewrite");
                    None
                }
            });

        debug!(
            prefix,
            url = target.as_str(),
            rewrite = rewrite.as_ref().map(PathRewrite::replacement),
            "Proxy route"
        );

        if proxy
            .insert(
                prefix.clone(),
                ProxyConfig {
                    target,
                    options,
                    rewrite,
                },
            )
            .is_some()
        {
            debug!(prefix, "Duplicate proxy prefix, keeping the last one");
        }
    }
    proxy
}
