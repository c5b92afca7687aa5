//! Centralized configuration and builder for dictionary resolution.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - ResolverConfig::from_env() reads MORPHDICT_* variables.
//! - ResolverBuilder returns a ResolverConfig, which Resolver will consume.
//!
//! Default-language policy:
//! - default_language (ENV MORPHDICT_DEFAULT_LANGUAGE) — language used for
//!   "", "default" and absent legacy identifiers. If None, the first language
//!   of the scanned installation (sorted) is used.
//! - default_variant (ENV MORPHDICT_DICTIONARY) — if set, those same legacy
//!   identifiers resolve to this exact variant instead.
//!
//! Extra locations:
//! - extra_paths (ENV MORPHDICT_PATH, OS path-list syntax) are scanned after
//!   the requested root; dictionaries from the root win on conflicts.

use std::fmt;
use std::path::PathBuf;

use crate::consts::{ENV_CACHE_SNAPSHOTS, ENV_DEFAULT_LANGUAGE, ENV_DICTIONARY, ENV_PATH};

/// Top-level configuration for `Resolver`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Language for the legacy default identifiers.
    /// Env: MORPHDICT_DEFAULT_LANGUAGE (default None = first installed language)
    pub default_language: Option<String>,

    /// Variant for the legacy default identifiers; overrides default_language.
    /// Env: MORPHDICT_DICTIONARY (default None)
    pub default_variant: Option<String>,

    /// Additional dictionary locations scanned after each root.
    /// Env: MORPHDICT_PATH (default empty)
    pub extra_paths: Vec<PathBuf>,

    /// Reuse snapshots per root between calls (rescan() refreshes).
    /// Env: MORPHDICT_CACHE_SNAPSHOTS = 0|1|true|false|on|off|yes|no (default true)
    pub cache_snapshots: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_language: None,
            default_variant: None,
            extra_paths: Vec::new(),
            cache_snapshots: true,
        }
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn non_empty(v: String) -> Option<String> {
    let s = v.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

impl ResolverConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var(ENV_DEFAULT_LANGUAGE) {
            cfg.default_language = non_empty(v).map(|s| s.to_ascii_lowercase());
        }

        if let Ok(v) = std::env::var(ENV_DICTIONARY) {
            cfg.default_variant = non_empty(v);
        }

        if let Some(v) = std::env::var_os(ENV_PATH) {
            cfg.extra_paths = std::env::split_paths(&v)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }

        if let Ok(v) = std::env::var(ENV_CACHE_SNAPSHOTS) {
            if let Some(on) = parse_bool(&v) {
                cfg.cache_snapshots = on;
            }
        }

        cfg
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_default_language<S: Into<String>>(mut self, lang: Option<S>) -> Self {
        self.default_language = lang.map(|s| s.into().to_ascii_lowercase());
        self
    }

    pub fn with_default_variant<S: Into<String>>(mut self, variant: Option<S>) -> Self {
        self.default_variant = variant.map(Into::into);
        self
    }

    pub fn with_extra_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.extra_paths = paths;
        self
    }

    pub fn with_cache_snapshots(mut self, on: bool) -> Self {
        self.cache_snapshots = on;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> Self {
        self
    }
}

impl fmt::Display for ResolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths: Vec<String> = self
            .extra_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        write!(
            f,
            "ResolverConfig {{ \
             default_language: {}, \
             default_variant: {}, \
             extra_paths: [{}], \
             cache_snapshots: {} \
             }}",
            self.default_language
                .as_deref()
                .unwrap_or("default(first installed)"),
            self.default_variant.as_deref().unwrap_or("none"),
            paths.join(", "),
            self.cache_snapshots,
        )
    }
}

/// Lightweight builder that produces a ResolverConfig.
/// Resolver exposes `Resolver::builder()` returning this builder.
#[derive(Clone, Debug)]
pub struct ResolverBuilder {
    cfg: ResolverConfig,
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        // Start from env, then allow overrides.
        Self {
            cfg: ResolverConfig::from_env(),
        }
    }
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: ResolverConfig::default(),
        }
    }

    pub fn default_language<S: Into<String>>(mut self, lang: Option<S>) -> Self {
        self.cfg = self.cfg.with_default_language(lang);
        self
    }

    pub fn default_variant<S: Into<String>>(mut self, variant: Option<S>) -> Self {
        self.cfg.default_variant = variant.map(Into::into);
        self
    }

    pub fn extra_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cfg.extra_paths.push(path.into());
        self
    }

    pub fn cache_snapshots(mut self, on: bool) -> Self {
        self.cfg.cache_snapshots = on;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> ResolverConfig {
        self.cfg
    }
}
