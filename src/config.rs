//! Environment-driven configuration shared by the CLI and the catalog loader.
//!
//! Every knob is an `HTTPCODES_*` environment variable; command-line flags
//! override the environment through `Settings::with_overrides`.

use std::collections::BTreeSet;
use std::env;
use std::path::PathBuf;

/// Path to a catalog document used instead of the embedded table.
pub const ENV_CATALOG: &str = "HTTPCODES_CATALOG";
/// Directory holding per-code illustration and share images.
pub const ENV_ASSETS: &str = "HTTPCODES_ASSETS";
/// Comma- or whitespace-separated schema versions accepted in addition to the default.
pub const ENV_ALLOWED_CATALOG_SCHEMAS: &str = "HTTPCODES_ALLOWED_CATALOG_SCHEMAS";
/// `tracing` filter directive; falls back to `RUST_LOG`, then `DEFAULT_LOG_FILTER`.
pub const ENV_LOG: &str = "HTTPCODES_LOG";

pub const DEFAULT_SCHEMA_VERSION: &str = "http_status_catalog_v1";
pub const DEFAULT_LOG_FILTER: &str = "warn";
const VERBOSE_LOG_FILTER: &str = "httpcodes=debug";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Resolved runtime settings.
pub struct Settings {
    pub catalog_path: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
    pub log_filter: String,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup so tests avoid mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            catalog_path: non_empty(ENV_CATALOG).map(PathBuf::from),
            assets_dir: non_empty(ENV_ASSETS).map(PathBuf::from),
            log_filter: non_empty(ENV_LOG)
                .or_else(|| non_empty("RUST_LOG"))
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Apply command-line flags on top of the environment.
    pub fn with_overrides(
        mut self,
        catalog_path: Option<PathBuf>,
        assets_dir: Option<PathBuf>,
        verbose: bool,
    ) -> Self {
        if catalog_path.is_some() {
            self.catalog_path = catalog_path;
        }
        if assets_dir.is_some() {
            self.assets_dir = assets_dir;
        }
        if verbose {
            self.log_filter = VERBOSE_LOG_FILTER.to_string();
        }
        self
    }
}

/// Schema versions the catalog loader accepts.
pub fn allowed_schema_versions() -> BTreeSet<String> {
    allowed_schema_versions_from(env::var(ENV_ALLOWED_CATALOG_SCHEMAS).ok().as_deref())
}

fn allowed_schema_versions_from(raw: Option<&str>) -> BTreeSet<String> {
    let mut versions: BTreeSet<String> = BTreeSet::new();
    versions.insert(DEFAULT_SCHEMA_VERSION.to_string());
    if let Some(raw) = raw {
        versions.extend(split_list(raw));
    }
    versions
}

/// Split comma- or whitespace-delimited configuration lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
