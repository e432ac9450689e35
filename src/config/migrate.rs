//! Configuration file checks: report keys missing from an older file and
//! rewrite it with defaults filled in.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

pub const KNOWN_KEYS: [&str; 6] = [
    "database",
    "user",
    "default_category",
    "week_start",
    "recent_sessions",
    "separator_char",
];

/// Keys of [`KNOWN_KEYS`] absent from the YAML text.
pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
    let yaml: Value = serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
    let map = yaml
        .as_mapping()
        .ok_or_else(|| AppError::Config("configuration is not a YAML mapping".into()))?;

    Ok(KNOWN_KEYS
        .into_iter()
        .filter(|k| !map.contains_key(*k))
        .collect())
}

/// Rewrite the file at `path` with every missing key set to its default.
/// Returns the keys that were added.
pub fn migrate_file(path: &Path) -> AppResult<Vec<&'static str>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let missing = missing_keys(&content)?;
    if missing.is_empty() {
        return Ok(missing);
    }

    let cfg = Config::from_yaml(&content)?;
    fs::write(path, cfg.to_yaml()?)?;
    Ok(missing)
}
