//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::env as keys;
use crate::error::{Error, Result};
use crate::types::LayoutParameters;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    pub app_name: String,
    /// The application version
    pub app_version: String,
    /// Initial values of the layout form and CLI flags
    pub defaults: LayoutParameters,
    /// JSON catalog replacing the built-in table
    pub catalog_path: Option<PathBuf>,
    /// Where the TUI writes its log
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            defaults: LayoutParameters::default(),
            catalog_path: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::from_lookup(|key| env::var(key).ok())?;

        // Fall back to a catalog in the user config directory when one exists
        if config.catalog_path.is_none() {
            config.catalog_path = default_catalog_path();
        }

        Ok(config)
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let defaults = &mut config.defaults;

        if let Some(v) = parse_var(&lookup, keys::LINES_PER_COLUMN, "Use a whole number such as 40")? {
            defaults.lines_per_column = v;
        }
        if let Some(v) =
            parse_var(&lookup, keys::CHARACTERS_PER_LINE, "Use a whole number such as 30")?
        {
            defaults.characters_per_line = v;
        }
        if let Some(v) = parse_var(&lookup, keys::COLUMN_WIDTH_CM, "Use a decimal such as 10.0")? {
            defaults.column_width_cm = v;
        }
        if let Some(v) = parse_var(&lookup, keys::RIGHT_MARGIN_CM, "Use a decimal such as 1.0")? {
            defaults.right_margin_cm = v;
        }
        if let Some(v) = parse_var(&lookup, keys::LEFT_MARGIN_CM, "Use a decimal such as 1.0")? {
            defaults.left_margin_cm = v;
        }
        if let Some(v) =
            parse_var(&lookup, keys::INTER_COLUMN_MARGIN_CM, "Use a decimal such as 1.4")?
        {
            defaults.inter_column_margin_cm = v;
        }

        config
            .defaults
            .validate()
            .map_err(|e| Error::config(e.to_string(), "Adjust the MANUSCRIPT_* layout variables"))?;

        config.catalog_path = lookup(keys::CATALOG).map(|p| expand_path(&p));
        config.log_file = lookup(keys::LOG_FILE).map(|p| expand_path(&p));

        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, hint: &'static str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::config(format!("{key}='{raw}' is not a valid number"), hint)),
    }
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).to_string())
}

/// `<config dir>/manuscript-length/catalog.json`, if present.
fn default_catalog_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("catalog.json"))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic, clippy::float_cmp)]

    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.defaults, LayoutParameters::default());
        assert!(config.catalog_path.is_none());
        assert!(config.log_file.is_none());
        assert_eq!(config.app_name(), "manuscript-length");
    }

    #[test]
    fn variables_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("MANUSCRIPT_LINES_PER_COLUMN", "42"),
            ("MANUSCRIPT_RIGHT_MARGIN_CM", "0.0"),
            ("MANUSCRIPT_INTER_COLUMN_MARGIN_CM", " 0.5 "),
            ("MANUSCRIPT_CATALOG", "/tmp/books.json"),
        ]))
        .unwrap();
        assert_eq!(config.defaults.lines_per_column, 42);
        assert_eq!(config.defaults.right_margin_cm, 0.0);
        assert_eq!(config.defaults.inter_column_margin_cm, 0.5);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/books.json")));
    }

    #[test]
    fn unparsable_value_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("MANUSCRIPT_COLUMN_WIDTH_CM", "wide")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("MANUSCRIPT_COLUMN_WIDTH_CM"));
    }

    #[test]
    fn below_minimum_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("MANUSCRIPT_CHARACTERS_PER_LINE", "0")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn blank_value_is_ignored() {
        let config =
            Config::from_lookup(lookup_from(&[("MANUSCRIPT_LEFT_MARGIN_CM", "  ")])).unwrap();
        assert_eq!(config.defaults.left_margin_cm, 1.0);
    }
}
