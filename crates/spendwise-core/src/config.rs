//! Application configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, else the override in the data dir
//!    (~/.local/share/spendwise/config.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Unknown keys are ignored so older binaries accept newer files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::insights::DEFAULT_UPCOMING_WINDOW_DAYS;
use crate::models::DEFAULT_CURRENCY;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/spendwise.toml");

const APP_DIR: &str = "spendwise";
const DB_FILE: &str = "spendwise.db";

/// Resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Explicit database path; `None` uses [`default_db_path`]
    pub db_path: Option<PathBuf>,
    /// Currency shown when budget settings have never been saved
    pub currency: String,
    pub upcoming_window_days: i64,
    /// Where exports land; `None` means the current directory
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            currency: DEFAULT_CURRENCY.to_string(),
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
            export_dir: None,
        }
    }
}

impl Config {
    /// Load config, preferring `path` over the data-dir override
    ///
    /// An explicit path that does not exist is an error; a missing data-dir
    /// override silently falls back to the embedded defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => read_config(path)?,
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => read_config(&default_path)?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }

    /// Database path to open
    pub fn resolved_db_path(&self) -> Option<PathBuf> {
        self.db_path.clone().or_else(default_db_path)
    }

    /// Directory to write exports into
    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

fn read_config(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "Reading config");
    fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Default database location
pub fn default_db_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join(APP_DIR).join(DB_FILE))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    storage: Option<RawStorage>,
    display: Option<RawDisplay>,
    insights: Option<RawInsights>,
    export: Option<RawExport>,
}

#[derive(Debug, Deserialize)]
struct RawStorage {
    db_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    upcoming_window_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawExport {
    directory: Option<PathBuf>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(storage) = raw.storage {
        config.db_path = storage.db_path;
    }

    if let Some(display) = raw.display {
        if let Some(currency) = display.currency {
            config.currency = currency.trim().to_uppercase();
        }
    }

    if let Some(insights) = raw.insights {
        if let Some(days) = insights.upcoming_window_days {
            if days < 0 {
                return Err(Error::Config(format!(
                    "upcoming_window_days must not be negative, got {}",
                    days
                )));
            }
            config.upcoming_window_days = days;
        }
    }

    if let Some(export) = raw.export {
        config.export_dir = export.directory;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_overrides() {
        let config = parse_config(
            r#"
            [storage]
            db_path = "/tmp/money.db"

            [display]
            currency = "eur"

            [insights]
            upcoming_window_days = 14

            [export]
            directory = "out"

            [future]
            something = true
            "#,
        )
        .unwrap();

        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/money.db")));
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.upcoming_window_days, 14);
        assert_eq!(config.resolved_export_dir(), PathBuf::from("out"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(parse_config("[display"), Err(Error::Config(_))));
        assert!(matches!(
            parse_config("[insights]\nupcoming_window_days = -1"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display]\ncurrency = \"GBP\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.currency, "GBP");

        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}
