//! Configuration management for locmap.
//!
//! Configuration is stored in TOML. Every field has a default, so a missing
//! file, an empty file and a file that sets a single key are all valid.
//!
//! ## File Location
//!
//! - Linux: `~/.config/locmap/config.toml`
//! - macOS: `~/Library/Application Support/dev.outfitter.locmap/config.toml`
//! - Windows: `%APPDATA%\outfitter\locmap\config\config.toml`
//!
//! The CLI accepts `--config FILE` (or `LOCMAP_CONFIG`) to use another file.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [defaults]
//! fallback_language = "en_US"
//! default_view_priority = 16
//! priority_scale = 32.0
//!
//! [[localization.short_prefixes]]
//! code_prefix = "es"
//! path_prefix = "es"
//! ```
//!
//! ## Loading
//!
//! ```rust
//! use locmap_core::Config;
//!
//! let config: Config = toml::from_str("[defaults]\nfallback_language = \"fr_FR\"")?;
//! assert_eq!(config.defaults.fallback_language, "fr_FR");
//! assert_eq!(config.defaults.default_view_priority, 16);
//! # Ok::<(), toml::de::Error>(())
//! ```

use crate::enumerator::FALLBACK_LANGUAGE;
use crate::localize::{ShortPrefix, default_short_prefixes};
use crate::types::DEFAULT_VIEW_PRIORITY;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enumeration defaults.
    pub defaults: DefaultsConfig,
    /// Path localization rules.
    pub localization: LocalizationConfig,
}

/// Defaults applied to every enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Language code used when a website has no default language.
    pub fallback_language: String,

    /// View priority that means "not customized".
    ///
    /// Pages whose view has this priority are emitted without a sitemap
    /// priority.
    pub default_view_priority: i32,

    /// View priority that maps to a sitemap priority of `1.0`.
    ///
    /// Must be positive.
    pub priority_scale: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            fallback_language: FALLBACK_LANGUAGE.to_string(),
            default_view_priority: DEFAULT_VIEW_PRIORITY,
            priority_scale: 32.0,
        }
    }
}

/// Rules for language path prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Language code families that share a short path segment.
    ///
    /// Checked in order; the first rule whose `code_prefix` starts the
    /// language code wins. Languages matching no rule use their full code.
    pub short_prefixes: Vec<ShortPrefix>,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            short_prefixes: default_short_prefixes(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns the defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, or the
    /// file exists but cannot be read, parsed or validated.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, or the defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {e}")))?;

        Ok(())
    }

    /// Path of the configuration file in the platform config directory.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = directories::ProjectDirs::from("dev", "outfitter", "locmap")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.defaults.priority_scale.is_finite() && self.defaults.priority_scale > 0.0) {
            return Err(Error::Config(format!(
                "priority_scale must be positive, got {}",
                self.defaults.priority_scale
            )));
        }
        if self.defaults.fallback_language.trim().is_empty() {
            return Err(Error::Config("fallback_language must not be empty".into()));
        }
        if let Some(rule) = self
            .localization
            .short_prefixes
            .iter()
            .find(|rule| rule.code_prefix.is_empty() || rule.path_prefix.contains('/'))
        {
            return Err(Error::Config(format!(
                "invalid short prefix rule '{}' -> '{}'",
                rule.code_prefix, rule.path_prefix
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.defaults.fallback_language, "en_US");
        assert_eq!(config.defaults.default_view_priority, 16);
        assert_eq!(config.defaults.priority_scale, 32.0);
        assert_eq!(
            config.localization.short_prefixes,
            vec![ShortPrefix::new("es", "es")]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults]\ndefault_view_priority = 20\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.defaults.default_view_priority, 20);
        assert_eq!(config.defaults.fallback_language, "en_US");
        assert_eq!(config.localization.short_prefixes.len(), 1);
    }

    #[test]
    fn test_empty_short_prefix_list_disables_rule() {
        let config: Config = toml::from_str("[localization]\nshort_prefixes = []\n").unwrap();
        assert!(config.localization.short_prefixes.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.defaults.fallback_language = "nl_NL".to_string();
        config
            .localization
            .short_prefixes
            .push(ShortPrefix::new("pt", "pt"));

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults]\npriority_scale = 0.0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("priority_scale"));
    }

    #[test]
    fn test_rejects_invalid_short_prefix() {
        let mut config = Config::default();
        config
            .localization
            .short_prefixes
            .push(ShortPrefix::new("", "x"));
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.localization.short_prefixes = vec![ShortPrefix::new("es", "es/mx")];
        assert!(config.validate().is_err());
    }
}
