//! Build configuration module.
//!
//! Handles loading and validating the optional `config.toml` at the content
//! root. Configuration is sparse: stock defaults cover everything, user config
//! files override only the values they care about.
//!
//! ## Config File Location
//!
//! Place `config.toml` next to the posts:
//!
//! ```text
//! content/
//! ├── config.toml              # Build config (optional)
//! ├── uuid-primary-keys.md
//! └── kafka-streams-binder.md
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [scan]
//! extensions = ["md", "markdown"]  # File extensions treated as posts
//!
//! [slugs]
//! max_len = 96                     # Truncation bound for filename-derived slugs
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Which files in the content directory count as posts.
    pub scan: ScanConfig,
    /// Slug derivation settings.
    pub slugs: SlugConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        if self
            .scan
            .extensions
            .iter()
            .any(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(ConfigError::Validation(
                "scan.extensions entries must be bare extensions like \"md\"".into(),
            ));
        }
        if self.slugs.max_len == 0 {
            return Err(ConfigError::Validation("slugs.max_len must be > 0".into()));
        }
        Ok(())
    }
}

/// File discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// File extensions (without the dot) treated as post documents.
    /// Everything else in the content tree is ignored.
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string(), "markdown".to_string()],
        }
    }
}

/// Slug derivation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlugConfig {
    /// Maximum length of a filename-derived slug. Longer stems are truncated
    /// at the last dash before the limit. Declared slugs are never touched.
    pub max_len: usize,
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self { max_len: 96 }
    }
}

/// Load config from `config.toml` in the given directory.
///
/// Returns stock defaults when no `config.toml` exists. Rejects unknown keys
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.scan.extensions, vec!["md", "markdown"]);
        assert_eq!(config.slugs.max_len, 96);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[slugs]\nmax_len = 40\n").unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.slugs.max_len, 40);
        assert_eq!(config.scan.extensions, vec!["md", "markdown"]);
    }

    #[test]
    fn unknown_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[slugs]\nmax_length = 40\n").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn empty_extensions_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[scan]\nextensions = []\n").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn dotted_extension_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[scan]\nextensions = [\".md\"]\n",
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn zero_max_len_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[slugs]\nmax_len = 0\n").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn malformed_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[scan\n").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }
}
