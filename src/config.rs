//! Configuration module for replacr
//!
//! Persistent defaults for options that rarely change between runs. Values
//! come from an optional `config.toml` in the user's config directory
//! (`~/.config/replacr/config.toml` on Linux), overridden by `REPLACR_*`
//! environment variables. Command-line flags override both.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Default number of files processed concurrently
pub const DEFAULT_THREADS: usize = 20;

const fn default_threads() -> usize {
    DEFAULT_THREADS
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReplacrConfig {
    /// Number of files processed concurrently (worker pool size)
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Treat an empty file list as success
    #[serde(default)]
    pub ignore_empty: bool,

    /// Emit per-file reports by default
    #[serde(default)]
    pub verbose: bool,
}

impl Default for ReplacrConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            ignore_empty: false,
            verbose: false,
        }
    }
}

impl ReplacrConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("replacr").join("config.toml"))
    }

    /// Load configuration from the user config file and environment
    ///
    /// A missing config file (or config directory) is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or an environment value cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path().ok();
        Self::load_from(path.as_deref())
    }

    /// Load configuration from a specific file (if any) and the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or an environment value cannot be parsed.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let settings = builder
            .add_source(Environment::with_prefix("REPLACR").try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestTree;

    #[test]
    fn test_default_config() {
        let config = ReplacrConfig::default();
        assert_eq!(config.threads, DEFAULT_THREADS);
        assert!(!config.ignore_empty);
        assert!(!config.verbose);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tree = TestTree::new();
        let config = ReplacrConfig::load_from(Some(&tree.path("absent.toml"))).unwrap();
        assert_eq!(config.threads, DEFAULT_THREADS);
    }

    #[test]
    fn test_file_values_are_read() {
        let tree = TestTree::new();
        let path = tree.file("config.toml", "threads = 4\nignore_empty = true\n");
        let config = ReplacrConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.threads, 4);
        assert!(config.ignore_empty);
        assert!(!config.verbose);
    }

    #[test]
    fn test_invalid_value_is_error() {
        let tree = TestTree::new();
        let path = tree.file("config.toml", "threads = \"many\"\n");
        assert!(ReplacrConfig::load_from(Some(&path)).is_err());
    }

    #[test]
    fn test_config_path_location() {
        if let Ok(path) = ReplacrConfig::config_path() {
            assert!(path.ends_with("replacr/config.toml"));
        }
    }
}
