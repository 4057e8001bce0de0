//! Configuration file support for depmap.
//!
//! depmap reads two configuration files:
//! - Global: `<config dir>/depmap/config.toml` - User-wide defaults
//! - Project: `<work dir>/.depmap/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default build definition file name.
pub const DEFAULT_BUILD_FILE_NAME: &str = "BUILD";

/// depmap configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resolution settings
    pub resolve: ResolveConfig,
}

/// Resolution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Import the dependency structure without requiring library artifacts
    pub preview: Option<bool>,

    /// Post-processing extensions to run, in order
    pub extensions: Vec<String>,

    /// Build definition file names (`BUILD` also matches `BUILD.*`)
    pub build_file_names: Option<Vec<String>>,
}

impl ResolveConfig {
    /// Configured build definition file names, or the default.
    pub fn build_file_names(&self) -> Vec<String> {
        self.build_file_names
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_BUILD_FILE_NAME.to_string()])
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing
    /// or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.resolve.preview.is_some() {
            self.resolve.preview = other.resolve.preview;
        }
        if !other.resolve.extensions.is_empty() {
            self.resolve.extensions = other.resolve.extensions;
        }
        if other.resolve.build_file_names.is_some() {
            self.resolve.build_file_names = other.resolve.build_file_names;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.depmap/config.toml)
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global depmap config path.
pub fn global_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.config_dir().join("depmap").join("config.toml"))
}

/// Get the project config path (.depmap/config.toml).
pub fn project_config_path(work_dir: &Path) -> PathBuf {
    work_dir.join(".depmap").join("config.toml")
}
