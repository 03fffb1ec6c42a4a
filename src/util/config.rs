//! Configuration file support for aim.
//!
//! aim supports two configuration file locations:
//! - Global: `~/.aim/config.toml` - User-wide defaults
//! - Build directory: `<build dir>/aim.toml` - Per-configuration overrides
//!
//! Build directory config takes precedence over global config. Neither is
//! the target file; they only tune how aim drives the build.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the per-build-directory config file.
pub const CONFIG_FILE_NAME: &str = "aim.toml";

/// aim configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Path to the ninja executable (None = search PATH)
    pub ninja: Option<PathBuf>,

    /// Default number of parallel jobs (None = let ninja decide)
    pub jobs: Option<usize>,

    /// Always emit compile_commands.json
    #[serde(default)]
    pub emit_compile_commands: bool,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
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

    /// Load the effective configuration for a build directory.
    pub fn for_build_dir(build_dir: &Path) -> Self {
        let project_path = project_config_path(build_dir);
        match global_config_path() {
            Some(global_path) => load_config(&global_path, &project_path),
            None => Self::load_or_default(&project_path),
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.ninja.is_some() {
            self.build.ninja = other.build.ninja;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
        if other.build.emit_compile_commands {
            self.build.emit_compile_commands = true;
        }
    }
}

/// Load merged configuration from global and build directory locations.
///
/// Order of precedence (highest to lowest):
/// 1. Build directory config (<build dir>/aim.toml)
/// 2. Global config (~/.aim/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global aim config directory (~/.aim).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".aim"))
}

/// Get the global config path (~/.aim/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the build directory config path (<build dir>/aim.toml).
pub fn project_config_path(build_dir: &Path) -> PathBuf {
    build_dir.join(CONFIG_FILE_NAME)
}
