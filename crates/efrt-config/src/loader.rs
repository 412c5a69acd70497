//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::file::{ConfigFile, DisplaySection, RuntimeSection};
use crate::settings::{DisplaySettings, RuntimeSettings};
use crate::{ConfigError, ConfigResult, PROJECT_CONFIG_FILE};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.efrt/config.toml) - lowest priority
/// 2. Project config (efrt.toml) - overrides global
/// 3. Environment variables (EFRT_*) - overrides project
/// 4. CLI flags - highest priority (handled by caller)
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Interpreter settings
    pub runtime: RuntimeSettings,

    /// Output settings
    pub display: DisplaySettings,

    /// Project file that contributed to this config, if any
    pub project_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Create a loader that reads the global config from `path` instead of
    /// the home directory
    pub fn with_global_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find efrt.toml, then layers it over the
    /// global config and applies environment overrides.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let project_file = Self::find_project_config(start_dir);
        let project = match &project_file {
            Some(path) => ConfigFile::load_from_file(path)?,
            None => ConfigFile::default(),
        };
        self.assemble(project, project_file)
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project = ConfigFile::load_from_file(config_path)?;
        self.assemble(project, Some(config_path.to_path_buf()))
    }

    fn assemble(
        &mut self,
        project: ConfigFile,
        project_file: Option<PathBuf>,
    ) -> ConfigResult<Config> {
        // Global config is optional and never fatal when missing
        let mut merged = match self.load_global_config() {
            Ok(global) => global,
            Err(ConfigError::HomeNotFound) => ConfigFile::default(),
            Err(e) => return Err(e),
        };
        merged.merge(&project);
        merged.merge(&Self::env_overrides()?);
        merged.validate()?;

        let (runtime, display) = merged.resolve();
        Ok(Config {
            runtime,
            display,
            project_file,
        })
    }

    /// Find the nearest efrt.toml by walking up the directory tree
    fn find_project_config(start_dir: &Path) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(PROJECT_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Load global configuration from ~/.efrt/config.toml
    fn load_global_config(&mut self) -> ConfigResult<ConfigFile> {
        if self.global_config_path.is_none() {
            self.global_config_path = Some(ConfigFile::global_config_path()?);
        }

        match self.global_config_path.as_deref() {
            Some(path) if path.exists() => ConfigFile::load_from_file(path),
            _ => Ok(ConfigFile::default()),
        }
    }

    /// Collect environment variable overrides
    ///
    /// Environment variables follow the pattern: EFRT_<KEY>
    /// Example: EFRT_STACK_CAPACITY=4096
    fn env_overrides() -> ConfigResult<ConfigFile> {
        let runtime = RuntimeSection {
            stack_capacity: env_number("EFRT_STACK_CAPACITY")?,
            heap_capacity: env_number("EFRT_HEAP_CAPACITY")?,
            max_cycles: env_number("EFRT_MAX_CYCLES")?,
            seed: env_number("EFRT_SEED")?,
            auto_zero: env::var("EFRT_AUTO_ZERO").ok().map(|v| parse_flag(&v)),
        };
        let display = DisplaySection {
            progress: env::var("EFRT_NO_PROGRESS").ok().map(|v| !parse_flag(&v)),
            summary: None,
        };

        Ok(ConfigFile {
            runtime: Some(runtime),
            display: Some(display),
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Check if a project file (efrt.toml) was found
    pub fn is_project(&self) -> bool {
        self.project_file.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime: RuntimeSettings::default(),
            display: DisplaySettings::default(),
            project_file: None,
        }
    }
}

fn env_number<T: FromStr>(name: &str) -> ConfigResult<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: name.to_string(),
                reason: format!("expected a non-negative integer, got '{}'", raw),
            }),
        Err(_) => Ok(None),
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}
