//! Configuration files (efrt.toml, ~/.efrt/config.toml)
//!
//! Both the global and the project file share one format. Every field is
//! optional so that a file only overrides what it names.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parsed contents of a configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Interpreter settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<RuntimeSection>,

    /// Status and progress output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplaySection>,
}

/// `[runtime]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RuntimeSection {
    /// Emulated stack capacity in cells
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_capacity: Option<usize>,

    /// Emulated heap capacity in resident addresses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heap_capacity: Option<usize>,

    /// Stop a run after this many cycles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cycles: Option<u64>,

    /// Seed for the `R` opcode and for random programs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Make `D` and `O` always read 0.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_zero: Option<bool>,
}

/// `[display]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct DisplaySection {
    /// Show the live progress spinner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<bool>,

    /// Print the summary after each run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<bool>,
}

impl ConfigFile {
    /// Load a configuration file from disk
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the values present in this file
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(runtime) = &self.runtime {
            if let Some(capacity) = runtime.stack_capacity {
                validate_nonzero("runtime.stack_capacity", capacity as u64)?;
            }
            if let Some(capacity) = runtime.heap_capacity {
                validate_nonzero("runtime.heap_capacity", capacity as u64)?;
            }
            if let Some(max_cycles) = runtime.max_cycles {
                validate_nonzero("runtime.max_cycles", max_cycles)?;
            }
        }
        Ok(())
    }

    /// Get the global config file path (~/.efrt/config.toml)
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".efrt").join("config.toml"))
    }

    /// Merge another file into this one.
    /// Values present in `other` take precedence, field by field.
    pub fn merge(&mut self, other: &ConfigFile) {
        if let Some(theirs) = &other.runtime {
            let ours = self.runtime.get_or_insert_with(Default::default);
            if theirs.stack_capacity.is_some() {
                ours.stack_capacity = theirs.stack_capacity;
            }
            if theirs.heap_capacity.is_some() {
                ours.heap_capacity = theirs.heap_capacity;
            }
            if theirs.max_cycles.is_some() {
                ours.max_cycles = theirs.max_cycles;
            }
            if theirs.seed.is_some() {
                ours.seed = theirs.seed;
            }
            if theirs.auto_zero.is_some() {
                ours.auto_zero = theirs.auto_zero;
            }
        }
        if let Some(theirs) = &other.display {
            let ours = self.display.get_or_insert_with(Default::default);
            if theirs.progress.is_some() {
                ours.progress = theirs.progress;
            }
            if theirs.summary.is_some() {
                ours.summary = theirs.summary;
            }
        }
    }
}

pub(crate) fn validate_nonzero(field: &str, value: u64) -> ConfigResult<()> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}
