//! efrt Configuration System
//!
//! Provides configuration management for the efrt runtime:
//! - Global user configuration (~/.efrt/config.toml)
//! - Project configuration (efrt.toml)
//! - Environment variable overrides (EFRT_*)
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Global config (~/.efrt/config.toml)
//! 2. Project config (nearest efrt.toml, or an explicit file)
//! 3. Environment variables (EFRT_*)
//! 4. CLI flags (applied by the caller)
//!
//! # Example
//!
//! ```no_run
//! use efrt_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! println!("stack capacity: {}", config.runtime.stack_capacity);
//! ```

pub mod file;
pub mod loader;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = "efrt.toml";

// Re-export main types
pub use file::ConfigFile;
pub use loader::{Config, ConfigLoader};
pub use settings::{DisplaySettings, RuntimeSettings};
