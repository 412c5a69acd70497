//! Run settings for one CLI invocation
//!
//! Layers the command-line flags over the loaded configuration (global file,
//! project file, `EFRT_*` environment).

use anyhow::{Context, Result};
use clap::Args;
use efrt_config::{Config, ConfigLoader, DisplaySettings, RuntimeSettings};
use std::env;
use std::num::{NonZeroU64, NonZeroUsize};
use std::path::PathBuf;

/// Flags shared by every command that runs a program
#[derive(Args, Debug, Clone, Default)]
pub struct RuntimeArgs {
    /// Make `D` and `O` push 0 instead of reading stdin
    #[arg(long, short = 'z')]
    pub auto_zero: bool,
    /// Seed for `R` and random program generation
    #[arg(long)]
    pub seed: Option<u64>,
    /// Stack capacity in cells
    #[arg(long)]
    pub stack_capacity: Option<NonZeroUsize>,
    /// Heap capacity in resident addresses
    #[arg(long)]
    pub heap_capacity: Option<NonZeroUsize>,
    /// Stop each run after this many cycles
    #[arg(long)]
    pub max_cycles: Option<NonZeroU64>,
    /// Use this config file instead of searching for efrt.toml
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Hide the progress spinner
    #[arg(long)]
    pub no_progress: bool,
    /// Suppress status lines and the run summary
    #[arg(long, short = 'q')]
    pub quiet: bool,
    /// Print the run summary as JSON
    #[arg(long, env = "EFRT_JSON")]
    pub json: bool,
}

/// Everything a command needs to know before running programs
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub runtime: RuntimeSettings,
    pub display: DisplaySettings,
    pub quiet: bool,
    pub json: bool,
}

impl RuntimeArgs {
    /// Load configuration and apply the flags on top
    pub fn resolve(&self) -> Result<Session> {
        let mut loader = ConfigLoader::new();
        let config = match &self.config {
            Some(path) => loader
                .load_from_file(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => {
                let cwd = env::current_dir().context("Failed to get current directory")?;
                loader
                    .load_from_directory(&cwd)
                    .context("Failed to load configuration")?
            }
        };
        Ok(self.apply(config))
    }

    /// Apply the flags to an already loaded configuration
    pub fn apply(&self, config: Config) -> Session {
        let mut runtime = config.runtime;
        let mut display = config.display;

        if self.auto_zero {
            runtime.auto_zero = true;
        }
        if let Some(seed) = self.seed {
            runtime.seed = Some(seed);
        }
        if let Some(capacity) = self.stack_capacity {
            runtime.stack_capacity = capacity.get();
        }
        if let Some(capacity) = self.heap_capacity {
            runtime.heap_capacity = capacity.get();
        }
        if let Some(limit) = self.max_cycles {
            runtime.max_cycles = Some(limit.get());
        }
        if self.no_progress {
            display.progress = false;
        }

        Session {
            runtime,
            display,
            quiet: self.quiet,
            json: self.json,
        }
    }
}

impl Session {
    /// Status lines are shown
    pub fn verbose(&self) -> bool {
        !self.quiet
    }

    /// The per-run summary is shown
    pub fn show_summary(&self) -> bool {
        !self.quiet && self.display.summary
    }

    /// The progress spinner is shown
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.display.progress
    }
}
