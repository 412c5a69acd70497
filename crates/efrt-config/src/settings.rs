//! Resolved settings
//!
//! [`ConfigFile`] holds what a file said; the types here hold what a run
//! actually uses, with every default filled in.

use crate::file::ConfigFile;

/// Default emulated stack capacity (cells)
pub const DEFAULT_STACK_CAPACITY: usize = 1 << 20;

/// Default emulated heap capacity (resident addresses)
pub const DEFAULT_HEAP_CAPACITY: usize = 1 << 20;

/// Interpreter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub stack_capacity: usize,
    pub heap_capacity: usize,
    /// `None` means the run is never cut short
    pub max_cycles: Option<u64>,
    /// `None` draws randomness from the thread-local generator
    pub seed: Option<u64>,
    pub auto_zero: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            stack_capacity: DEFAULT_STACK_CAPACITY,
            heap_capacity: DEFAULT_HEAP_CAPACITY,
            max_cycles: None,
            seed: None,
            auto_zero: false,
        }
    }
}

/// Operator-facing output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    pub progress: bool,
    pub summary: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            progress: true,
            summary: true,
        }
    }
}

impl ConfigFile {
    /// Resolve this file on top of the built-in defaults
    pub fn resolve(&self) -> (RuntimeSettings, DisplaySettings) {
        let mut runtime = RuntimeSettings::default();
        let mut display = DisplaySettings::default();

        if let Some(section) = &self.runtime {
            if let Some(capacity) = section.stack_capacity {
                runtime.stack_capacity = capacity;
            }
            if let Some(capacity) = section.heap_capacity {
                runtime.heap_capacity = capacity;
            }
            runtime.max_cycles = section.max_cycles.or(runtime.max_cycles);
            runtime.seed = section.seed.or(runtime.seed);
            if let Some(auto_zero) = section.auto_zero {
                runtime.auto_zero = auto_zero;
            }
        }
        if let Some(section) = &self.display {
            if let Some(progress) = section.progress {
                display.progress = progress;
            }
            if let Some(summary) = section.summary {
                display.summary = summary;
            }
        }

        (runtime, display)
    }
}
