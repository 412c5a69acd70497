//! Progress spinner for long runs

use anyhow::Result;
use efrt_runtime::{ProgressObserver, ProgressSnapshot};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner on stderr fed by interpreter progress reports
///
/// indicatif hides the spinner when stderr is not a terminal.
pub struct Spinner {
    name: String,
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(name: &str) -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.green} {msg}")?,
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_message(format!("{}: starting", name));
        Ok(Self {
            name: name.to_string(),
            bar,
        })
    }

    /// Handle for clearing the spinner once the run is over
    pub fn handle(&self) -> ProgressBar {
        self.bar.clone()
    }
}

impl ProgressObserver for Spinner {
    fn on_progress(&mut self, snapshot: &ProgressSnapshot) {
        self.bar.set_message(describe(&self.name, snapshot));
    }
}

/// `<name>: <cursor> / <len>, <cycles> Cycles, Byte <char>`
pub fn describe(name: &str, snapshot: &ProgressSnapshot) -> String {
    format!(
        "{}: {} / {}, {} Cycles, Byte {}",
        name,
        snapshot.cursor,
        snapshot.len,
        snapshot.cycles,
        char::from(snapshot.byte).escape_default()
    )
}
