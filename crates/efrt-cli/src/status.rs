//! Status output on stderr
//!
//! Program output owns stdout; everything the runtime says about a run goes
//! to stderr with an `efrt:` prefix. `colored` drops the colors when
//! `NO_COLOR` is set.

use crate::config::Session;
use colored::Colorize;
use efrt_runtime::RunStats;
use std::fmt::Display;

const PREFIX: &str = "efrt:";

/// Informational line, hidden with `--quiet`
pub fn info(session: &Session, message: impl Display) {
    if session.verbose() {
        eprintln!("{} {}", PREFIX.cyan().bold(), message);
    }
}

/// Warning line, hidden with `--quiet`
pub fn warn(session: &Session, message: impl Display) {
    if session.verbose() {
        eprintln!("{} {}", PREFIX.cyan().bold(), message.to_string().yellow());
    }
}

/// Error line, always shown
pub fn error(message: impl Display) {
    eprintln!("{} {}", PREFIX.cyan().bold(), message.to_string().red());
}

/// Summary of one finished run
pub fn summary(session: &Session, stats: &RunStats) {
    if !session.show_summary() {
        return;
    }
    if session.json {
        eprintln!("{}", stats.to_json());
    } else {
        info(session, stats);
    }
}
