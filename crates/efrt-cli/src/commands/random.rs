//! Random command - generate and run random bytes

use super::execute;
use crate::config::Session;
use crate::status;
use anyhow::{Context, Result};
use efrt_runtime::{random_program, RandomSource};
use std::fs;
use std::path::Path;

/// Name random programs run under
pub const RANDOM_PROGRAM_NAME: &str = "Random Bytes";

/// Generate `length` random bytes, optionally save them, then run them
pub fn run(length: usize, save: Option<&Path>, session: &Session) -> Result<()> {
    let program = generate(length, session);

    if let Some(path) = save {
        fs::write(path, &program)
            .with_context(|| format!("Failed to save random program to {}", path.display()))?;
        status::info(
            session,
            format!("Saved {} random bytes to \"{}\".", program.len(), path.display()),
        );
    }

    status::info(session, format!("Running file \"{}\".", RANDOM_PROGRAM_NAME));
    execute(RANDOM_PROGRAM_NAME, &program, &interpreter_session(session))?;
    status::info(
        session,
        format!("Finished running file \"{}\".", RANDOM_PROGRAM_NAME),
    );
    Ok(())
}

/// Program bytes, reproducible when a seed is configured
fn generate(length: usize, session: &Session) -> Vec<u8> {
    let mut source = RandomSource::from_seed(session.runtime.seed);
    random_program(length, &mut source)
}

/// Session for running the generated bytes
///
/// A configured seed is offset by one so `R` does not replay the stream
/// that produced the program.
fn interpreter_session(session: &Session) -> Session {
    let mut session = session.clone();
    session.runtime.seed = session.runtime.seed.map(|seed| seed.wrapping_add(1));
    session
}
