pub mod random;
pub mod run;

use crate::config::Session;
use crate::progress::Spinner;
use crate::status;
use anyhow::{Context, Result};
use efrt_runtime::io::StdConsole;
use efrt_runtime::{Interpreter, RunStats};

/// Run one program against the process streams and report on it
///
/// `name` is what status lines and the spinner call the program.
pub fn execute(name: &str, program: &[u8], session: &Session) -> Result<RunStats> {
    let mut interp = Interpreter::from_settings(&session.runtime, StdConsole::stdio());

    let spinner = if session.show_progress() {
        let spinner = Spinner::start(name)?;
        let handle = spinner.handle();
        interp = interp.with_observer(Box::new(spinner));
        Some(handle)
    } else {
        None
    };

    let result = interp.run(program);
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let stats = result.with_context(|| format!("Failed while running {}", name))?;

    status::summary(session, &stats);
    if stats.termination == efrt_runtime::Termination::CycleLimit {
        status::warn(session, format!("Stopped \"{}\" at the cycle limit.", name));
    }
    Ok(stats)
}
