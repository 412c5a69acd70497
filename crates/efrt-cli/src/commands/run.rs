//! Run command - execute program files in order

use super::execute;
use crate::config::Session;
use crate::status;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Run each file in turn
///
/// A file that cannot be read or run is reported and skipped. The command
/// fails at the end if any file did.
pub fn run(files: &[impl AsRef<Path>], session: &Session) -> Result<()> {
    let mut failed = 0usize;
    for file in files {
        if let Err(err) = run_file(file.as_ref(), session) {
            status::error(format!("{:#}", err));
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} files failed", failed, files.len());
    }
    Ok(())
}

fn run_file(path: &Path, session: &Session) -> Result<()> {
    let name = display_name(path);
    status::info(session, format!("Running file \"{}\".", name));

    if !path.exists() {
        bail!("File \"{}\" could not be found.", path.display());
    }
    let program = fs::read(path)
        .with_context(|| format!("Error occurred while trying to read file \"{}\".", name))?;

    execute(&name, &program, session)?;
    status::info(session, format!("Finished running file \"{}\".", name));
    Ok(())
}

/// File name without its directory, falling back to the full path
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
