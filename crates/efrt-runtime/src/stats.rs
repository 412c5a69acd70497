//! Run statistics
//!
//! Diagnostic only: nothing here affects program semantics.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The cursor moved past the last byte
    Completed,
    /// The configured cycle budget ran out
    CycleLimit,
}

/// Summary of one program execution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    /// Program length in bytes
    pub bytes: usize,
    /// Instructions executed
    pub cycles: u64,
    /// Wall-clock time spent in the loop
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    pub termination: Termination,
}

impl RunStats {
    pub fn elapsed_ms(&self) -> f64 {
        millis(&self.elapsed)
    }

    /// JSON form used by `--json` summaries
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn millis(elapsed: &Duration) -> f64 {
    elapsed.as_nanos() as f64 / 1e6
}

fn serialize_millis<S>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(millis(elapsed))
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Executed {} bytes ({} cycles) in {} ms",
            self.bytes,
            self.cycles,
            self.elapsed_ms()
        )?;
        if self.termination == Termination::CycleLimit {
            f.write_str(" (cycle limit reached)")?;
        }
        Ok(())
    }
}
