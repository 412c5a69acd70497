//! efrt Runtime - the ErrorFree virtual machine
//!
//! This library provides everything needed to execute an ErrorFree program:
//! - A bounded stack that overwrites instead of overflowing
//! - A sparse heap that evicts instead of running out of room
//! - Byte-to-opcode decoding and the numeric coercion rules
//! - The interpreter loop with explicit console and random-source handles
//!
//! No instruction can fail. Empty pops, unwritten heap cells, division by
//! zero and out-of-range jumps all have a defined numeric outcome.

/// efrt runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod heap;
pub mod interpreter;
pub mod io;
pub mod numeric;
pub mod opcode;
pub mod parse;
pub mod random;
pub mod stack;
pub mod stats;

use thiserror::Error;

/// Host-level failures
///
/// The language itself has no errors; this only covers the process around it.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Writing program output failed (closed pipe, full disk, ...)
    #[error("Failed to write program output: {0}")]
    Output(#[from] std::io::Error),
}

// Re-export commonly used types
pub use heap::EvictingHeap;
pub use interpreter::{Interpreter, ProgressObserver, ProgressSnapshot, RunOptions};
pub use io::Console;
pub use opcode::Opcode;
pub use parse::parse_lenient;
pub use random::{random_program, RandomSource};
pub use stack::DropStack;
pub use stats::{RunStats, Termination};
