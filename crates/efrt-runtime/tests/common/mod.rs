//! Shared test utilities
//!
//! Helpers for running byte programs against an in-memory console and
//! inspecting what they printed.

#![allow(dead_code)]

use efrt_runtime::io::BufferConsole;
use efrt_runtime::{Interpreter, RandomSource, RunOptions, RunStats};
use std::io::Cursor;

// Re-export testing utilities
pub use pretty_assertions::{assert_eq, assert_ne};

pub type TestInterpreter = Interpreter<Cursor<Vec<u8>>, Vec<u8>>;

/// Interpreter with auto-zero input and a fixed seed
pub fn auto_zero() -> TestInterpreter {
    Interpreter::new(
        RunOptions::default().with_auto_zero(true),
        BufferConsole::buffered(""),
        RandomSource::seeded(0),
    )
}

/// Interpreter reading from the given input
pub fn with_input(input: &str) -> TestInterpreter {
    Interpreter::new(
        RunOptions::default(),
        BufferConsole::buffered(input),
        RandomSource::seeded(0),
    )
}

/// Run a program and return the interpreter for inspection
pub fn run(program: &[u8]) -> TestInterpreter {
    let mut interp = auto_zero();
    interp.run(program).expect("in-memory output cannot fail");
    interp
}

/// Run a program and return everything it printed
pub fn output_of(program: &[u8]) -> String {
    run(program).console().output_text()
}

/// Run a program with input and return everything it printed
pub fn output_with_input(program: &[u8], input: &str) -> String {
    let mut interp = with_input(input);
    interp.run(program).expect("in-memory output cannot fail");
    interp.console().output_text()
}

/// Value left on top of the stack
pub fn top_of(program: &[u8]) -> f64 {
    run(program).stack().peek()
}

/// Run statistics for a program
pub fn stats_of(program: &[u8]) -> RunStats {
    auto_zero()
        .run(program)
        .expect("in-memory output cannot fail")
}

/// Assert that the program leaves `expected` on top of the stack
pub fn assert_top(program: &[u8], expected: f64) {
    let top = top_of(program);
    assert_eq!(
        top,
        expected,
        "program {:?} left {} on top",
        String::from_utf8_lossy(program),
        top
    );
}
