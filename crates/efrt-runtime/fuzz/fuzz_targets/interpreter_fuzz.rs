//! Interpreter stability fuzzer
//!
//! Every byte string is a valid program, so the whole input is executed.
//! The first byte, when present, also selects small storage capacities so
//! the overwrite and eviction paths are reached quickly.
//!
//! Stability contracts:
//! - The interpreter never panics on any program
//! - Runs terminate within the cycle budget
//! - Stack and heap never exceed their capacities
//! - Execution is deterministic for a fixed seed, clock reads aside

#![no_main]

use libfuzzer_sys::fuzz_target;

use efrt_runtime::io::BufferConsole;
use efrt_runtime::{Interpreter, RandomSource, RunOptions};

const CYCLE_BUDGET: u64 = 50_000;

fuzz_target!(|data: &[u8]| {
    let (stack_capacity, heap_capacity) = match data.first() {
        Some(&selector) => (usize::from(selector & 0x0F), usize::from(selector >> 4)),
        None => (16, 16),
    };
    let options = RunOptions::default()
        .with_auto_zero(false)
        .with_stack_capacity(stack_capacity)
        .with_heap_capacity(heap_capacity)
        .with_max_cycles(Some(CYCLE_BUDGET));

    let first = run_once(data, options);
    // `T` reads the wall clock
    if !data.contains(&b'T') {
        let second = run_once(data, options);
        assert_eq!(first, second, "same program and seed produced different output");
    }
});

fn run_once(program: &[u8], options: RunOptions) -> (Vec<u8>, u64) {
    // Feed the program to itself as input
    let mut interp = Interpreter::new(
        options,
        BufferConsole::buffered(program.to_vec()),
        RandomSource::seeded(0),
    );
    let stats = match interp.run(program) {
        Ok(stats) => stats,
        Err(err) => panic!("in-memory output failed: {}", err),
    };

    assert!(stats.cycles <= CYCLE_BUDGET);
    assert!(interp.stack().len() <= options.stack_capacity);
    assert!(interp.heap().len() <= options.heap_capacity);

    let (_, output) = interp.into_console().into_parts();
    (output, stats.cycles)
}
