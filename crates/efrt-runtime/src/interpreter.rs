//! Program interpreter
//!
//! Executes a byte program one instruction per cycle:
//! 1. fetch the byte under the cursor
//! 2. decode it through the opcode table
//! 3. execute it against the stack, heap and console
//! 4. advance the cursor (a taken `J` sets it instead)
//!
//! The run ends when the cursor moves past the last byte, or when the
//! optional cycle budget is spent.
//!
//! ## Operand order
//!
//! Binary operators pop `b` first and `a` second, then push `a op b`. A program
//! pushing `x`, `y` and then an operator therefore computes `x op y`:
//!
//! ```text
//! "53-" pushes 53 ('5'), pushes 51 ('3'), then 53 - 51 = 2
//! ```
//!
//! Digits are not special: every non-operator byte pushes its own code.

use crate::heap::EvictingHeap;
use crate::io::Console;
use crate::numeric::{self, finite_or_zero, truth};
use crate::opcode::Opcode;
use crate::parse::parse_lenient;
use crate::random::RandomSource;
use crate::stack::DropStack;
use crate::stats::{RunStats, Termination};
use crate::RuntimeError;
use chrono::Utc;
use efrt_config::RuntimeSettings;
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

/// Minimum time between two progress reports
const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

/// The clock is only consulted every 1024 cycles
const PROGRESS_CHECK_MASK: u64 = 0x3FF;

/// Per-run interpreter options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// `D` and `O` push 0.0 instead of reading input
    pub auto_zero: bool,
    pub stack_capacity: usize,
    pub heap_capacity: usize,
    /// Stop after this many cycles; `None` runs until the program ends
    pub max_cycles: Option<u64>,
}

impl RunOptions {
    pub fn with_auto_zero(mut self, auto_zero: bool) -> Self {
        self.auto_zero = auto_zero;
        self
    }

    pub fn with_stack_capacity(mut self, capacity: usize) -> Self {
        self.stack_capacity = capacity;
        self
    }

    pub fn with_heap_capacity(mut self, capacity: usize) -> Self {
        self.heap_capacity = capacity;
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: Option<u64>) -> Self {
        self.max_cycles = max_cycles;
        self
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from(&RuntimeSettings::default())
    }
}

impl From<&RuntimeSettings> for RunOptions {
    fn from(settings: &RuntimeSettings) -> Self {
        Self {
            auto_zero: settings.auto_zero,
            stack_capacity: settings.stack_capacity,
            heap_capacity: settings.heap_capacity,
            max_cycles: settings.max_cycles,
        }
    }
}

/// Where a running program currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Index of the byte about to execute
    pub cursor: usize,
    /// Program length
    pub len: usize,
    /// Cycles executed so far
    pub cycles: u64,
    /// Byte under the cursor
    pub byte: u8,
}

/// Receives periodic progress reports during long runs
pub trait ProgressObserver {
    fn on_progress(&mut self, snapshot: &ProgressSnapshot);
}

/// The ErrorFree virtual machine
pub struct Interpreter<R, W> {
    options: RunOptions,
    stack: DropStack,
    heap: EvictingHeap,
    console: Console<R, W>,
    random: RandomSource,
    observer: Option<Box<dyn ProgressObserver>>,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Create an interpreter with explicit console and random source
    pub fn new(options: RunOptions, console: Console<R, W>, random: RandomSource) -> Self {
        Self {
            options,
            stack: DropStack::new(options.stack_capacity),
            heap: EvictingHeap::new(options.heap_capacity),
            console,
            random,
            observer: None,
        }
    }

    /// Create an interpreter from resolved configuration
    pub fn from_settings(settings: &RuntimeSettings, console: Console<R, W>) -> Self {
        Self::new(
            RunOptions::from(settings),
            console,
            RandomSource::from_seed(settings.seed),
        )
    }

    /// Attach a progress observer
    pub fn with_observer(mut self, observer: Box<dyn ProgressObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Execute a program to completion
    ///
    /// Each run starts from a fresh stack and heap; they stay inspectable
    /// through [`stack`](Self::stack) and [`heap`](Self::heap) until the next
    /// run. The only possible error is a failure to write or flush program
    /// output.
    pub fn run(&mut self, program: &[u8]) -> Result<RunStats, RuntimeError> {
        self.stack = DropStack::new(self.options.stack_capacity);
        self.heap = EvictingHeap::new(self.options.heap_capacity);

        let len = program.len();
        let mut cursor = 0usize;
        let mut cycles = 0u64;
        let mut termination = Termination::Completed;
        let started = Instant::now();
        let mut last_report = started;

        while let Some(&byte) = program.get(cursor) {
            if self.options.max_cycles.is_some_and(|limit| cycles >= limit) {
                termination = Termination::CycleLimit;
                break;
            }

            if (cycles & PROGRESS_CHECK_MASK) == 0 {
                if let Some(observer) = self.observer.as_mut() {
                    let now = Instant::now();
                    if now.duration_since(last_report) >= PROGRESS_INTERVAL {
                        observer.on_progress(&ProgressSnapshot {
                            cursor,
                            len,
                            cycles,
                            byte,
                        });
                        last_report = now;
                    }
                }
            }

            cycles += 1;
            cursor = self.execute(Opcode::decode(byte), cursor, len)?;
        }

        self.console.flush()?;

        Ok(RunStats {
            bytes: len,
            cycles,
            elapsed: started.elapsed(),
            termination,
        })
    }

    /// Execute one instruction and return the next cursor position
    fn execute(
        &mut self,
        opcode: Opcode,
        cursor: usize,
        len: usize,
    ) -> Result<usize, RuntimeError> {
        match opcode {
            // ===== Arithmetic =====
            Opcode::Add => self.binary(|a, b| a + b),
            Opcode::Sub => self.binary(|a, b| a - b),
            Opcode::Mul => self.binary(|a, b| a * b),
            Opcode::Div => self.binary(numeric::divide),
            Opcode::Rem => self.binary(|a, b| a % b),
            Opcode::Pow => self.binary(f64::powf),

            // ===== Comparison =====
            Opcode::Equal => self.binary(|a, b| truth(a == b)),
            Opcode::Greater => self.binary(|a, b| truth(a > b)),
            Opcode::Less => self.binary(|a, b| truth(a < b)),

            // ===== Pure operators =====
            Opcode::Dup => {
                let top = self.stack.peek();
                self.stack.push(top);
            }
            Opcode::Swap => {
                let top = self.stack.pop();
                let below = self.stack.pop();
                self.stack.push(top);
                self.stack.push(below);
            }
            Opcode::Abs => self.unary(f64::abs),
            Opcode::Sign => self.unary(numeric::sign),
            Opcode::Sqrt => self.unary(numeric::sqrt),
            Opcode::Log10 => self.unary(numeric::log10),
            Opcode::Floor => self.unary(f64::floor),
            Opcode::Ceil => self.unary(f64::ceil),

            // ===== Console and environment =====
            Opcode::PutChar => {
                let ch = numeric::to_char(self.stack.pop());
                self.console.write_char(ch)?;
            }
            Opcode::PutNumber => {
                let text = numeric::format_number(self.stack.pop());
                self.console.write_line(&text)?;
            }
            Opcode::GetByte => {
                let value = if self.options.auto_zero {
                    0.0
                } else {
                    self.console.read_byte()?.map_or(-1.0, f64::from)
                };
                self.stack.push(value);
            }
            Opcode::GetNumber => {
                let value = if self.options.auto_zero {
                    0.0
                } else {
                    parse_lenient(&self.console.read_line()?.unwrap_or_default())
                };
                self.stack.push(value);
            }
            Opcode::Random => {
                let value = self.random.next_unit();
                self.stack.push(value);
            }
            Opcode::Time => self.stack.push(Utc::now().timestamp() as f64),

            // ===== Control flow and memory =====
            Opcode::Jump => {
                let offset = finite_or_zero(self.stack.pop());
                if offset != 0.0 {
                    return Ok(jump_target(cursor, offset, len));
                }
            }
            Opcode::Store => {
                let address = self.stack.pop();
                let value = self.stack.pop();
                self.heap.write(address, value);
            }
            Opcode::Load => {
                let address = self.stack.pop();
                self.stack.push(self.heap.read(address));
            }

            Opcode::Nop => {}
            Opcode::Literal(byte) => self.stack.push(f64::from(byte)),
        }
        Ok(cursor + 1)
    }

    #[inline]
    fn binary(&mut self, op: impl FnOnce(f64, f64) -> f64) {
        let b = self.stack.pop();
        let a = self.stack.pop();
        self.stack.push(op(a, b));
    }

    #[inline]
    fn unary(&mut self, op: impl FnOnce(f64) -> f64) {
        let value = self.stack.pop();
        self.stack.push(op(value));
    }

    /// Stack left behind by the last run
    pub fn stack(&self) -> &DropStack {
        &self.stack
    }

    /// Heap left behind by the last run
    pub fn heap(&self) -> &EvictingHeap {
        &self.heap
    }

    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Give back the console, e.g. to inspect captured output
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}

/// Landing index of a taken jump
///
/// Targets before the start wrap forward, targets at or past the end wrap
/// backward, by whole multiples of the program length. The result is floored.
/// Rounding on huge offsets is clamped into `0..=len`; landing on `len` ends
/// the run.
pub fn jump_target(cursor: usize, offset: f64, len: usize) -> usize {
    let len = len as f64;
    let mut target = cursor as f64 + offset;
    if target < 0.0 {
        target += (target.abs() / len).ceil() * len;
    } else if target >= len {
        target -= (target / len).floor() * len;
    }
    target.floor().clamp(0.0, len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::BufferConsole;

    fn run(program: &[u8]) -> Interpreter<std::io::Cursor<Vec<u8>>, Vec<u8>> {
        let mut interp = Interpreter::new(
            RunOptions::default().with_auto_zero(true),
            BufferConsole::buffered(""),
            RandomSource::seeded(0),
        );
        interp.run(program).unwrap();
        interp
    }

    #[test]
    fn test_jump_target_wraps_backward_past_start() {
        assert_eq!(jump_target(2, -5.0, 10), 7);
        assert_eq!(jump_target(0, -10.0, 10), 0);
        assert_eq!(jump_target(0, -25.0, 10), 5);
    }

    #[test]
    fn test_jump_target_wraps_forward_past_end() {
        assert_eq!(jump_target(8, 4.0, 10), 2);
        assert_eq!(jump_target(0, 10.0, 10), 0);
        assert_eq!(jump_target(9, 31.0, 10), 0);
    }

    #[test]
    fn test_jump_target_in_range_and_fractional() {
        assert_eq!(jump_target(1, 3.0, 10), 4);
        assert_eq!(jump_target(4, -2.5, 10), 1);
        assert_eq!(jump_target(3, 0.5, 10), 3);
    }

    #[test]
    fn test_jump_target_huge_offsets_stay_in_range() {
        assert!(jump_target(3, 1e300, 7) <= 7);
        assert!(jump_target(3, -1e300, 7) <= 7);
    }

    #[test]
    fn test_operand_order() {
        let interp = run(b"53-");
        assert_eq!(interp.stack().peek(), 2.0);
    }

    #[test]
    fn test_stack_and_heap_reset_between_runs() {
        let mut interp = Interpreter::new(
            RunOptions::default().with_auto_zero(true),
            BufferConsole::buffered(""),
            RandomSource::seeded(0),
        );
        interp.run(b"AB S").unwrap();
        assert_eq!(interp.heap().len(), 1);
        interp.run(b"").unwrap();
        assert!(interp.heap().is_empty());
        assert!(interp.stack().is_empty());
    }

    #[test]
    fn test_options_from_settings() {
        let settings = RuntimeSettings {
            stack_capacity: 3,
            heap_capacity: 5,
            max_cycles: Some(9),
            seed: Some(1),
            auto_zero: true,
        };
        let options = RunOptions::from(&settings);
        assert_eq!(options.stack_capacity, 3);
        assert_eq!(options.heap_capacity, 5);
        assert_eq!(options.max_cycles, Some(9));
        assert!(options.auto_zero);
    }
}
