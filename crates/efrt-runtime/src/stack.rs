//! Bounded-drop operand stack
//!
//! A LIFO store of `f64` that never overflows and never underflows.
//!
//! Until the configured capacity is reached it behaves like an ordinary
//! growable stack. The first push that would grow the backing store past the
//! capacity switches the stack into *exhausted* mode for good: the backing
//! length is frozen and from then on pushes overwrite cells round-robin, so
//! the oldest surviving value is the one that gets dropped.
//!
//! ## Layout
//!
//! ```text
//! capacity 4, after pushing 1 2 3 4 5 6:
//!
//!   cells: [5][6][3][4]      avail = 4
//!              ^ pos = 2     (next write)
//!
//!   pop -> 6, pop -> 5, pop -> 4, pop -> 3, pop -> 0.0 (empty)
//! ```
//!
//! Popping an empty stack yields `0.0` and changes nothing.

/// Circular stack with an emulated capacity
#[derive(Debug, Clone)]
pub struct DropStack {
    /// Backing cells, grown lazily up to `capacity`
    cells: Vec<f64>,
    /// Maximum number of backing cells
    capacity: usize,
    /// Next write position
    pos: usize,
    /// Number of cells that can still be popped
    avail: usize,
    /// Set once growth was refused; never cleared
    exhausted: bool,
}

impl DropStack {
    /// Create an empty stack that may grow to `capacity` cells
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: Vec::new(),
            capacity,
            pos: 0,
            avail: 0,
            exhausted: false,
        }
    }

    /// Push a value, overwriting the oldest cell once exhausted
    pub fn push(&mut self, value: f64) {
        if !self.exhausted {
            if self.pos < self.cells.len() {
                self.cells[self.pos] = value;
                self.avail += 1;
                self.pos += 1;
                return;
            }
            if self.cells.len() < self.capacity {
                self.cells.push(value);
                self.avail += 1;
                self.pos += 1;
                return;
            }
            self.exhausted = true;
            self.pos = 0;
        }

        // Capacity 0: nothing to overwrite, the value is dropped
        if self.cells.is_empty() {
            return;
        }

        self.cells[self.pos] = value;
        self.avail = (self.avail + 1).min(self.cells.len());
        self.pos = (self.pos + 1) % self.cells.len();
    }

    /// Value in the cell just behind the write cursor
    ///
    /// Unlike [`pop`](Self::pop) this looks at the cell even when nothing is
    /// available to pop, as long as it was written at some point. A stack that
    /// never stored anything peeks as `0.0`.
    pub fn peek(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.cells[self.previous(self.pos)]
    }

    /// Pop the top value, or `0.0` when nothing is available
    pub fn pop(&mut self) -> f64 {
        if self.avail == 0 {
            return 0.0;
        }
        self.avail -= 1;
        self.pos = self.previous(self.pos);
        self.cells[self.pos]
    }

    /// Number of values that can be popped
    pub fn len(&self) -> usize {
        self.avail
    }

    pub fn is_empty(&self) -> bool {
        self.avail == 0
    }

    /// Number of backing cells allocated so far
    pub fn backing_len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the stack has switched to circular overwriting
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    #[inline]
    fn previous(&self, index: usize) -> usize {
        if index == 0 {
            self.cells.len() - 1
        } else {
            index - 1
        }
    }
}

impl Default for DropStack {
    fn default() -> Self {
        Self::new(efrt_config::settings::DEFAULT_STACK_CAPACITY)
    }
}
