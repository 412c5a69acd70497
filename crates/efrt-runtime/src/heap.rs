//! Farthest-eviction heap
//!
//! Sparse memory addressed by floored `f64`. Reading an address that was
//! never written (or was evicted) returns `0.0`.
//!
//! The heap accepts new addresses until its capacity is reached. After that
//! it is *exhausted*: a write to a new address first evicts whichever of the
//! lowest or highest resident address lies farther from it, ties evicting
//! the highest. Overwriting a resident address never evicts anything.
//!
//! The resident addresses live in a single `BTreeMap`, which gives ordered
//! access to both extremes alongside the values.

use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

type Address = OrderedFloat<f64>;

/// Sparse heap with an emulated capacity
#[derive(Debug, Clone)]
pub struct EvictingHeap {
    cells: BTreeMap<Address, f64>,
    capacity: usize,
    exhausted: bool,
}

impl EvictingHeap {
    /// Create an empty heap holding at most `capacity` addresses
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: BTreeMap::new(),
            capacity,
            exhausted: false,
        }
    }

    /// Store `value` at `address`
    ///
    /// NaN and infinite addresses are treated as `0.0`; every address is
    /// floored before use.
    pub fn write(&mut self, address: f64, value: f64) {
        let address = normalize_address(address);
        let key = OrderedFloat(address);

        if let Some(cell) = self.cells.get_mut(&key) {
            *cell = value;
            return;
        }

        if !self.exhausted {
            if self.cells.len() < self.capacity {
                self.cells.insert(key, value);
                return;
            }
            self.exhausted = true;
        }

        let (min, max) = match (self.cells.keys().next(), self.cells.keys().next_back()) {
            (Some(min), Some(max)) => (min.0, max.0),
            // Capacity 0: the write is dropped
            _ => return,
        };

        let dist_to_min = address - min;
        let dist_to_max = max - address;
        if dist_to_min > dist_to_max {
            self.cells.pop_first();
        } else {
            self.cells.pop_last();
        }
        self.cells.insert(key, value);
    }

    /// Load the value at `address`, or `0.0` if it is not resident
    pub fn read(&self, address: f64) -> f64 {
        // -0.0 and 0.0 compare equal, so flooring alone is enough here
        self.cells
            .get(&OrderedFloat(address.floor()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of resident addresses
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether new addresses now evict old ones
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Resident addresses in ascending order
    pub fn addresses(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.keys().map(|key| key.0)
    }

    pub fn min_address(&self) -> Option<f64> {
        self.cells.keys().next().map(|key| key.0)
    }

    pub fn max_address(&self) -> Option<f64> {
        self.cells.keys().next_back().map(|key| key.0)
    }
}

impl Default for EvictingHeap {
    fn default() -> Self {
        Self::new(efrt_config::settings::DEFAULT_HEAP_CAPACITY)
    }
}

/// NaN/infinity become 0, then floor; `-0.0` is folded into `0.0`
fn normalize_address(address: f64) -> f64 {
    if address.is_finite() {
        address.floor() + 0.0
    } else {
        0.0
    }
}
