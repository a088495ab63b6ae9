//! Totally ordered cost values.
//!
//! Action costs and heuristic estimates are plain `f64` at the API boundary.
//! Frontiers need a total order, so priorities are wrapped in [`Cost`], which
//! orders by [`f64::total_cmp`]. A NaN priority sorts after every finite value
//! and after positive infinity; it never panics a heap.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

/// An `f64` with a total order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cost(pub f64);

impl Cost {
    /// The zero cost.
    pub const ZERO: Cost = Cost(0.0);

    /// The raw value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Cost {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Self) -> Self::Output {
        Cost(self.0 + rhs.0)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
