//! Betti Numbers: Topological Invariants
//!
//! The k-th Betti number βₖ counts the independent k-dimensional holes of
//! a space: β₀ components, β₁ loops, β₂ voids, and so on. For a barcode,
//! βₖ at a filtration index is the number of k-intervals containing it; the
//! Betti sequence of the final complex counts the infinite intervals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Betti numbers β₀, β₁, ... indexed by dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BettiNumbers {
    values: Vec<usize>,
}

impl BettiNumbers {
    /// Trailing zeros are dropped so that equal sequences compare equal.
    pub fn new(mut values: Vec<usize>) -> Self {
        while values.last() == Some(&0) {
            values.pop();
        }
        Self { values }
    }

    /// βₖ, zero beyond the stored range.
    pub fn get(&self, dimension: usize) -> usize {
        self.values.get(dimension).copied().unwrap_or(0)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.values
    }

    /// Total topological complexity Σ βₖ
    pub fn total(&self) -> usize {
        self.values.iter().sum()
    }

    /// Euler characteristic χ = Σ (-1)ᵏ βₖ
    pub fn euler_characteristic(&self) -> i64 {
        self.values
            .iter()
            .enumerate()
            .map(|(k, &b)| if k % 2 == 0 { b as i64 } else { -(b as i64) })
            .sum()
    }
}

impl fmt::Display for BettiNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (k, b) in self.values.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "β{}={}", k, b)?;
        }
        write!(f, ")")
    }
}
