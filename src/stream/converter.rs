//! Relabeling of integer filtration indices with real filtration values.
//!
//! A converter only changes how interval endpoints are displayed; it never
//! changes which intervals are computed.

use serde::{Deserialize, Serialize};

pub trait FiltrationConverter: Send + Sync {
    fn filtration_value(&self, index: usize) -> f64;
}

impl<F: Fn(usize) -> f64 + Send + Sync> FiltrationConverter for F {
    fn filtration_value(&self, index: usize) -> f64 {
        self(index)
    }
}

/// `index as f64`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityConverter;

impl FiltrationConverter for IdentityConverter {
    fn filtration_value(&self, index: usize) -> f64 {
        index as f64
    }
}

/// `origin + step · index`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearConverter {
    pub origin: f64,
    pub step: f64,
}

impl LinearConverter {
    pub fn new(origin: f64, step: f64) -> Self {
        Self { origin, step }
    }

    /// Evenly spaced values from 0 to `max_value` over `steps` indices.
    pub fn with_max_value(max_value: f64, steps: usize) -> Self {
        Self::new(0.0, max_value / steps.max(1) as f64)
    }
}

impl FiltrationConverter for LinearConverter {
    fn filtration_value(&self, index: usize) -> f64 {
        self.origin + self.step * index as f64
    }
}

/// Lookup table; indices past the end map to the last value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplicitConverter {
    values: Vec<f64>,
}

impl ExplicitConverter {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl FiltrationConverter for ExplicitConverter {
    fn filtration_value(&self, index: usize) -> f64 {
        match self.values.get(index).or_else(|| self.values.last()) {
            Some(&value) => value,
            None => index as f64,
        }
    }
}
