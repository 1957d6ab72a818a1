//! Dimension window and homology mode for a persistence computation.

use crate::error::{HomologyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Dimensions `min_dimension..=max_dimension` are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Lowest reported homological dimension
    pub min_dimension: usize,
    /// Highest reported homological dimension
    pub max_dimension: usize,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            min_dimension: 0,
            max_dimension: 2,
        }
    }
}

impl PersistenceConfig {
    pub fn new(min_dimension: usize, max_dimension: usize) -> Result<Self> {
        let config = Self {
            min_dimension,
            max_dimension,
        };
        config.validate()?;
        Ok(config)
    }

    /// Window `0..=max_dimension`
    pub fn up_to(max_dimension: usize) -> Self {
        Self {
            min_dimension: 0,
            max_dimension,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_dimension > self.max_dimension {
            return Err(HomologyError::InconsistentDimensionWindow {
                min: self.min_dimension,
                max: self.max_dimension,
            });
        }
        Ok(())
    }

    pub fn contains(&self, dimension: usize) -> bool {
        (self.min_dimension..=self.max_dimension).contains(&dimension)
    }
}

/// Absolute homology of the stream, or homology relative to a subcomplex.
///
/// In relative mode the subcomplex elements never enter the reduction and
/// are dropped from every boundary, which computes H(X, A).
#[derive(Debug, Clone)]
pub enum ChainPolicy<B> {
    Absolute,
    Relative { subcomplex: HashSet<B> },
}

impl<B: Eq + std::hash::Hash> PartialEq for ChainPolicy<B> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absolute, Self::Absolute) => true,
            (Self::Relative { subcomplex: a }, Self::Relative { subcomplex: b }) => a == b,
            _ => false,
        }
    }
}

impl<B: Eq + std::hash::Hash> Eq for ChainPolicy<B> {}

impl<B: Eq + std::hash::Hash> ChainPolicy<B> {
    pub fn relative(subcomplex: impl IntoIterator<Item = B>) -> Self {
        Self::Relative {
            subcomplex: subcomplex.into_iter().collect(),
        }
    }

    /// True when `element` is quotiented out.
    pub fn excludes(&self, element: &B) -> bool {
        match self {
            Self::Absolute => false,
            Self::Relative { subcomplex } => subcomplex.contains(element),
        }
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, Self::Relative { .. })
    }
}

impl<B> Default for ChainPolicy<B> {
    fn default() -> Self {
        Self::Absolute
    }
}
