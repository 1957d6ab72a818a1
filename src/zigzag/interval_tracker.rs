//! Bookkeeping of open and closed intervals keyed by class identifiers.

use crate::barcode::{AnnotatedBarcodeCollection, BarcodeCollection, Interval};
use crate::error::{HomologyError, Result};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// An open interval: its dimension, start and current generator.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalDescriptor<I, G> {
    pub dimension: usize,
    pub start: I,
    pub generator: G,
}

/// Tracks intervals that are opened and closed over time.
///
/// Closed intervals are collected into an annotated barcode. By default
/// intervals are left-closed and right-open; an interval whose start equals
/// its end is discarded unless both ends are closed.
#[derive(Debug, Clone)]
pub struct IntervalTracker<K: Ord, I, G> {
    active: BTreeMap<K, IntervalDescriptor<I, G>>,
    inactive: AnnotatedBarcodeCollection<I, G>,
    left_closed: bool,
    right_closed: bool,
    min_dimension: usize,
    max_dimension: usize,
}

impl<K, I, G> IntervalTracker<K, I, G>
where
    K: Ord + Clone + Debug,
    I: Clone + PartialOrd + Debug,
    G: Clone,
{
    pub fn new() -> Self {
        Self {
            active: BTreeMap::new(),
            inactive: AnnotatedBarcodeCollection::new(),
            left_closed: true,
            right_closed: false,
            min_dimension: 0,
            max_dimension: usize::MAX,
        }
    }

    pub fn set_use_left_closed_intervals(&mut self, closed: bool) {
        self.left_closed = closed;
    }

    pub fn set_use_right_closed_intervals(&mut self, closed: bool) {
        self.right_closed = closed;
    }

    pub fn uses_left_closed_intervals(&self) -> bool {
        self.left_closed
    }

    pub fn uses_right_closed_intervals(&self) -> bool {
        self.right_closed
    }

    pub fn set_min_dimension(&mut self, dimension: usize) -> Result<()> {
        check_window(dimension, self.max_dimension)?;
        self.min_dimension = dimension;
        Ok(())
    }

    pub fn set_max_dimension(&mut self, dimension: usize) -> Result<()> {
        check_window(self.min_dimension, dimension)?;
        self.max_dimension = dimension;
        Ok(())
    }

    pub fn min_dimension(&self) -> usize {
        self.min_dimension
    }

    pub fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    fn in_window(&self, dimension: usize) -> bool {
        (self.min_dimension..=self.max_dimension).contains(&dimension)
    }

    pub fn start_interval(&mut self, key: K, start: I, dimension: usize, generator: G) -> Result<()> {
        if self.active.contains_key(&key) {
            return Err(HomologyError::DuplicateElement(format!("{:?}", key)));
        }
        self.active.insert(
            key,
            IntervalDescriptor {
                dimension,
                start,
                generator,
            },
        );
        Ok(())
    }

    /// Fails exactly when `end_interval(key, end)` would, without closing anything.
    pub fn check_end(&self, key: &K, end: &I) -> Result<()> {
        let descriptor = self
            .active
            .get(key)
            .ok_or_else(|| HomologyError::UnknownElement(format!("{:?}", key)))?;
        if *end < descriptor.start {
            return Err(HomologyError::IntervalEndsBeforeStart {
                start: format!("{:?}", descriptor.start),
                end: format!("{:?}", end),
            });
        }
        Ok(())
    }

    /// Closes the interval of `key` at `end`. On error nothing changes.
    pub fn end_interval(&mut self, key: &K, end: I) -> Result<()> {
        self.check_end(key, &end)?;
        let descriptor = match self.active.remove(key) {
            Some(descriptor) => descriptor,
            None => return Err(HomologyError::UnknownElement(format!("{:?}", key))),
        };
        let interval = Interval::new(descriptor.start, Some(end), self.left_closed, self.right_closed);
        if !interval.is_empty() && self.in_window(descriptor.dimension) {
            self.inactive
                .add_interval(descriptor.dimension, interval, descriptor.generator);
        }
        Ok(())
    }

    /// Closes every open interval at `end`, or none of them if any would
    /// end before its start.
    pub fn end_all_intervals(&mut self, end: I) -> Result<()> {
        let keys: Vec<K> = self.active.keys().cloned().collect();
        for key in &keys {
            self.check_end(key, &end)?;
        }
        for key in keys {
            self.end_interval(&key, end.clone())?;
        }
        Ok(())
    }

    pub fn update_generator(&mut self, key: &K, generator: G) -> Result<()> {
        match self.active.get_mut(key) {
            Some(descriptor) => {
                descriptor.generator = generator;
                Ok(())
            }
            None => Err(HomologyError::UnknownElement(format!("{:?}", key))),
        }
    }

    pub fn is_active(&self, key: &K) -> bool {
        self.active.contains_key(key)
    }

    pub fn active_generators(&self) -> &BTreeMap<K, IntervalDescriptor<I, G>> {
        &self.active
    }

    pub fn inactive_generators(&self) -> &AnnotatedBarcodeCollection<I, G> {
        &self.inactive
    }

    /// Closed intervals plus open ones reported as right-infinite.
    pub fn annotated_barcodes(&self) -> AnnotatedBarcodeCollection<I, G> {
        let mut barcodes = self.inactive.clone();
        for descriptor in self.active.values() {
            if self.in_window(descriptor.dimension) {
                barcodes.add_interval(
                    descriptor.dimension,
                    Interval::new(descriptor.start.clone(), None, self.left_closed, false),
                    descriptor.generator.clone(),
                );
            }
        }
        barcodes
    }

    pub fn barcodes(&self) -> BarcodeCollection<I> {
        self.annotated_barcodes().forget_generators()
    }

    /// Tracker with the same settings whose only intervals are the
    /// currently open ones, restarted at `start`.
    pub fn restarted_at(&self, start: I) -> Self {
        let mut restarted = Self::new();
        restarted.left_closed = self.left_closed;
        restarted.right_closed = self.right_closed;
        restarted.min_dimension = self.min_dimension;
        restarted.max_dimension = self.max_dimension;
        for (key, descriptor) in &self.active {
            restarted.active.insert(
                key.clone(),
                IntervalDescriptor {
                    dimension: descriptor.dimension,
                    start: start.clone(),
                    generator: descriptor.generator.clone(),
                },
            );
        }
        restarted
    }
}

fn check_window(min: usize, max: usize) -> Result<()> {
    if min > max {
        return Err(HomologyError::InconsistentDimensionWindow { min, max });
    }
    Ok(())
}

impl<K, I, G> Default for IntervalTracker<K, I, G>
where
    K: Ord + Clone + Debug,
    I: Clone + PartialOrd + Debug,
    G: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
