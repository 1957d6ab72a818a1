//! Barcodes grouped by homological dimension.

use super::{BettiNumbers, Interval};
use crate::stream::FiltrationConverter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Intervals keyed by dimension.
///
/// Equality compares, per dimension, the intervals as multisets, so two
/// collections built in different orders are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarcodeCollection<I> {
    intervals: BTreeMap<usize, Vec<Interval<I>>>,
}

impl<I> BarcodeCollection<I> {
    pub fn new() -> Self {
        Self { intervals: BTreeMap::new() }
    }

    pub fn add_interval(&mut self, dimension: usize, interval: Interval<I>) {
        self.intervals.entry(dimension).or_default().push(interval);
    }

    /// Adds `[start, ∞)`.
    pub fn add_right_infinite_interval(&mut self, dimension: usize, start: I) {
        self.add_interval(dimension, Interval::right_infinite(start));
    }

    pub fn intervals(&self, dimension: usize) -> &[Interval<I>] {
        self.intervals.get(&dimension).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dimensions with at least one interval, ascending.
    pub fn dimensions(&self) -> impl Iterator<Item = usize> + '_ {
        self.intervals.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Interval<I>)> {
        self.intervals
            .iter()
            .flat_map(|(&d, intervals)| intervals.iter().map(move |i| (d, i)))
    }

    /// Total number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Largest dimension holding an interval.
    pub fn max_dimension(&self) -> Option<usize> {
        self.intervals.keys().next_back().copied()
    }

    /// Number of right-infinite intervals in `dimension`.
    pub fn betti(&self, dimension: usize) -> usize {
        self.intervals(dimension).iter().filter(|i| i.is_infinite()).count()
    }

    /// Betti numbers of the final complex.
    pub fn betti_sequence(&self) -> BettiNumbers {
        let top = self.max_dimension().map_or(0, |d| d + 1);
        BettiNumbers::new((0..top).map(|d| self.betti(d)).collect())
    }

    /// Endpoints relabelled by `f`.
    pub fn map_endpoints<J>(&self, mut f: impl FnMut(&I) -> J) -> BarcodeCollection<J> {
        let mut mapped = BarcodeCollection::new();
        for (d, interval) in self.iter() {
            mapped.add_interval(d, interval.map(&mut f));
        }
        mapped
    }
}

impl<I: Clone> BarcodeCollection<I> {
    pub fn filter(&self, mut keep: impl FnMut(usize, &Interval<I>) -> bool) -> Self {
        let mut filtered = Self::new();
        for (d, interval) in self.iter() {
            if keep(d, interval) {
                filtered.add_interval(d, interval.clone());
            }
        }
        filtered
    }

    pub fn infinite_intervals(&self) -> Self {
        self.filter(|_, i| i.is_infinite())
    }

    pub fn finite_intervals(&self) -> Self {
        self.filter(|_, i| !i.is_infinite())
    }

    pub fn filter_by_dimension(&self, dimension: usize) -> Self {
        self.filter(|d, _| d == dimension)
    }

    pub fn filter_by_max_dimension(&self, max_dimension: usize) -> Self {
        self.filter(|d, _| d <= max_dimension)
    }
}

impl<I: PartialOrd> BarcodeCollection<I> {
    /// βₖ at a filtration point: intervals of each dimension containing it.
    pub fn betti_numbers_at(&self, point: &I) -> BettiNumbers {
        let top = self.max_dimension().map_or(0, |d| d + 1);
        BettiNumbers::new(
            (0..top)
                .map(|d| self.intervals(d).iter().filter(|i| i.contains(point)).count())
                .collect(),
        )
    }
}

impl BarcodeCollection<usize> {
    /// Endpoints converted to filtration values.
    pub fn transform(&self, converter: &dyn FiltrationConverter) -> BarcodeCollection<f64> {
        self.map_endpoints(|&i| converter.filtration_value(i))
    }

    /// Betti numbers at each index in `0..=last_index`.
    pub fn betti_curve(&self, last_index: usize) -> Vec<BettiNumbers> {
        (0..=last_index).map(|i| self.betti_numbers_at(&i)).collect()
    }
}

impl<I> Default for BarcodeCollection<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: PartialEq> PartialEq for BarcodeCollection<I> {
    fn eq(&self, other: &Self) -> bool {
        self.intervals.len() == other.intervals.len()
            && self.intervals.iter().all(|(d, mine)| match other.intervals.get(d) {
                Some(theirs) => same_multiset(mine, theirs),
                None => false,
            })
    }
}

impl<I: fmt::Display> fmt::Display for BarcodeCollection<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (d, intervals) in &self.intervals {
            write!(f, "Dimension: {}", d)?;
            for interval in intervals {
                write!(f, " {}", interval)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Barcode in which every interval carries a generating cycle.
#[derive(Debug, Clone)]
pub struct AnnotatedBarcodeCollection<I, G> {
    intervals: BTreeMap<usize, Vec<(Interval<I>, G)>>,
}

impl<I, G> AnnotatedBarcodeCollection<I, G> {
    pub fn new() -> Self {
        Self { intervals: BTreeMap::new() }
    }

    pub fn add_interval(&mut self, dimension: usize, interval: Interval<I>, generator: G) {
        self.intervals.entry(dimension).or_default().push((interval, generator));
    }

    pub fn add_right_infinite_interval(&mut self, dimension: usize, start: I, generator: G) {
        self.add_interval(dimension, Interval::right_infinite(start), generator);
    }

    pub fn intervals(&self, dimension: usize) -> &[(Interval<I>, G)] {
        self.intervals.get(&dimension).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn generators(&self, dimension: usize) -> Vec<&G> {
        self.intervals(dimension).iter().map(|(_, g)| g).collect()
    }

    pub fn dimensions(&self) -> impl Iterator<Item = usize> + '_ {
        self.intervals.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Interval<I>, &G)> {
        self.intervals
            .iter()
            .flat_map(|(&d, entries)| entries.iter().map(move |(i, g)| (d, i, g)))
    }

    pub fn len(&self) -> usize {
        self.intervals.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn betti(&self, dimension: usize) -> usize {
        self.intervals(dimension).iter().filter(|(i, _)| i.is_infinite()).count()
    }

    pub fn betti_sequence(&self) -> BettiNumbers {
        let top = self.intervals.keys().next_back().map_or(0, |d| d + 1);
        BettiNumbers::new((0..top).map(|d| self.betti(d)).collect())
    }

    pub fn map_endpoints<J>(&self, mut f: impl FnMut(&I) -> J) -> AnnotatedBarcodeCollection<J, G>
    where
        G: Clone,
    {
        let mut mapped = AnnotatedBarcodeCollection::new();
        for (d, interval, generator) in self.iter() {
            mapped.add_interval(d, interval.map(&mut f), generator.clone());
        }
        mapped
    }
}

impl<I: Clone, G: Clone> AnnotatedBarcodeCollection<I, G> {
    /// Drops the generators.
    pub fn forget_generators(&self) -> BarcodeCollection<I> {
        let mut plain = BarcodeCollection::new();
        for (d, interval, _) in self.iter() {
            plain.add_interval(d, interval.clone());
        }
        plain
    }

    pub fn filter(&self, mut keep: impl FnMut(usize, &Interval<I>) -> bool) -> Self {
        let mut filtered = Self::new();
        for (d, interval, generator) in self.iter() {
            if keep(d, interval) {
                filtered.add_interval(d, interval.clone(), generator.clone());
            }
        }
        filtered
    }

    pub fn infinite_intervals(&self) -> Self {
        self.filter(|_, i| i.is_infinite())
    }

    pub fn finite_intervals(&self) -> Self {
        self.filter(|_, i| !i.is_infinite())
    }

    pub fn filter_by_dimension(&self, dimension: usize) -> Self {
        self.filter(|d, _| d == dimension)
    }

    pub fn filter_by_max_dimension(&self, max_dimension: usize) -> Self {
        self.filter(|d, _| d <= max_dimension)
    }
}

impl<G: Clone> AnnotatedBarcodeCollection<usize, G> {
    pub fn transform(&self, converter: &dyn FiltrationConverter) -> AnnotatedBarcodeCollection<f64, G> {
        self.map_endpoints(|&i| converter.filtration_value(i))
    }
}

impl<I, G> Default for AnnotatedBarcodeCollection<I, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: PartialEq, G: PartialEq> PartialEq for AnnotatedBarcodeCollection<I, G> {
    fn eq(&self, other: &Self) -> bool {
        self.intervals.len() == other.intervals.len()
            && self.intervals.iter().all(|(d, mine)| match other.intervals.get(d) {
                Some(theirs) => same_multiset(mine, theirs),
                None => false,
            })
    }
}

fn same_multiset<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = vec![false; b.len()];
    a.iter().all(|x| {
        let slot = b
            .iter()
            .enumerate()
            .position(|(j, y)| !used[j] && x == y);
        match slot {
            Some(j) => {
                used[j] = true;
                true
            }
            None => false,
        }
    })
}
