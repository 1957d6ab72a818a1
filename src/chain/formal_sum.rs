//! Sparse linear combinations of basis elements.

use super::BasisElement;
use std::collections::BTreeMap;
use std::fmt;

/// A finite linear combination `Σ c_b · b`, stored as an ordered map.
///
/// No basis element is ever stored with a zero coefficient: every mutation
/// goes through [`FreeModule`](super::FreeModule), which prunes terms that
/// cancel. Two sums are equal exactly when their mappings are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormalSum<K, B: Ord> {
    terms: BTreeMap<B, K>,
}

impl<K, B: Ord> FormalSum<K, B> {
    pub(crate) fn new() -> Self {
        Self { terms: BTreeMap::new() }
    }

    /// Number of basis elements with nonzero coefficient.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn coefficient(&self, basis: &B) -> Option<&K> {
        self.terms.get(basis)
    }

    pub fn contains(&self, basis: &B) -> bool {
        self.terms.contains_key(basis)
    }

    /// Terms in increasing basis order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&B, &K)> + ExactSizeIterator {
        self.terms.iter()
    }

    pub fn basis_elements(&self) -> impl Iterator<Item = &B> {
        self.terms.keys()
    }

    /// Greatest basis element in the sum with its coefficient: the "low" entry
    /// of the sum viewed as a matrix column.
    pub fn low(&self) -> Option<(&B, &K)> {
        self.terms.iter().next_back()
    }

    pub(crate) fn get_mut(&mut self, basis: &B) -> Option<&mut K> {
        self.terms.get_mut(basis)
    }

    pub(crate) fn insert_raw(&mut self, basis: B, coefficient: K) {
        self.terms.insert(basis, coefficient);
    }

    pub(crate) fn remove(&mut self, basis: &B) -> Option<K> {
        self.terms.remove(basis)
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&B, &K) -> bool) {
        self.terms.retain(|b, k| keep(b, k));
    }
}

impl<K, B: BasisElement> FormalSum<K, B> {
    /// Largest dimension among the terms, `None` for the zero sum.
    pub fn dimension(&self) -> Option<usize> {
        self.terms.keys().map(BasisElement::dimension).max()
    }
}

impl<K, B: Ord> Default for FormalSum<K, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, B: Ord> IntoIterator for &'a FormalSum<K, B> {
    type Item = (&'a B, &'a K);
    type IntoIter = std::collections::btree_map::Iter<'a, B, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl<K: fmt::Display, B: Ord + fmt::Display> fmt::Display for FormalSum<K, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (basis, coefficient)) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{} {}", coefficient, basis)?;
        }
        Ok(())
    }
}
