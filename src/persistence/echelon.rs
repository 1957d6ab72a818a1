//! Column echelon form with recorded column operations.
//!
//! Every stored column has a distinct pivot (its "low" row) and carries the
//! combination of labelled inputs that produced it, so `chain = Σ c_l · l`
//! holds for each column. The persistence engine and the zigzag tracker
//! both reduce against this structure.

use crate::algebra::Ring;
use crate::chain::{FormalSum, FreeModule};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub(crate) struct EchelonColumn<K, Row: Ord, Label: Ord> {
    pub(crate) chain: FormalSum<K, Row>,
    pub(crate) combination: FormalSum<K, Label>,
}

/// Outcome of inserting a column.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Insertion<K, Row, Label: Ord> {
    /// The reduced column was stored under this pivot.
    Pivot(Row),
    /// The column reduced to zero; the combination of labels summing to zero.
    Kernel(FormalSum<K, Label>),
}

#[derive(Debug)]
pub(crate) struct Echelon<R: Ring, Row: Ord + Clone, Label: Ord + Clone> {
    rows: FreeModule<R, Row>,
    labels: FreeModule<R, Label>,
    columns: BTreeMap<Row, EchelonColumn<R::Element, Row, Label>>,
}

impl<R: Ring, Row: Ord + Clone, Label: Ord + Clone> Clone for Echelon<R, Row, Label> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            labels: self.labels.clone(),
            columns: self.columns.clone(),
        }
    }
}

impl<R: Ring, Row: Ord + Clone, Label: Ord + Clone> Echelon<R, Row, Label> {
    pub(crate) fn new(ring: Arc<R>) -> Self {
        Self {
            rows: FreeModule::new(Arc::clone(&ring)),
            labels: FreeModule::new(ring),
            columns: BTreeMap::new(),
        }
    }

    pub(crate) fn labels(&self) -> &FreeModule<R, Label> {
        &self.labels
    }

    pub(crate) fn len(&self) -> usize {
        self.columns.len()
    }

    pub(crate) fn column(&self, pivot: &Row) -> Option<&EchelonColumn<R::Element, Row, Label>> {
        self.columns.get(pivot)
    }

    /// Eliminates low entries of `chain` while they hit a stored pivot.
    ///
    /// The result is zero exactly when the input lies in the span of the
    /// stored columns.
    pub(crate) fn reduce(
        &self,
        mut chain: FormalSum<R::Element, Row>,
        mut combination: FormalSum<R::Element, Label>,
    ) -> (FormalSum<R::Element, Row>, FormalSum<R::Element, Label>) {
        loop {
            let (low, coefficient) = match chain.low() {
                Some((low, coefficient)) => (low.clone(), coefficient.clone()),
                None => break,
            };
            let column = match self.columns.get(&low) {
                Some(column) => column,
                None => break,
            };
            self.eliminate(&mut chain, &mut combination, column, &coefficient);
        }
        (chain, combination)
    }

    fn eliminate(
        &self,
        chain: &mut FormalSum<R::Element, Row>,
        combination: &mut FormalSum<R::Element, Label>,
        column: &EchelonColumn<R::Element, Row, Label>,
        coefficient: &R::Element,
    ) {
        let ring = self.rows.ring();
        let pivot = match column.chain.low() {
            Some((_, pivot)) => pivot,
            None => return,
        };
        match ring.unit_inverse(pivot) {
            Some(inverse) => {
                let factor = ring.negate(&ring.multiply(coefficient, &inverse));
                self.rows.accumulate_scaled(chain, &column.chain, &factor);
                self.labels.accumulate_scaled(combination, &column.combination, &factor);
            }
            None => {
                // pivot · chain − coefficient · column
                let factor = ring.negate(coefficient);
                *chain = self.rows.scale(chain, pivot);
                self.rows.accumulate_scaled(chain, &column.chain, &factor);
                *combination = self.labels.scale(combination, pivot);
                self.labels.accumulate_scaled(combination, &column.combination, &factor);
            }
        }
    }

    /// Reduces `chain` and stores it, or reports the vanishing combination.
    pub(crate) fn insert(
        &mut self,
        chain: FormalSum<R::Element, Row>,
        combination: FormalSum<R::Element, Label>,
    ) -> Insertion<R::Element, Row, Label> {
        let (chain, combination) = self.reduce(chain, combination);
        let pivot = match chain.low() {
            Some((low, _)) => low.clone(),
            None => return Insertion::Kernel(combination),
        };
        self.columns.insert(pivot.clone(), EchelonColumn { chain, combination });
        Insertion::Pivot(pivot)
    }

    /// Rewrites every recorded combination after the substitution
    /// `label ↦ replacement`. Both sides must denote the same chain.
    pub(crate) fn substitute_label(&mut self, label: &Label, replacement: &FormalSum<R::Element, Label>) {
        for column in self.columns.values_mut() {
            if let Some(coefficient) = column.combination.remove(label) {
                self.labels
                    .accumulate_scaled(&mut column.combination, replacement, &coefficient);
            }
        }
    }
}
