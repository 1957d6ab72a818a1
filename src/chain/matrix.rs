//! Dense vector and matrix views of formal sums.

use super::{BasisElement, FormalSum, FreeModule};
use crate::algebra::Ring;
use crate::error::{HomologyError, Result};
use crate::stream::FilteredStream;
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Fixed indexing of a finite basis, used to move between sparse sums and
/// dense `ndarray` arrays.
#[derive(Debug, Clone)]
pub struct MatrixConverter<B> {
    basis: Vec<B>,
    index: HashMap<B, usize>,
}

impl<B: BasisElement> MatrixConverter<B> {
    pub fn new(basis: impl IntoIterator<Item = B>) -> Self {
        let basis: Vec<B> = basis.into_iter().collect();
        let index = basis.iter().enumerate().map(|(i, b)| (b.clone(), i)).collect();
        Self { basis, index }
    }

    /// Indexes the elements of a finalized stream in stream order.
    pub fn from_stream(stream: &impl FilteredStream<B>) -> Result<Self> {
        Ok(Self::new(stream.elements()?.iter().cloned()))
    }

    pub fn basis(&self) -> &[B] {
        &self.basis
    }

    pub fn len(&self) -> usize {
        self.basis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.basis.is_empty()
    }

    pub fn index_of(&self, element: &B) -> Option<usize> {
        self.index.get(element).copied()
    }

    pub fn to_vector<R: Ring>(&self, sum: &FormalSum<R::Element, B>, ring: &R) -> Result<Array1<R::Element>> {
        let mut vector = Array1::from_elem(self.basis.len(), ring.zero());
        for (element, coefficient) in sum {
            let i = self
                .index_of(element)
                .ok_or_else(|| HomologyError::UnknownElement(element.to_string()))?;
            vector[i] = coefficient.clone();
        }
        Ok(vector)
    }

    pub fn from_vector<R: Ring>(&self, vector: &Array1<R::Element>, module: &FreeModule<R, B>) -> FormalSum<R::Element, B> {
        module.from_terms(
            self.basis
                .iter()
                .zip(vector.iter())
                .map(|(b, k)| (b.clone(), k.clone())),
        )
    }

    /// One column per sum.
    pub fn to_matrix<R: Ring>(&self, columns: &[FormalSum<R::Element, B>], ring: &R) -> Result<Array2<R::Element>> {
        let mut matrix = Array2::from_elem((self.basis.len(), columns.len()), ring.zero());
        for (j, column) in columns.iter().enumerate() {
            let dense = self.to_vector(column, ring)?;
            matrix.column_mut(j).assign(&dense);
        }
        Ok(matrix)
    }

    /// Filtered boundary matrix: column `j` is the boundary of the `j`-th basis element.
    pub fn boundary_matrix<R: Ring>(&self, module: &FreeModule<R, B>) -> Result<Array2<R::Element>> {
        let columns: Vec<_> = self.basis.iter().map(|b| module.boundary(b)).collect();
        self.to_matrix(&columns, module.ring().as_ref())
    }
}

/// Product of two dense matrices over `ring`.
pub fn multiply<R: Ring>(a: &Array2<R::Element>, b: &Array2<R::Element>, ring: &R) -> Result<Array2<R::Element>> {
    if a.ncols() != b.nrows() {
        return Err(HomologyError::MismatchedInputs(format!(
            "cannot multiply {}x{} by {}x{}",
            a.nrows(),
            a.ncols(),
            b.nrows(),
            b.ncols()
        )));
    }
    let mut product = Array2::from_elem((a.nrows(), b.ncols()), ring.zero());
    for ((i, j), entry) in product.indexed_iter_mut() {
        *entry = a
            .row(i)
            .iter()
            .zip(b.column(j).iter())
            .fold(ring.zero(), |acc, (x, y)| ring.add(&acc, &ring.multiply(x, y)));
    }
    Ok(product)
}
