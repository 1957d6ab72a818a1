//! Consensus barcode over a chain of approximating complexes.
//!
//! Given complexes `X_0, …, X_n` and bicomplexes `Z_{j-1,j}` whose
//! projections land in `X_{j-1}` and `X_j`, the classes of `X_0` are
//! carried along `X_0 ← Z_{0,1} → X_1 ← … → X_n` with [`project`]. The
//! resulting intervals live on the index set `0..=n`.

use super::basis_tracker::HomologyBasisTracker;
use super::projection::project;
use crate::algebra::Field;
use crate::barcode::BarcodeCollection;
use crate::chain::{BasisElement, ProductBasis};
use crate::error::{HomologyError, Result};
use crate::stream::FilteredStream;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ProjectionBootstrap<F: Field> {
    field: Arc<F>,
    max_dimension: usize,
}

impl<F: Field> ProjectionBootstrap<F> {
    pub fn new(field: Arc<F>, max_dimension: usize) -> Self {
        Self { field, max_dimension }
    }

    pub fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    /// Runs the bootstrap; `bicomplexes[j]` relates `complexes[j]` to
    /// `complexes[j + 1]`.
    pub fn run<B, P, S, T>(&self, complexes: &[S], bicomplexes: &[T]) -> Result<BarcodeCollection<usize>>
    where
        B: BasisElement,
        P: ProductBasis<Factor = B>,
        S: FilteredStream<B>,
        T: FilteredStream<P>,
    {
        if complexes.is_empty() {
            return Ok(BarcodeCollection::new());
        }
        if bicomplexes.len() + 1 != complexes.len() {
            return Err(HomologyError::MismatchedInputs(format!(
                "{} complexes need {} bicomplexes, got {}",
                complexes.len(),
                complexes.len() - 1,
                bicomplexes.len()
            )));
        }

        let trackers: Vec<HomologyBasisTracker<F, B>> = complexes
            .par_iter()
            .map(|stream| self.track(stream))
            .collect::<Result<_>>()?;
        let bridges: Vec<HomologyBasisTracker<F, P>> = bicomplexes
            .par_iter()
            .map(|stream| self.track(stream))
            .collect::<Result<_>>()?;

        let mut result = trackers[0].state_without_finite_barcodes(0);
        result.set_max_dimension(self.max_dimension)?;
        for (j, bridge) in bridges.iter().enumerate() {
            let (x, y) = (&trackers[j], &trackers[j + 1]);
            result = project(x, bridge, y, &result, y.chain_module(), j, j + 1)?;
        }
        let last = complexes.len() - 1;
        result.end_all_intervals(last)?;

        let barcodes = result
            .annotated_barcodes()
            .filter_by_max_dimension(self.max_dimension)
            .forget_generators();
        info!(steps = last, intervals = barcodes.len(), "projection bootstrap finished");
        Ok(barcodes)
    }

    fn track<E: BasisElement>(&self, stream: &(impl FilteredStream<E> + ?Sized)) -> Result<HomologyBasisTracker<F, E>> {
        let mut tracker = HomologyBasisTracker::new(Arc::clone(&self.field));
        for element in stream.elements()? {
            tracker.add(element.clone(), stream.filtration_index(element)?)?;
        }
        Ok(tracker)
    }
}
