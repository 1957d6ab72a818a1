//! Running several persistence algorithms on one stream and comparing the results.

use super::PersistenceAlgorithm;
use crate::barcode::BarcodeCollection;
use crate::chain::BasisElement;
use crate::error::Result;
use crate::stream::FilteredStream;
use rayon::prelude::*;
use tracing::warn;

/// Barcodes produced by each algorithm, in the order given.
#[derive(Debug, Clone)]
pub struct CrossValidation {
    pub barcodes: Vec<(String, BarcodeCollection<usize>)>,
}

impl CrossValidation {
    /// True when every algorithm produced the same barcode.
    pub fn agree(&self) -> bool {
        self.disagreements().is_empty()
    }

    /// Names of algorithms whose barcode differs from the first one.
    pub fn disagreements(&self) -> Vec<&str> {
        match self.barcodes.split_first() {
            Some(((_, reference), rest)) => rest
                .iter()
                .filter(|(_, barcodes)| barcodes != reference)
                .map(|(name, _)| name.as_str())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Computes the barcode of `stream` with every algorithm, in parallel.
pub fn cross_validate<B: BasisElement>(
    algorithms: &[&dyn PersistenceAlgorithm<B>],
    stream: &dyn FilteredStream<B>,
) -> Result<CrossValidation> {
    let barcodes = algorithms
        .par_iter()
        .map(|algorithm| -> Result<(String, BarcodeCollection<usize>)> {
            Ok((algorithm.name(), algorithm.compute_index_intervals(stream)?))
        })
        .collect::<Result<Vec<_>>>()?;
    let validation = CrossValidation { barcodes };
    for name in validation.disagreements() {
        warn!(algorithm = name, "barcode differs from the reference algorithm");
    }
    Ok(validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{boolean_field, modular_field, rational_field};
    use crate::chain::Simplex;
    use crate::persistence::PersistentHomology;
    use crate::stream::catalog;

    #[test]
    fn test_engines_over_different_fields_agree() {
        let z2 = PersistentHomology::<_, Simplex>::absolute(boolean_field(), 0, 2).unwrap();
        let z3 = PersistentHomology::<_, Simplex>::absolute(modular_field(3).unwrap(), 0, 2).unwrap();
        let q = PersistentHomology::<_, Simplex>::absolute(rational_field(), 0, 2).unwrap();
        let stream = catalog::zomorodian_carlsson().unwrap();
        let validation = cross_validate::<Simplex>(&[&z2, &z3, &q], &stream).unwrap();
        assert_eq!(validation.barcodes.len(), 3);
        assert!(validation.agree());
    }

    #[test]
    fn test_window_difference_is_reported() {
        let full = PersistentHomology::<_, Simplex>::absolute(boolean_field(), 0, 1).unwrap();
        let loops_only = PersistentHomology::<_, Simplex>::absolute(boolean_field(), 1, 1).unwrap();
        let stream = catalog::triangle_loop().unwrap();
        let validation = cross_validate::<Simplex>(&[&full, &loops_only], &stream).unwrap();
        assert_eq!(validation.disagreements().len(), 1);
    }
}
