//! Persistent Homology via Boundary Matrix Reduction
//!
//! Computes the barcode of a filtered complex over any coefficient ring.
//!
//! ## Algorithm Overview
//!
//! 1. Walk the stream in filtration order (faces before cofaces)
//! 2. Express the boundary of each element as a column over earlier positions
//! 3. Reduce the column against the stored pivots, recording the column
//!    operations (R = D·V)
//! 4. A column that reduces to zero opens an interval at its own index; a
//!    nonzero column closes the interval opened by its low entry
//! 5. Unpaired births become right-infinite intervals
//!
//! Intervals of zero length (birth index equal to death index) are dropped.
//! Finite intervals carry the reduced column as generator, infinite ones the
//! recorded combination.
//!
//! Over a ring that is not a field, eliminating against a non-unit pivot
//! multiplies the column by the pivot first, so the reported intervals are
//! those of the fraction field; torsion is not reported.
//!
//! ## Reference
//!
//! Edelsbrunner, Letscher, Zomorodian (2002). "Topological Persistence
//! and Simplification". Discrete & Computational Geometry.
//! Zomorodian, Carlsson (2005). "Computing Persistent Homology".

use super::echelon::{Echelon, Insertion};
use super::{ChainPolicy, PersistenceConfig};
use crate::algebra::Ring;
use crate::barcode::{AnnotatedBarcodeCollection, BarcodeCollection, Interval};
use crate::chain::{BasisElement, FormalSum, FreeModule};
use crate::error::{malformed, Result};
use crate::stream::{FilteredStream, FiltrationConverter};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace};

/// A persistence algorithm that turns a finalized stream into a barcode.
pub trait PersistenceAlgorithm<B: BasisElement>: Send + Sync {
    fn name(&self) -> String;

    fn compute_index_intervals(&self, stream: &dyn FilteredStream<B>) -> Result<BarcodeCollection<usize>>;
}

/// Barcode annotated with generating chains.
pub type AnnotatedBarcodes<R, B> = AnnotatedBarcodeCollection<usize, FormalSum<<R as Ring>::Element, B>>;

/// Standard persistence reduction over the ring `R`.
#[derive(Debug)]
pub struct PersistentHomology<R: Ring, B: BasisElement> {
    ring: Arc<R>,
    config: PersistenceConfig,
    policy: ChainPolicy<B>,
}

impl<R: Ring, B: BasisElement> Clone for PersistentHomology<R, B> {
    fn clone(&self) -> Self {
        Self {
            ring: Arc::clone(&self.ring),
            config: self.config,
            policy: self.policy.clone(),
        }
    }
}

impl<R: Ring, B: BasisElement> PersistentHomology<R, B> {
    pub fn new(ring: Arc<R>, config: PersistenceConfig) -> Result<Self> {
        Self::with_policy(ring, config, ChainPolicy::Absolute)
    }

    pub fn with_policy(ring: Arc<R>, config: PersistenceConfig, policy: ChainPolicy<B>) -> Result<Self> {
        config.validate()?;
        Ok(Self { ring, config, policy })
    }

    /// Absolute homology in dimensions `min_dimension..=max_dimension`.
    pub fn absolute(ring: Arc<R>, min_dimension: usize, max_dimension: usize) -> Result<Self> {
        Self::new(ring, PersistenceConfig::new(min_dimension, max_dimension)?)
    }

    /// Homology relative to `subcomplex`.
    pub fn relative(
        ring: Arc<R>,
        min_dimension: usize,
        max_dimension: usize,
        subcomplex: impl IntoIterator<Item = B>,
    ) -> Result<Self> {
        Self::with_policy(
            ring,
            PersistenceConfig::new(min_dimension, max_dimension)?,
            ChainPolicy::relative(subcomplex),
        )
    }

    pub fn ring(&self) -> &Arc<R> {
        &self.ring
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    pub fn policy(&self) -> &ChainPolicy<B> {
        &self.policy
    }

    /// Barcode with integer filtration indices as endpoints.
    pub fn compute_index_intervals<S>(&self, stream: &S) -> Result<BarcodeCollection<usize>>
    where
        S: FilteredStream<B> + ?Sized,
    {
        Ok(self.compute_annotated_index_intervals(stream)?.forget_generators())
    }

    /// Barcode with endpoints converted to filtration values.
    pub fn compute_intervals<S>(&self, stream: &S, converter: &dyn FiltrationConverter) -> Result<BarcodeCollection<f64>>
    where
        S: FilteredStream<B> + ?Sized,
    {
        Ok(self.compute_index_intervals(stream)?.transform(converter))
    }

    pub fn compute_annotated_intervals<S>(
        &self,
        stream: &S,
        converter: &dyn FiltrationConverter,
    ) -> Result<AnnotatedBarcodeCollection<f64, FormalSum<R::Element, B>>>
    where
        S: FilteredStream<B> + ?Sized,
    {
        Ok(self.compute_annotated_index_intervals(stream)?.transform(converter))
    }

    /// Reduces several independent streams in parallel.
    pub fn compute_batch<S>(&self, streams: &[S]) -> Vec<Result<BarcodeCollection<usize>>>
    where
        S: FilteredStream<B>,
    {
        streams
            .par_iter()
            .map(|stream| self.compute_index_intervals(stream))
            .collect()
    }

    /// Barcode annotated with one generating chain per interval.
    pub fn compute_annotated_index_intervals<S>(&self, stream: &S) -> Result<AnnotatedBarcodes<R, B>>
    where
        S: FilteredStream<B> + ?Sized,
    {
        let elements = stream.elements()?;
        let indices = elements
            .iter()
            .map(|element| stream.filtration_index(element))
            .collect::<Result<Vec<usize>>>()?;
        let positions: HashMap<&B, usize> = elements.iter().enumerate().map(|(i, e)| (e, i)).collect();

        debug!(
            elements = elements.len(),
            ring = %self.ring.name(),
            relative = self.policy.is_relative(),
            "reducing filtered stream"
        );

        let columns: FreeModule<R, usize> = FreeModule::new(Arc::clone(&self.ring));
        let mut echelon: Echelon<R, usize, usize> = Echelon::new(Arc::clone(&self.ring));
        let mut cycles: BTreeMap<usize, FormalSum<R::Element, usize>> = BTreeMap::new();
        let mut pairs: Vec<(usize, usize)> = Vec::new();

        for (j, element) in elements.iter().enumerate() {
            // (k+1)-cells never pair with classes above the window
            if self.policy.excludes(element) || element.dimension() > self.config.max_dimension + 1 {
                continue;
            }
            let boundary = self.boundary_column(stream, element, j, &positions, &columns)?;
            match echelon.insert(boundary, columns.singleton(j)) {
                Insertion::Kernel(cycle) => {
                    cycles.insert(j, cycle);
                }
                Insertion::Pivot(low) => {
                    trace!(birth = %elements[low], death = %element, "pivot");
                    pairs.push((low, j));
                }
            }
        }

        let chains: FreeModule<R, B> = FreeModule::new(Arc::clone(&self.ring));
        let to_chain = |sum: &FormalSum<R::Element, usize>| {
            columns.map_basis(sum, &chains, |&p| Some((elements[p].clone(), 1)))
        };

        let mut barcodes = AnnotatedBarcodeCollection::new();
        let mut paired = HashSet::new();
        for &(low, j) in &pairs {
            paired.insert(low);
            let dimension = elements[low].dimension();
            let (birth, death) = (indices[low], indices[j]);
            if death == birth || !self.config.contains(dimension) {
                continue;
            }
            if let Some(column) = echelon.column(&low) {
                barcodes.add_interval(dimension, Interval::half_open(birth, death), to_chain(&column.chain));
            }
        }
        for (&b, cycle) in &cycles {
            let dimension = elements[b].dimension();
            if paired.contains(&b) || !self.config.contains(dimension) {
                continue;
            }
            barcodes.add_right_infinite_interval(dimension, indices[b], to_chain(cycle));
        }

        debug!(
            pivots = pairs.len(),
            intervals = barcodes.len(),
            "extracted barcode"
        );
        Ok(barcodes)
    }

    /// Boundary of `element` as a column over stream positions.
    fn boundary_column<S>(
        &self,
        stream: &S,
        element: &B,
        position: usize,
        positions: &HashMap<&B, usize>,
        columns: &FreeModule<R, usize>,
    ) -> Result<FormalSum<R::Element, usize>>
    where
        S: FilteredStream<B> + ?Sized,
    {
        let mut column = columns.zero();
        for (face, incidence) in stream.boundary(element)? {
            if self.policy.excludes(&face) {
                continue;
            }
            match positions.get(&face) {
                Some(&p) if p < position => columns.accumulate(&mut column, p, self.ring.value_of(incidence)),
                _ => return Err(malformed(element, &face)),
            }
        }
        Ok(column)
    }
}

impl<R: Ring, B: BasisElement> PersistenceAlgorithm<B> for PersistentHomology<R, B> {
    fn name(&self) -> String {
        let mode = if self.policy.is_relative() { "relative" } else { "absolute" };
        format!("{} reduction over {}", mode, self.ring.name())
    }

    fn compute_index_intervals(&self, stream: &dyn FilteredStream<B>) -> Result<BarcodeCollection<usize>> {
        PersistentHomology::compute_index_intervals(self, stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{big_rational_field, boolean_field, integer_ring, modular_field, rational_field};
    use crate::chain::Simplex;
    use crate::error::HomologyError;
    use crate::stream::{catalog, ExplicitStream, LinearConverter};

    fn expected(entries: &[(usize, usize, Option<usize>)]) -> BarcodeCollection<usize> {
        let mut barcodes = BarcodeCollection::new();
        for &(d, start, end) in entries {
            match end {
                Some(end) => barcodes.add_interval(d, Interval::half_open(start, end)),
                None => barcodes.add_right_infinite_interval(d, start),
            }
        }
        barcodes
    }

    #[test]
    fn test_triangle_loop_mod_2() {
        let engine = PersistentHomology::absolute(modular_field(2).unwrap(), 0, 2).unwrap();
        let barcodes = engine.compute_index_intervals(&catalog::triangle_loop().unwrap()).unwrap();

        assert_eq!(barcodes.infinite_intervals().filter_by_dimension(0).len(), 1);
        assert_eq!(barcodes.intervals(1), &[Interval::right_infinite(1)]);
        assert!(barcodes.intervals(2).is_empty());
        assert_eq!(
            barcodes,
            expected(&[(0, 0, None), (0, 0, Some(1)), (0, 0, Some(1)), (1, 1, None)])
        );
    }

    #[test]
    fn test_tetrahedron_boundary_betti() {
        let engine = PersistentHomology::absolute(modular_field(3).unwrap(), 0, 2).unwrap();
        let barcodes = engine.compute_index_intervals(&catalog::tetrahedron_boundary().unwrap()).unwrap();
        assert_eq!(barcodes.betti_sequence().as_slice(), &[1, 0, 1]);
        // everything appears at index 0, so every finite interval has zero length
        assert!(barcodes.finite_intervals().is_empty());
    }

    #[test]
    fn test_zomorodian_carlsson_example() {
        let engine = PersistentHomology::absolute(boolean_field(), 0, 1).unwrap();
        let barcodes = engine.compute_index_intervals(&catalog::zomorodian_carlsson().unwrap()).unwrap();
        assert_eq!(
            barcodes,
            expected(&[(0, 0, None), (0, 0, Some(1)), (0, 1, Some(2)), (1, 2, Some(5)), (1, 3, Some(4))])
        );
    }

    #[test]
    fn test_explicit_example() {
        let engine = PersistentHomology::absolute(modular_field(7).unwrap(), 0, 2).unwrap();
        let barcodes = engine.compute_index_intervals(&catalog::explicit_example().unwrap()).unwrap();
        assert_eq!(barcodes, expected(&[(0, 0, None), (1, 4, None)]));
    }

    #[test]
    fn test_same_barcode_over_every_coefficient_structure() {
        let stream = catalog::octahedron().unwrap();
        let reference = PersistentHomology::absolute(boolean_field(), 0, 2)
            .unwrap()
            .compute_index_intervals(&stream)
            .unwrap();
        assert_eq!(reference.betti_sequence().as_slice(), &[1, 0, 1]);

        let over_z = PersistentHomology::absolute(integer_ring(), 0, 2).unwrap();
        let over_q = PersistentHomology::absolute(rational_field(), 0, 2).unwrap();
        let over_z5 = PersistentHomology::absolute(modular_field(5).unwrap(), 0, 2).unwrap();
        assert_eq!(over_z.compute_index_intervals(&stream).unwrap(), reference);
        assert_eq!(over_q.compute_index_intervals(&stream).unwrap(), reference);
        assert_eq!(over_z5.compute_index_intervals(&stream).unwrap(), reference);

        let over_big_q = PersistentHomology::absolute(big_rational_field(), 0, 2).unwrap();
        assert_eq!(over_big_q.compute_index_intervals(&stream).unwrap(), reference);
        let circle = catalog::circle(64).unwrap();
        assert_eq!(
            over_big_q.compute_index_intervals(&circle).unwrap().betti_sequence().as_slice(),
            &[1, 1]
        );
    }

    #[test]
    fn test_reduction_is_deterministic() {
        let engine = PersistentHomology::absolute(modular_field(11).unwrap(), 0, 2).unwrap();
        let stream = catalog::zomorodian_carlsson().unwrap();
        let first = engine.compute_annotated_index_intervals(&stream).unwrap();
        let second = engine.compute_annotated_index_intervals(&stream).unwrap();
        let ordered = |b: &AnnotatedBarcodes<crate::algebra::ModularIntField, Simplex>| {
            b.iter().map(|(d, i, g)| (d, i.clone(), g.clone())).collect::<Vec<_>>()
        };
        assert_eq!(ordered(&first), ordered(&second));
    }

    #[test]
    fn test_generators_are_cycles_born_at_birth() {
        let ring = rational_field();
        let engine = PersistentHomology::absolute(Arc::clone(&ring), 0, 1).unwrap();
        let stream = catalog::zomorodian_carlsson().unwrap();
        let annotated = engine.compute_annotated_index_intervals(&stream).unwrap();
        let chains: FreeModule<_, Simplex> = FreeModule::new(ring);
        for (d, interval, generator) in annotated.iter() {
            assert!(!generator.is_zero());
            assert!(generator.basis_elements().all(|s| s.dimension() == d));
            if d > 0 {
                assert!(chains.boundary_of(generator).is_zero(), "{} is not a cycle", generator);
            }
            let latest = generator
                .basis_elements()
                .map(|s| stream.filtration_index(s).unwrap())
                .max()
                .unwrap();
            assert!(latest <= *interval.start());
        }
    }

    #[test]
    fn test_dimension_window() {
        let stream = catalog::octahedron().unwrap();
        let only_two = PersistentHomology::absolute(boolean_field(), 2, 2)
            .unwrap()
            .compute_index_intervals(&stream)
            .unwrap();
        assert_eq!(only_two, expected(&[(2, 2, None)]));
        assert!(matches!(
            PersistentHomology::<_, Simplex>::absolute(boolean_field(), 2, 1),
            Err(HomologyError::InconsistentDimensionWindow { min: 2, max: 1 })
        ));
    }

    #[test]
    fn test_unfinalized_and_malformed_streams() {
        let engine = PersistentHomology::absolute(boolean_field(), 0, 1).unwrap();
        let mut open = ExplicitStream::new();
        open.add(Simplex::vertex(0), 0).unwrap();
        assert_eq!(
            engine.compute_index_intervals(&open).unwrap_err(),
            HomologyError::StreamNotFinalized
        );

        let missing_face = ExplicitStream::from_elements([(Simplex::vertex(0), 0), (Simplex::new([0, 1]), 1)]).unwrap();
        assert!(matches!(
            engine.compute_index_intervals(&missing_face),
            Err(HomologyError::MalformedBoundary { .. })
        ));
    }

    #[test]
    fn test_relative_to_an_edge() {
        // X = hollow triangle, A = the edge [0,1] with its vertices
        let stream = catalog::triangle_loop().unwrap();
        let subcomplex = [Simplex::vertex(0), Simplex::vertex(1), Simplex::new([0, 1])];
        let relative = PersistentHomology::relative(boolean_field(), 0, 2, subcomplex)
            .unwrap()
            .compute_index_intervals(&stream)
            .unwrap();
        // H(X, A): the loop survives, vertex [2] dies once [0,2] joins it to A
        assert_eq!(relative, expected(&[(0, 0, Some(1)), (1, 1, None)]));
        assert_eq!(relative.betti_sequence().euler_characteristic(), -1);
    }

    #[test]
    fn test_converted_intervals() {
        let engine = PersistentHomology::absolute(boolean_field(), 0, 1).unwrap();
        let values = engine
            .compute_intervals(&catalog::zomorodian_carlsson().unwrap(), &LinearConverter::new(0.0, 0.1))
            .unwrap();
        let loops: Vec<f64> = values.intervals(1).iter().map(|i| i.persistence()).collect();
        assert_eq!(loops.len(), 2);
        assert!(loops.iter().any(|p| (p - 0.3).abs() < 1e-9));
        assert!(loops.iter().any(|p| (p - 0.1).abs() < 1e-9));
    }

    #[test]
    fn test_batch_matches_sequential() {
        let engine = PersistentHomology::absolute(modular_field(2).unwrap(), 0, 2).unwrap();
        let streams = vec![
            catalog::circle(4).unwrap(),
            catalog::circle(7).unwrap(),
            catalog::circle(12).unwrap(),
        ];
        let batch = engine.compute_batch(&streams);
        for (stream, result) in streams.iter().zip(batch) {
            assert_eq!(result.unwrap(), engine.compute_index_intervals(stream).unwrap());
        }
    }
}
