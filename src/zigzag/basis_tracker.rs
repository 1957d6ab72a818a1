//! Zigzag Persistence via an Explicit Homology Basis
//!
//! The tracker keeps the current complex together with one representative
//! cycle per open interval. For every chain dimension it also keeps an
//! echelon whose columns span boundaries ⊕ tracked classes, each column
//! recording how it is built from the labels `Boundary(τ)` (the chain ∂τ)
//! and `Class(k)` (the representative of class k).
//!
//! ## Adding σ of dimension d
//!
//! Decompose ∂σ = Σ aτ ∂τ + Σ ck zk. If every ck is zero, σ − Σ aτ τ is a
//! new d-cycle and opens an interval. Otherwise the youngest class with a
//! nonzero coefficient dies, and its label is rewritten in terms of
//! `Boundary(σ)` and the surviving classes.
//!
//! ## Removing σ of dimension d (σ has no cofaces)
//!
//! If some tracked d-cycle contains σ, the youngest such class dies, the
//! others are corrected to avoid σ, and the echelons of dimensions d and
//! d − 1 are re-reduced from the current complex. Otherwise ∂σ stops being
//! a boundary and becomes a new (d − 1)-class.
//!
//! Betti numbers are exact after every operation. Killing the youngest
//! class reproduces the standard pairing for additions; for removals it is a
//! valid but not necessarily canonical choice of which interval ends.
//!
//! ## Reference
//!
//! Carlsson, de Silva (2010). "Zigzag Persistence". Found. Comput. Math.

use super::interval_tracker::{IntervalDescriptor, IntervalTracker};
use crate::algebra::{Field, Ring};
use crate::barcode::{AnnotatedBarcodeCollection, BarcodeCollection, BettiNumbers};
use crate::chain::{BasisElement, FormalSum, FreeModule};
use crate::error::{malformed, HomologyError, Result};
use crate::persistence::{Echelon, Insertion, PersistenceAlgorithm, PersistenceConfig};
use crate::stream::FilteredStream;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Label of an echelon column input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum GeneratorLabel<B> {
    Boundary(B),
    Class(usize),
}

/// Open interval of the tracker, with its representative cycle.
pub type ClassDescriptor<K, B> = IntervalDescriptor<usize, FormalSum<K, B>>;

type Chain<F, B> = FormalSum<<F as Ring>::Element, B>;

pub struct HomologyBasisTracker<F: Field, B: BasisElement> {
    field: Arc<F>,
    chains: FreeModule<F, B>,
    labels: FreeModule<F, GeneratorLabel<B>>,
    keys: FreeModule<F, usize>,
    complex: BTreeMap<usize, BTreeSet<B>>,
    cofaces: HashMap<B, BTreeSet<B>>,
    echelons: BTreeMap<usize, Echelon<F, B, GeneratorLabel<B>>>,
    intervals: IntervalTracker<usize, usize, Chain<F, B>>,
    next_key: usize,
}

impl<F: Field, B: BasisElement> HomologyBasisTracker<F, B> {
    pub fn new(field: Arc<F>) -> Self {
        Self {
            chains: FreeModule::new(Arc::clone(&field)),
            labels: FreeModule::new(Arc::clone(&field)),
            keys: FreeModule::new(Arc::clone(&field)),
            field,
            complex: BTreeMap::new(),
            cofaces: HashMap::new(),
            echelons: BTreeMap::new(),
            intervals: IntervalTracker::new(),
            next_key: 0,
        }
    }

    /// Tracker reporting dimensions `min_dimension..=max_dimension`.
    pub fn with_dimensions(field: Arc<F>, min_dimension: usize, max_dimension: usize) -> Result<Self> {
        let config = PersistenceConfig::new(min_dimension, max_dimension)?;
        let mut tracker = Self::new(field);
        tracker.intervals.set_max_dimension(config.max_dimension)?;
        tracker.intervals.set_min_dimension(config.min_dimension)?;
        Ok(tracker)
    }

    pub fn set_use_left_closed_intervals(&mut self, closed: bool) {
        self.intervals.set_use_left_closed_intervals(closed);
    }

    pub fn set_use_right_closed_intervals(&mut self, closed: bool) {
        self.intervals.set_use_right_closed_intervals(closed);
    }

    pub fn set_max_dimension(&mut self, dimension: usize) -> Result<()> {
        self.intervals.set_max_dimension(dimension)
    }

    pub fn field(&self) -> &Arc<F> {
        &self.field
    }

    pub fn chain_module(&self) -> &FreeModule<F, B> {
        &self.chains
    }

    pub fn contains(&self, element: &B) -> bool {
        self.cofaces.contains_key(element)
    }

    /// Number of elements in the current complex.
    pub fn len(&self) -> usize {
        self.cofaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cofaces.is_empty()
    }

    /// Adds `element` at `index`; all of its faces must already be present.
    /// A rejected addition leaves the tracker unchanged.
    pub fn add(&mut self, element: B, index: usize) -> Result<()> {
        if self.contains(&element) {
            return Err(HomologyError::DuplicateElement(element.to_string()));
        }
        let boundary = element.boundary();
        if let Some((face, _)) = boundary.iter().find(|(face, _)| !self.contains(face)) {
            return Err(malformed(&element, face));
        }
        let dimension = element.dimension();
        let face_dimension = dimension.saturating_sub(1);
        let boundary_chain = self.chains.from_int_terms(boundary.iter().cloned());

        let expression = if boundary_chain.is_zero() {
            self.labels.zero()
        } else {
            self.decompose(face_dimension, &boundary_chain)?
        };
        let victim = self.youngest_class(&expression);

        match victim {
            None => {
                let mut cycle = self.chains.singleton(element.clone());
                for (label, coefficient) in &expression {
                    if let GeneratorLabel::Boundary(tau) = label {
                        self.chains
                            .accumulate(&mut cycle, tau.clone(), self.field.negate(coefficient));
                    }
                }
                self.open_class(dimension, cycle, index, true)?;
            }
            Some((key, coefficient)) => {
                self.intervals.check_end(&key, &index)?;
                let inverse = self.field.invert(&coefficient)?;
                // Class(key) = (Boundary(σ) − rest) / coefficient
                let mut rest = expression;
                rest.remove(&GeneratorLabel::Class(key));
                let mut replacement = self.labels.singleton(GeneratorLabel::Boundary(element.clone()));
                self.labels
                    .accumulate_scaled(&mut replacement, &rest, &self.field.value_of(-1));
                let replacement = self.labels.scale(&replacement, &inverse);
                if let Some(echelon) = self.echelons.get_mut(&face_dimension) {
                    echelon.substitute_label(&GeneratorLabel::Class(key), &replacement);
                }
                self.intervals.end_interval(&key, index)?;
                trace!(key, killer = %element, index, "class died");
            }
        }

        for (face, _) in &boundary {
            if let Some(cofaces) = self.cofaces.get_mut(face) {
                cofaces.insert(element.clone());
            }
        }
        self.complex.entry(dimension).or_default().insert(element.clone());
        self.cofaces.insert(element, BTreeSet::new());
        Ok(())
    }

    /// Removes `element` at `index`; it must have no cofaces left.
    /// A rejected removal leaves the tracker unchanged.
    pub fn remove(&mut self, element: &B, index: usize) -> Result<()> {
        let cofaces = self
            .cofaces
            .get(element)
            .ok_or_else(|| HomologyError::UnknownElement(element.to_string()))?;
        if let Some(coface) = cofaces.iter().next() {
            return Err(HomologyError::HasCofaces {
                element: element.to_string(),
                coface: coface.to_string(),
            });
        }
        let dimension = element.dimension();

        let containing: Vec<(usize, usize, F::Element)> = self
            .intervals
            .active_generators()
            .iter()
            .filter(|(_, d)| d.dimension == dimension)
            .filter_map(|(&key, d)| d.generator.coefficient(element).map(|c| (key, d.start, c.clone())))
            .collect();

        let victim = containing
            .iter()
            .max_by(|a, b| (a.1, a.0).cmp(&(b.1, b.0)))
            .map(|(key, _, c)| (*key, c.clone()));
        if let Some((key, _)) = &victim {
            self.intervals.check_end(key, &index)?;
        }

        self.forget(element);

        match victim {
            Some((key, coefficient)) => {
                let victim_cycle = self.class_cycle(key).cloned().unwrap_or_default();
                for (other, _, c) in &containing {
                    if *other == key {
                        continue;
                    }
                    let factor = self.field.negate(&self.field.divide(c, &coefficient)?);
                    if let Some(cycle) = self.class_cycle(*other) {
                        let mut corrected = cycle.clone();
                        self.chains.accumulate_scaled(&mut corrected, &victim_cycle, &factor);
                        self.intervals.update_generator(other, corrected)?;
                    }
                }
                self.intervals.end_interval(&key, index)?;
                trace!(key, removed = %element, index, "class died on removal");
                self.rebuild_echelon(dimension);
                if dimension > 0 {
                    self.rebuild_echelon(dimension - 1);
                }
            }
            None => {
                let boundary = self.chains.boundary(element);
                if boundary.is_zero() {
                    warn!(removed = %element, "removed a cycle that no class contains");
                    return Ok(());
                }
                let face_dimension = dimension.saturating_sub(1);
                let key = self.open_class(face_dimension, boundary, index, false)?;
                if let Some(echelon) = self.echelons.get_mut(&face_dimension) {
                    let class = self.labels.singleton(GeneratorLabel::Class(key));
                    echelon.substitute_label(&GeneratorLabel::Boundary(element.clone()), &class);
                }
            }
        }
        Ok(())
    }

    /// Closes every open interval at `index`.
    pub fn end_all_intervals(&mut self, index: usize) -> Result<()> {
        self.intervals.end_all_intervals(index)
    }

    pub fn annotated_barcodes(&self) -> AnnotatedBarcodeCollection<usize, Chain<F, B>> {
        self.intervals.annotated_barcodes()
    }

    pub fn barcodes(&self) -> BarcodeCollection<usize> {
        self.intervals.barcodes()
    }

    pub fn active_generators(&self) -> &BTreeMap<usize, ClassDescriptor<F::Element, B>> {
        self.intervals.active_generators()
    }

    pub fn inactive_generators(&self) -> &AnnotatedBarcodeCollection<usize, Chain<F, B>> {
        self.intervals.inactive_generators()
    }

    /// Open intervals only, all restarted at `index`, closed on both ends.
    pub fn state_without_finite_barcodes(&self, index: usize) -> IntervalTracker<usize, usize, Chain<F, B>> {
        let mut state = self.intervals.restarted_at(index);
        state.set_use_left_closed_intervals(true);
        state.set_use_right_closed_intervals(true);
        state
    }

    pub fn class_cycle(&self, key: usize) -> Option<&Chain<F, B>> {
        self.intervals.active_generators().get(&key).map(|d| &d.generator)
    }

    /// Open classes of `dimension`, oldest first.
    pub fn active_classes(&self, dimension: usize) -> Vec<(usize, &ClassDescriptor<F::Element, B>)> {
        let mut classes: Vec<_> = self
            .intervals
            .active_generators()
            .iter()
            .filter(|(_, d)| d.dimension == dimension)
            .map(|(&k, d)| (k, d))
            .collect();
        classes.sort_by_key(|(k, d)| (d.start, *k));
        classes
    }

    /// Betti numbers of the current complex.
    pub fn betti_numbers(&self) -> BettiNumbers {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for descriptor in self.intervals.active_generators().values() {
            *counts.entry(descriptor.dimension).or_default() += 1;
        }
        let top = counts.keys().next_back().map_or(0, |d| d + 1);
        BettiNumbers::new((0..top).map(|d| counts.get(&d).copied().unwrap_or(0)).collect())
    }

    /// Coordinates of the homology class of `cycle` in the open classes.
    pub fn homology_coordinates(&self, cycle: &Chain<F, B>) -> Result<FormalSum<F::Element, usize>> {
        let dimension = match cycle.dimension() {
            Some(dimension) => dimension,
            None => return Ok(self.keys.zero()),
        };
        let expression = self.decompose(dimension, cycle)?;
        Ok(self.keys.from_terms(expression.iter().filter_map(|(label, c)| match label {
            GeneratorLabel::Class(k) => Some((*k, c.clone())),
            GeneratorLabel::Boundary(_) => None,
        })))
    }

    /// Writes a cycle in terms of column labels of the echelon of `dimension`.
    fn decompose(&self, dimension: usize, cycle: &Chain<F, B>) -> Result<FormalSum<F::Element, GeneratorLabel<B>>> {
        let echelon = match self.echelons.get(&dimension) {
            Some(echelon) => echelon,
            None if cycle.is_zero() => return Ok(self.labels.zero()),
            None => return Err(HomologyError::NotACycle),
        };
        let (residual, combination) = echelon.reduce(cycle.clone(), self.labels.zero());
        if !residual.is_zero() {
            return Err(HomologyError::NotACycle);
        }
        Ok(self.labels.negate(&combination))
    }

    /// Youngest open class appearing in `expression`, with its coefficient.
    fn youngest_class(&self, expression: &FormalSum<F::Element, GeneratorLabel<B>>) -> Option<(usize, F::Element)> {
        let active = self.intervals.active_generators();
        expression
            .iter()
            .filter_map(|(label, c)| match label {
                GeneratorLabel::Class(k) => active.get(k).map(|d| (d.start, *k, c.clone())),
                GeneratorLabel::Boundary(_) => None,
            })
            .max_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)))
            .map(|(_, k, c)| (k, c))
    }

    fn open_class(&mut self, dimension: usize, cycle: Chain<F, B>, index: usize, insert: bool) -> Result<usize> {
        let key = self.next_key;
        self.next_key += 1;
        if insert {
            let echelon = self
                .echelons
                .entry(dimension)
                .or_insert_with(|| Echelon::new(Arc::clone(&self.field)));
            if let Insertion::Kernel(_) = echelon.insert(cycle.clone(), self.labels.singleton(GeneratorLabel::Class(key))) {
                warn!(key, dimension, "new class is dependent on tracked classes");
            }
        }
        trace!(key, dimension, index, "class born");
        self.intervals.start_interval(key, index, dimension, cycle)?;
        Ok(key)
    }

    /// Drops `element` from the complex and from its faces' coface sets.
    fn forget(&mut self, element: &B) {
        self.cofaces.remove(element);
        for (face, _) in element.boundary() {
            if let Some(cofaces) = self.cofaces.get_mut(&face) {
                cofaces.remove(element);
            }
        }
        if let Some(elements) = self.complex.get_mut(&element.dimension()) {
            elements.remove(element);
        }
    }

    /// Re-reduces the echelon of `dimension` from the boundaries of the
    /// (dimension + 1)-elements and the open classes of `dimension`.
    fn rebuild_echelon(&mut self, dimension: usize) {
        let mut echelon = Echelon::new(Arc::clone(&self.field));
        if let Some(cofaces) = self.complex.get(&(dimension + 1)) {
            for tau in cofaces {
                echelon.insert(self.chains.boundary(tau), self.labels.singleton(GeneratorLabel::Boundary(tau.clone())));
            }
        }
        for (key, descriptor) in self.intervals.active_generators() {
            if descriptor.dimension != dimension {
                continue;
            }
            let label = self.labels.singleton(GeneratorLabel::Class(*key));
            if let Insertion::Kernel(_) = echelon.insert(descriptor.generator.clone(), label) {
                warn!(key, dimension, "tracked class became dependent");
            }
        }
        debug!(dimension, columns = echelon.len(), "rebuilt echelon");
        self.echelons.insert(dimension, echelon);
    }
}

impl<F: Field, B: BasisElement> std::fmt::Debug for HomologyBasisTracker<F, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomologyBasisTracker")
            .field("field", &self.field)
            .field("elements", &self.len())
            .field("open_classes", &self.intervals.active_generators().len())
            .finish()
    }
}

/// Persistence computed by feeding a stream, in order, into a
/// [`HomologyBasisTracker`].
#[derive(Debug, Clone)]
pub struct IncrementalPersistence<F: Field> {
    field: Arc<F>,
    config: PersistenceConfig,
}

impl<F: Field> IncrementalPersistence<F> {
    pub fn new(field: Arc<F>, config: PersistenceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { field, config })
    }
}

impl<F: Field, B: BasisElement> PersistenceAlgorithm<B> for IncrementalPersistence<F> {
    fn name(&self) -> String {
        format!("incremental basis tracking over {}", self.field.name())
    }

    fn compute_index_intervals(&self, stream: &dyn FilteredStream<B>) -> Result<BarcodeCollection<usize>> {
        let mut tracker =
            HomologyBasisTracker::with_dimensions(Arc::clone(&self.field), self.config.min_dimension, self.config.max_dimension)?;
        for element in stream.elements()? {
            tracker.add(element.clone(), stream.filtration_index(element)?)?;
        }
        Ok(tracker.barcodes())
    }
}
