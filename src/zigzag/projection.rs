//! Transport of tracked classes across a zigzag `X ← Z → Y`.
//!
//! `Z` is a complex on pairs whose coordinate projections land in `X` and
//! `Y`. A class α of `X` reaches `Y` when α = p₁(ζ) for a class ζ of `Z`;
//! its image p₂(ζ) is then determined up to p₂(ker p₁). Classes that do
//! not lift, or whose image vanishes, close at the previous index. Classes
//! of `Y` not reached by any survivor open at the new index.

use super::basis_tracker::HomologyBasisTracker;
use super::interval_tracker::IntervalTracker;
use crate::algebra::Field;
use crate::chain::{project_first, project_second, BasisElement, FormalSum, FreeModule, ProductBasis};
use crate::error::Result;
use crate::persistence::{Echelon, Insertion};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;

/// Column label when lifting classes of `X` through `Z`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Lift {
    Bridge(usize),
    Tracked(usize),
}

type Chain<F, B> = FormalSum<<F as crate::algebra::Ring>::Element, B>;

/// Carries the open classes of `result` (cycles of `x`) over to `y`.
///
/// Returns a copy of `result` in which surviving classes carry cycles of
/// `y` as generators, dying classes are closed at `previous_index`, and
/// newly reached classes of `y` are opened at `index`. Elder classes
/// survive first. Only dimensions inside the window of `result` are
/// considered.
pub fn project<F, B, P>(
    x: &HomologyBasisTracker<F, B>,
    z: &HomologyBasisTracker<F, P>,
    y: &HomologyBasisTracker<F, B>,
    result: &IntervalTracker<usize, usize, Chain<F, B>>,
    chain_module: &FreeModule<F, B>,
    previous_index: usize,
    index: usize,
) -> Result<IntervalTracker<usize, usize, Chain<F, B>>>
where
    F: Field,
    B: BasisElement,
    P: ProductBasis<Factor = B>,
{
    let field = Arc::clone(x.field());
    let product = z.chain_module();
    let coordinates: FreeModule<F, usize> = FreeModule::new(Arc::clone(&field));
    let lifts: FreeModule<F, Lift> = FreeModule::new(Arc::clone(&field));

    let mut next = result.clone();
    let mut next_key = result.active_generators().keys().next_back().map_or(0, |k| k + 1);

    let window = result.min_dimension()..=result.max_dimension();
    let dimensions: BTreeSet<usize> = result
        .active_generators()
        .values()
        .chain(y.active_generators().values())
        .map(|d| d.dimension)
        .filter(|d| window.contains(d))
        .collect();

    for dimension in dimensions {
        let mut lift: Echelon<F, usize, Lift> = Echelon::new(Arc::clone(&field));
        let mut images: BTreeMap<usize, FormalSum<F::Element, usize>> = BTreeMap::new();
        // Span of p₂(ker p₁) and the images of surviving classes.
        let mut ambiguity: Echelon<F, usize, usize> = Echelon::new(Arc::clone(&field));
        let mut reached: Echelon<F, usize, usize> = Echelon::new(Arc::clone(&field));

        for (key, descriptor) in z.active_classes(dimension) {
            let first = x.homology_coordinates(&project_first(&descriptor.generator, product, chain_module))?;
            let second = y.homology_coordinates(&project_second(&descriptor.generator, product, chain_module))?;
            images.insert(key, second);
            if let Insertion::Kernel(combination) = lift.insert(first, lifts.singleton(Lift::Bridge(key))) {
                let mut image = coordinates.zero();
                for (label, c) in &combination {
                    if let Lift::Bridge(a) = label {
                        if let Some(qy) = images.get(a) {
                            coordinates.accumulate_scaled(&mut image, qy, c);
                        }
                    }
                }
                ambiguity.insert(image, coordinates.zero());
            }
        }

        let mut tracked: Vec<(usize, usize)> = result
            .active_generators()
            .iter()
            .filter(|(_, d)| d.dimension == dimension)
            .map(|(&k, d)| (d.start, k))
            .collect();
        tracked.sort_unstable();

        let (mut survived, mut died, mut born) = (0usize, 0usize, 0usize);
        for (_, key) in tracked {
            let cycle = match result.active_generators().get(&key) {
                Some(descriptor) => &descriptor.generator,
                None => continue,
            };
            let coordinates_in_x = x.homology_coordinates(cycle)?;
            let combination = match lift.insert(coordinates_in_x, lifts.singleton(Lift::Tracked(key))) {
                Insertion::Pivot(_) => {
                    next.end_interval(&key, previous_index)?;
                    died += 1;
                    continue;
                }
                Insertion::Kernel(combination) => combination,
            };

            // combination = Tracked(key) + older tracked + Σ β_a Bridge(a) ≡ 0
            let mut image = coordinates.zero();
            for (label, beta) in &combination {
                if let Lift::Bridge(a) = label {
                    if let Some(qy) = images.get(a) {
                        coordinates.accumulate_scaled(&mut image, qy, &field.negate(beta));
                    }
                }
            }
            match ambiguity.insert(image.clone(), coordinates.singleton(key)) {
                Insertion::Kernel(_) => {
                    next.end_interval(&key, previous_index)?;
                    died += 1;
                }
                Insertion::Pivot(_) => {
                    let mut generator = chain_module.zero();
                    for (class, c) in &image {
                        if let Some(class_cycle) = y.class_cycle(*class) {
                            chain_module.accumulate_scaled(&mut generator, class_cycle, c);
                        }
                    }
                    next.update_generator(&key, generator)?;
                    reached.insert(image, coordinates.singleton(key));
                    survived += 1;
                }
            }
        }

        for (class, descriptor) in y.active_classes(dimension) {
            if let Insertion::Pivot(_) = reached.insert(coordinates.singleton(class), coordinates.singleton(class)) {
                next.start_interval(next_key, index, dimension, descriptor.generator.clone())?;
                next_key += 1;
                born += 1;
            }
        }
        debug!(dimension, survived, died, born, previous_index, index, "projected classes");
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{modular_field, ModularIntField};
    use crate::barcode::Interval;
    use crate::chain::{Simplex, SimplexPair};
    use crate::stream::{catalog, ExplicitStream, FilteredStream};

    fn build<B: BasisElement>(stream: &dyn FilteredStream<B>) -> HomologyBasisTracker<ModularIntField, B> {
        let mut tracker = HomologyBasisTracker::new(modular_field(3).unwrap());
        for element in stream.elements().unwrap() {
            tracker.add(element.clone(), stream.filtration_index(element).unwrap()).unwrap();
        }
        tracker
    }

    fn diagonal_loop(n: u32) -> ExplicitStream<SimplexPair> {
        let mut stream = ExplicitStream::new();
        for i in 0..n {
            let j = (i + 1) % n;
            stream.add_with_faces(SimplexPair::new([(i, i), (j, j)]), 0).unwrap();
        }
        stream.finalize().unwrap();
        stream
    }

    #[test]
    fn test_identical_loops_keep_every_class() {
        let x = build(&catalog::circle(4).unwrap());
        let y = build(&catalog::circle(4).unwrap());
        let z = build(&diagonal_loop(4));
        let start = x.state_without_finite_barcodes(0);
        let mut next = project(&x, &z, &y, &start, y.chain_module(), 0, 1).unwrap();
        assert_eq!(next.active_generators().len(), 2);
        for descriptor in next.active_generators().values() {
            assert_eq!(descriptor.start, 0);
            assert!(descriptor.generator.basis_elements().all(|s| y.contains(s)));
            assert!(y.chain_module().boundary_of(&descriptor.generator).is_zero());
        }
        next.end_all_intervals(1).unwrap();
        let barcodes = next.barcodes();
        assert_eq!(barcodes.intervals(0), &[Interval::closed(0, 1)]);
        assert_eq!(barcodes.intervals(1), &[Interval::closed(0, 1)]);
    }

    #[test]
    fn test_loop_filled_in_target_dies() {
        let x = build(&catalog::circle(4).unwrap());
        let y = build(&catalog::filled_square().unwrap());
        let z = build(&diagonal_loop(4));
        let start = x.state_without_finite_barcodes(0);
        let next = project(&x, &z, &y, &start, y.chain_module(), 0, 1).unwrap();
        assert_eq!(next.inactive_generators().intervals(1).len(), 1);
        assert_eq!(next.inactive_generators().intervals(1)[0].0, Interval::closed(0, 0));
        assert_eq!(next.active_generators().len(), 1);
    }

    #[test]
    fn test_unreached_classes_open_at_new_index() {
        // Only vertex 0 is shared, so the loop of Y is new.
        let x = build(&ExplicitStream::from_elements([(Simplex::vertex(0), 0)]).unwrap());
        let y = build(&catalog::circle(4).unwrap());
        let mut bridge = ExplicitStream::new();
        bridge.add(SimplexPair::new([(0, 0)]), 0).unwrap();
        bridge.finalize().unwrap();
        let z = build(&bridge);

        let start = x.state_without_finite_barcodes(0);
        let next = project(&x, &z, &y, &start, y.chain_module(), 0, 1).unwrap();
        let starts: Vec<(usize, usize)> =
            next.active_generators().values().map(|d| (d.dimension, d.start)).collect();
        assert!(starts.contains(&(0, 0)));
        assert!(starts.contains(&(1, 1)));
        assert_eq!(starts.len(), 2);
    }
}
