//! Seeded random flag complexes: the reduction engine and the incremental
//! tracker must agree, and Betti numbers of the zigzag tracker must match a
//! recomputation from scratch after removals and re-additions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::sync::Arc;
use tda_persistence::{
    cross_validate, integer_ring, modular_field, BasisElement, BettiNumbers, ModularIntField, rational_field, ExplicitStream, FilteredStream, HomologyBasisTracker,
    IncrementalPersistence, PersistenceAlgorithm, PersistenceConfig, PersistentHomology, Simplex,
};

/// Vertices at 0, each edge at a random index in `1..=4`, each triangle of
/// the clique complex at the latest index of its edges.
fn random_flag_complex(seed: u64, vertices: u32, density: f64) -> ExplicitStream<Simplex> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges: BTreeMap<(u32, u32), usize> = BTreeMap::new();
    for a in 0..vertices {
        for b in (a + 1)..vertices {
            if rng.gen_bool(density) {
                edges.insert((a, b), rng.gen_range(1..=4));
            }
        }
    }

    let mut elements: Vec<(Simplex, usize)> = (0..vertices).map(|v| (Simplex::vertex(v), 0)).collect();
    elements.extend(edges.iter().map(|(&(a, b), &index)| (Simplex::new([a, b]), index)));
    for a in 0..vertices {
        for b in (a + 1)..vertices {
            for c in (b + 1)..vertices {
                if let (Some(ab), Some(bc), Some(ac)) = (edges.get(&(a, b)), edges.get(&(b, c)), edges.get(&(a, c))) {
                    elements.push((Simplex::new([a, b, c]), *ab.max(bc).max(ac)));
                }
            }
        }
    }
    ExplicitStream::from_elements(elements).unwrap()
}

fn is_proper_face(face: &Simplex, of: &Simplex) -> bool {
    face.vertices().len() < of.vertices().len() && face.vertices().iter().all(|v| of.vertices().contains(v))
}

fn recomputed_betti_numbers(field: &Arc<ModularIntField>, complex: &[Simplex]) -> BettiNumbers {
    let rebuilt = ExplicitStream::from_elements(complex.iter().map(|s| (s.clone(), 0))).unwrap();
    PersistentHomology::absolute(Arc::clone(field), 0, 2)
        .unwrap()
        .compute_index_intervals(&rebuilt)
        .unwrap()
        .betti_sequence()
}

fn assert_generators_are_cycles(tracker: &HomologyBasisTracker<ModularIntField, Simplex>, context: &str) {
    for descriptor in tracker.active_generators().values() {
        assert!(descriptor.generator.basis_elements().all(|s| tracker.contains(s)), "{}", context);
        assert!(tracker.chain_module().boundary_of(&descriptor.generator).is_zero(), "{}", context);
    }
}

#[test]
fn reduction_and_tracking_agree_on_flag_complexes() {
    for seed in 0..12 {
        let stream = random_flag_complex(seed, 8, 0.45);
        let z2 = modular_field(2).unwrap();
        let q = rational_field();

        let reduction_z2 = PersistentHomology::absolute(Arc::clone(&z2), 0, 1).unwrap();
        let tracking_z2 = IncrementalPersistence::new(z2, PersistenceConfig::up_to(1)).unwrap();
        let reduction_q = PersistentHomology::absolute(Arc::clone(&q), 0, 1).unwrap();
        let reduction_z = PersistentHomology::absolute(integer_ring(), 0, 1).unwrap();
        let tracking_q = IncrementalPersistence::new(q, PersistenceConfig::up_to(1)).unwrap();

        let over_two: Vec<&dyn PersistenceAlgorithm<Simplex>> = vec![&reduction_z2, &tracking_z2];
        let report = cross_validate(&over_two, &stream).unwrap();
        assert!(report.agree(), "seed {}: {:?}", seed, report.disagreements());

        let over_q: Vec<&dyn PersistenceAlgorithm<Simplex>> = vec![&reduction_q, &reduction_z, &tracking_q];
        let report = cross_validate(&over_q, &stream).unwrap();
        assert!(report.agree(), "seed {}: {:?}", seed, report.disagreements());
    }
}

#[test]
fn removals_match_recomputation() {
    for seed in 100..106 {
        let stream = random_flag_complex(seed, 7, 0.55);
        let field = modular_field(3).unwrap();
        let mut tracker = HomologyBasisTracker::new(Arc::clone(&field));
        for element in stream.elements().unwrap() {
            tracker.add(element.clone(), stream.filtration_index(element).unwrap()).unwrap();
        }

        // Peel off maximal elements from the end of the stream.
        let mut remaining: Vec<Simplex> = stream.elements().unwrap().to_vec();
        let mut index = stream.max_filtration_index().unwrap().unwrap_or(0) + 1;
        let mut rng = StdRng::seed_from_u64(seed);
        while remaining.len() > 1 {
            let maximal: Vec<usize> = (0..remaining.len())
                .filter(|&i| !remaining.iter().any(|other| is_proper_face(&remaining[i], other)))
                .collect();
            let victim = remaining.remove(maximal[rng.gen_range(0..maximal.len())]);
            tracker.remove(&victim, index).unwrap();
            index += 1;

            let expected = recomputed_betti_numbers(&field, &remaining);
            assert_eq!(tracker.betti_numbers(), expected, "seed {} after removing {}", seed, victim);
            assert_generators_are_cycles(&tracker, &format!("seed {} after removing {}", seed, victim));
        }
    }
}

#[test]
fn interleaved_additions_and_removals_match_recomputation() {
    for seed in 200..210 {
        let stream = random_flag_complex(seed, 7, 0.6);
        let pool: Vec<Simplex> = stream.elements().unwrap().to_vec();
        let field = modular_field(5).unwrap();
        let mut tracker: HomologyBasisTracker<_, Simplex> = HomologyBasisTracker::new(Arc::clone(&field));
        let mut present: Vec<Simplex> = Vec::new();
        let mut rng = StdRng::seed_from_u64(seed);

        // Grow to roughly half the pool, then alternate shrinking and growing.
        let mut index = 0;
        for step in 0..120 {
            let grow = if step < pool.len() / 2 { true } else { rng.gen_bool(0.5) };
            let addable: Vec<&Simplex> = pool
                .iter()
                .filter(|s| !tracker.contains(s) && s.boundary().iter().all(|(face, _)| tracker.contains(face)))
                .collect();
            let removable: Vec<usize> = (0..present.len())
                .filter(|&i| !present.iter().any(|other| is_proper_face(&present[i], other)))
                .collect();

            if (grow || present.len() < 2) && !addable.is_empty() {
                let element = addable[rng.gen_range(0..addable.len())].clone();
                tracker.add(element.clone(), index).unwrap();
                present.push(element);
            } else if present.len() >= 2 {
                let victim = present.remove(removable[rng.gen_range(0..removable.len())]);
                tracker.remove(&victim, index).unwrap();
            } else {
                continue;
            }
            index += 1;

            let context = format!("seed {} step {}", seed, step);
            assert_eq!(tracker.len(), present.len(), "{}", context);
            assert_eq!(tracker.betti_numbers(), recomputed_betti_numbers(&field, &present), "{}", context);
            assert_generators_are_cycles(&tracker, &context);
        }
    }
}
