//! End-to-end scenarios across streams, coefficients and algorithms.

use std::sync::Arc;
use tda_persistence::barcode::{BarcodeCollection, Interval};
use tda_persistence::chain::{filter_by_dimension, project_first, project_second};
use tda_persistence::stream::catalog;
use tda_persistence::{
    big_rational_field, boolean_field, cross_validate, integer_ring, modular_field, rational_field, BasisElement,
    ExplicitStream, FilteredStream, FreeModule, IncrementalPersistence, PersistenceAlgorithm, PersistenceConfig,
    PersistentHomology, Ring, Simplex, SimplexPair,
};

fn subcomplex_stream(stream: &ExplicitStream<Simplex>, subcomplex: &[Simplex]) -> ExplicitStream<Simplex> {
    ExplicitStream::from_elements(
        subcomplex
            .iter()
            .map(|s| (s.clone(), stream.filtration_index(s).unwrap())),
    )
    .unwrap()
}

fn check_exact_sequence(stream: &ExplicitStream<Simplex>, subcomplex: Vec<Simplex>) {
    let field = modular_field(3).unwrap();
    let absolute = PersistentHomology::absolute(Arc::clone(&field), 0, 2).unwrap();
    let relative = PersistentHomology::relative(field, 0, 2, subcomplex.iter().cloned()).unwrap();

    let x = absolute.compute_index_intervals(stream).unwrap();
    let a = absolute
        .compute_index_intervals(&subcomplex_stream(stream, &subcomplex))
        .unwrap();
    let xa = relative.compute_index_intervals(stream).unwrap();

    let last = stream.max_filtration_index().unwrap().unwrap();
    for index in 0..=last {
        let (bx, ba, bxa) = (x.betti_numbers_at(&index), a.betti_numbers_at(&index), xa.betti_numbers_at(&index));
        assert_eq!(
            bx.euler_characteristic(),
            ba.euler_characteristic() + bxa.euler_characteristic(),
            "Euler characteristics at index {}",
            index
        );
        for dimension in 0..=2 {
            assert!(bx.get(dimension) <= ba.get(dimension) + bxa.get(dimension));
            assert!(bxa.get(dimension) <= bx.get(dimension) + ba.get(dimension.saturating_sub(1)));
        }
    }
}

#[test]
fn triangle_boundary_over_two_elements() {
    let stream = catalog::triangle_loop().unwrap();
    let barcodes = PersistentHomology::absolute(modular_field(2).unwrap(), 0, 2)
        .unwrap()
        .compute_index_intervals(&stream)
        .unwrap();

    let mut expected = BarcodeCollection::new();
    expected.add_right_infinite_interval(0, 0);
    expected.add_right_infinite_interval(1, 1);
    assert_eq!(barcodes, expected);
    assert!(barcodes.intervals(2).is_empty());
}

#[test]
fn tetrahedron_boundary_betti_sequence() {
    let stream = catalog::tetrahedron_boundary().unwrap();
    let engines: Vec<Box<dyn PersistenceAlgorithm<Simplex>>> = vec![
        Box::new(PersistentHomology::absolute(modular_field(2).unwrap(), 0, 2).unwrap()),
        Box::new(PersistentHomology::absolute(modular_field(7).unwrap(), 0, 2).unwrap()),
        Box::new(PersistentHomology::absolute(boolean_field(), 0, 2).unwrap()),
        Box::new(PersistentHomology::absolute(rational_field(), 0, 2).unwrap()),
        Box::new(PersistentHomology::absolute(big_rational_field(), 0, 2).unwrap()),
        Box::new(PersistentHomology::absolute(integer_ring(), 0, 2).unwrap()),
    ];
    for engine in &engines {
        let barcodes = engine.compute_index_intervals(&stream).unwrap();
        assert_eq!(barcodes.betti_sequence().as_slice(), &[1, 0, 1], "{}", engine.name());
    }
}

#[test]
fn algorithms_agree_on_catalog() {
    let field = modular_field(5).unwrap();
    let reduction = PersistentHomology::absolute(Arc::clone(&field), 0, 2).unwrap();
    let incremental = IncrementalPersistence::new(field, PersistenceConfig::up_to(2)).unwrap();
    let algorithms: Vec<&dyn PersistenceAlgorithm<Simplex>> = vec![&reduction, &incremental];

    let streams = [
        catalog::triangle_loop().unwrap(),
        catalog::tetrahedron_boundary().unwrap(),
        catalog::zomorodian_carlsson().unwrap(),
        catalog::circle(9).unwrap(),
        catalog::octahedron().unwrap(),
        catalog::filled_square().unwrap(),
        catalog::explicit_example().unwrap(),
    ];
    for stream in &streams {
        let report = cross_validate(&algorithms, stream).unwrap();
        assert!(report.agree(), "disagreeing: {:?}", report.disagreements());
    }
}

#[test]
fn reduction_is_deterministic() {
    let stream = catalog::octahedron().unwrap();
    let engine = PersistentHomology::absolute(rational_field(), 0, 2).unwrap();
    let first = engine.compute_annotated_index_intervals(&stream).unwrap();
    let second = engine.compute_annotated_index_intervals(&stream).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        format!("{}", first.forget_generators()),
        format!("{}", second.forget_generators())
    );
}

#[test]
fn exact_sequence_of_sphere_and_disk() {
    let stream = catalog::octahedron().unwrap();
    check_exact_sequence(&stream, Simplex::new([0, 2, 4]).closure());
}

#[test]
fn exact_sequence_of_sphere_and_equator() {
    let stream = catalog::octahedron().unwrap();
    let equator = [[0, 2], [2, 1], [1, 3], [3, 0]]
        .iter()
        .flat_map(|edge| Simplex::new(edge.iter().copied()).closure())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();
    check_exact_sequence(&stream, equator);
}

#[test]
fn exact_sequence_of_filtration_with_loops() {
    let stream = catalog::zomorodian_carlsson().unwrap();
    let path = [Simplex::vertex(0), Simplex::vertex(1), Simplex::new([0, 1])];
    check_exact_sequence(&stream, path.to_vec());
}

#[test]
fn projections_filter_by_dimension() {
    let field = modular_field(3).unwrap();
    let pairs: FreeModule<_, SimplexPair> = FreeModule::new(Arc::clone(&field));
    let simplices: FreeModule<_, Simplex> = FreeModule::new(field);
    let chain = pairs.from_int_terms([
        (SimplexPair::new([(0, 0), (1, 1)]), 1),
        (SimplexPair::new([(1, 1), (2, 2)]), 2),
        (SimplexPair::new([(0, 5), (1, 5)]), 1),
        (SimplexPair::new([(0, 0), (1, 1), (2, 2)]), 1),
    ]);

    let edges = filter_by_dimension(&project_first(&chain, &pairs, &simplices), &simplices, 1);
    let mut direct = simplices.zero();
    for (element, coefficient) in &chain {
        if element.dimension() != 1 {
            continue;
        }
        let xs: Vec<u32> = element.vertices().iter().map(|&(x, _)| x).collect();
        if let Some((face, sign)) = Simplex::oriented(&xs) {
            let signed = simplices.ring().multiply(coefficient, &simplices.ring().value_of(sign));
            simplices.accumulate(&mut direct, face, signed);
        }
    }
    assert_eq!(edges, direct);
    assert_eq!(edges.coefficient(&Simplex::new([0, 1])), Some(&2));

    let second = filter_by_dimension(&project_second(&chain, &pairs, &simplices), &simplices, 1);
    assert!(!second.contains(&Simplex::new([5])));
    assert_eq!(second.len(), 2);
}

#[test]
fn barcodes_survive_json() {
    let stream = catalog::zomorodian_carlsson().unwrap();
    let barcodes = PersistentHomology::absolute(rational_field(), 0, 2)
        .unwrap()
        .compute_index_intervals(&stream)
        .unwrap();
    let json = serde_json::to_string(&barcodes).unwrap();
    let restored: BarcodeCollection<usize> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, barcodes);
    assert_eq!(restored.intervals(1).len(), 2);
    assert!(restored.intervals(1).contains(&Interval::half_open(2, 5)));
}
