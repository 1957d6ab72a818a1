//! Small filtered complexes with known barcodes.
//!
//! Vertices are labelled `0..n`. Every function returns a finalized stream.

use super::{ExplicitStream, FilteredStream};
use crate::chain::Simplex;
use crate::error::Result;

fn build(entries: impl IntoIterator<Item = (Vec<u32>, usize)>) -> Result<ExplicitStream<Simplex>> {
    ExplicitStream::from_elements(entries.into_iter().map(|(v, i)| (Simplex::new(v), i)))
}

/// Hollow triangle: vertices at index 0, edges at index 1.
pub fn triangle_loop() -> Result<ExplicitStream<Simplex>> {
    build([
        (vec![0], 0),
        (vec![1], 0),
        (vec![2], 0),
        (vec![0, 1], 1),
        (vec![1, 2], 1),
        (vec![0, 2], 1),
    ])
}

/// Boundary of the 3-simplex, every face at index 0.
pub fn tetrahedron_boundary() -> Result<ExplicitStream<Simplex>> {
    let mut stream = ExplicitStream::new();
    for face in [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]] {
        stream.add_with_faces(Simplex::new(face), 0)?;
    }
    stream.finalize()?;
    Ok(stream)
}

/// The running example of Zomorodian and Carlsson, "Computing Persistent
/// Homology" (2005), with a, b, c, d labelled 0, 1, 2, 3.
///
/// Barcode: H0 `[0,∞) [0,1) [1,2)`, H1 `[2,5) [3,4)`.
pub fn zomorodian_carlsson() -> Result<ExplicitStream<Simplex>> {
    build([
        (vec![0], 0),
        (vec![1], 0),
        (vec![2], 1),
        (vec![3], 1),
        (vec![0, 1], 1),
        (vec![1, 2], 1),
        (vec![2, 3], 2),
        (vec![0, 3], 2),
        (vec![0, 2], 3),
        (vec![0, 1, 2], 4),
        (vec![0, 2, 3], 5),
    ])
}

/// Cycle graph on `n` vertices (at least 3): vertices at 0, edges at 1.
pub fn circle(n: u32) -> Result<ExplicitStream<Simplex>> {
    let n = n.max(3);
    let vertices = (0..n).map(|v| (vec![v], 0));
    let edges = (0..n).map(|v| (vec![v, (v + 1) % n], 1));
    build(vertices.chain(edges))
}

/// Octahedral 2-sphere: vertices at 0, edges at 1, triangles at 2.
pub fn octahedron() -> Result<ExplicitStream<Simplex>> {
    let mut entries = Vec::new();
    for v in 0..6 {
        entries.push((vec![v], 0));
    }
    for a in 0..6u32 {
        for b in (a + 1)..6 {
            if a / 2 != b / 2 {
                entries.push((vec![a, b], 1));
            }
        }
    }
    for x in [0, 1] {
        for y in [2, 3] {
            for z in [4, 5] {
                entries.push((vec![x, y, z], 2));
            }
        }
    }
    build(entries)
}

/// Square 0-1-2-3 filled by the triangles [0,1,2] and [0,2,3], all at 0.
pub fn filled_square() -> Result<ExplicitStream<Simplex>> {
    let mut stream = ExplicitStream::new();
    stream.add_with_faces(Simplex::new([0, 1, 2]), 0)?;
    stream.add_with_faces(Simplex::new([0, 2, 3]), 0)?;
    stream.finalize()?;
    Ok(stream)
}

/// A vertex, then a filled triangle at index 1, then two edges to a fourth
/// vertex at indices 3 and 4. Every pairing except H0 `[0,∞)` and H1
/// `[4,∞)` has zero length.
pub fn explicit_example() -> Result<ExplicitStream<Simplex>> {
    let mut stream = ExplicitStream::new();
    stream.add_with_faces(Simplex::vertex(0), 0)?;
    stream.add_with_faces(Simplex::new([0, 1, 2]), 1)?;
    stream.add_with_faces(Simplex::new([0, 3]), 3)?;
    stream.add_with_faces(Simplex::new([1, 3]), 4)?;
    stream.finalize()?;
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_streams_are_well_formed() {
        let streams = [
            triangle_loop().unwrap(),
            tetrahedron_boundary().unwrap(),
            zomorodian_carlsson().unwrap(),
            circle(5).unwrap(),
            octahedron().unwrap(),
            filled_square().unwrap(),
            explicit_example().unwrap(),
        ];
        for stream in &streams {
            assert!(stream.is_finalized());
            stream.validate().unwrap();
        }
        assert_eq!(streams[1].len(), 14);
        assert_eq!(streams[4].len(), 6 + 12 + 8);
        assert_eq!(streams[5].len(), 4 + 5 + 2);
        assert_eq!(streams[6].len(), 10);
    }
}
