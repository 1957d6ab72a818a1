//! Basis elements of chain complexes.
//!
//! A basis element knows its dimension and its signed boundary. The `Ord`
//! implementation is the comparator that decides which entry of a column is
//! "low" during reduction, so it must be a total order consistent with `Eq`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

/// Generator of a chain group.
pub trait BasisElement: Clone + Eq + Hash + Ord + fmt::Debug + fmt::Display + Send + Sync {
    fn dimension(&self) -> usize;

    /// Faces with integer incidence coefficients. Empty for 0-dimensional cells.
    fn boundary(&self) -> Vec<(Self, i64)>;
}

/// Basis element of a product complex that maps onto either factor.
///
/// A projection returns `None` when the image collapses to a lower dimension
/// (and so is zero in the chain group), or the image together with the sign
/// of the permutation that sorts it.
pub trait ProductBasis: BasisElement {
    type Factor: BasisElement;

    fn first(&self) -> Option<(Self::Factor, i64)>;
    fn second(&self) -> Option<(Self::Factor, i64)>;
}

/// Oriented simplex on a strictly increasing list of vertices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Simplex {
    vertices: Vec<u32>,
}

impl Simplex {
    /// Sorts and deduplicates the vertices.
    ///
    /// # Panics
    /// If no vertex is given.
    pub fn new(vertices: impl IntoIterator<Item = u32>) -> Self {
        let mut vertices: Vec<u32> = vertices.into_iter().collect();
        vertices.sort_unstable();
        vertices.dedup();
        assert!(!vertices.is_empty(), "a simplex needs at least one vertex");
        Self { vertices }
    }

    /// Like [`Simplex::new`] but also reports the sign of the sorting
    /// permutation, or `None` when a vertex repeats or the list is empty.
    pub fn oriented(vertices: &[u32]) -> Option<(Self, i64)> {
        if vertices.is_empty() {
            return None;
        }
        let mut sorted = vertices.to_vec();
        let sign = permutation_sign(&mut sorted)?;
        Some((Self { vertices: sorted }, sign))
    }

    pub fn vertex(v: u32) -> Self {
        Self { vertices: vec![v] }
    }

    pub fn vertices(&self) -> &[u32] {
        &self.vertices
    }

    /// All faces of every dimension, including the simplex itself.
    pub fn closure(&self) -> Vec<Simplex> {
        let n = self.vertices.len();
        let mut faces: Vec<Simplex> = (1u64..(1u64 << n))
            .map(|mask| Simplex {
                vertices: (0..n)
                    .filter(|i| mask & (1 << i) != 0)
                    .map(|i| self.vertices[i])
                    .collect(),
            })
            .collect();
        faces.sort();
        faces
    }
}

impl Ord for Simplex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.vertices
            .len()
            .cmp(&other.vertices.len())
            .then_with(|| self.vertices.cmp(&other.vertices))
    }
}

impl PartialOrd for Simplex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl BasisElement for Simplex {
    fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }

    fn boundary(&self) -> Vec<(Self, i64)> {
        if self.vertices.len() < 2 {
            return Vec::new();
        }
        (0..self.vertices.len())
            .map(|i| {
                let mut face = self.vertices.clone();
                face.remove(i);
                (Simplex { vertices: face }, alternating_sign(i))
            })
            .collect()
    }
}

impl fmt::Display for Simplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

/// Simplex of a product complex: a sorted list of distinct vertex pairs
/// `(x, y)`, one vertex from each factor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimplexPair {
    vertices: Vec<(u32, u32)>,
}

impl SimplexPair {
    /// Sorts and deduplicates the pairs.
    ///
    /// # Panics
    /// If no pair is given.
    pub fn new(vertices: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut vertices: Vec<(u32, u32)> = vertices.into_iter().collect();
        vertices.sort_unstable();
        vertices.dedup();
        assert!(!vertices.is_empty(), "a simplex pair needs at least one vertex");
        Self { vertices }
    }

    pub fn vertices(&self) -> &[(u32, u32)] {
        &self.vertices
    }

    /// All faces of every dimension, including the element itself.
    pub fn closure(&self) -> Vec<SimplexPair> {
        let n = self.vertices.len();
        let mut faces: Vec<SimplexPair> = (1u64..(1u64 << n))
            .map(|mask| SimplexPair {
                vertices: (0..n)
                    .filter(|i| mask & (1 << i) != 0)
                    .map(|i| self.vertices[i])
                    .collect(),
            })
            .collect();
        faces.sort();
        faces
    }
}

impl Ord for SimplexPair {
    fn cmp(&self, other: &Self) -> Ordering {
        self.vertices
            .len()
            .cmp(&other.vertices.len())
            .then_with(|| self.vertices.cmp(&other.vertices))
    }
}

impl PartialOrd for SimplexPair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl BasisElement for SimplexPair {
    fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }

    fn boundary(&self) -> Vec<(Self, i64)> {
        if self.vertices.len() < 2 {
            return Vec::new();
        }
        (0..self.vertices.len())
            .map(|i| {
                let mut face = self.vertices.clone();
                face.remove(i);
                (SimplexPair { vertices: face }, alternating_sign(i))
            })
            .collect()
    }
}

impl ProductBasis for SimplexPair {
    type Factor = Simplex;

    fn first(&self) -> Option<(Simplex, i64)> {
        let xs: Vec<u32> = self.vertices.iter().map(|&(x, _)| x).collect();
        Simplex::oriented(&xs)
    }

    fn second(&self) -> Option<(Simplex, i64)> {
        let ys: Vec<u32> = self.vertices.iter().map(|&(_, y)| y).collect();
        Simplex::oriented(&ys)
    }
}

impl fmt::Display for SimplexPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (x, y)) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "({},{})", x, y)?;
        }
        write!(f, "]")
    }
}

fn alternating_sign(i: usize) -> i64 {
    if i % 2 == 0 {
        1
    } else {
        -1
    }
}

/// Sorts `values` in place and returns the parity of the sort, or `None`
/// if two values coincide.
fn permutation_sign(values: &mut [u32]) -> Option<i64> {
    let mut sign = 1;
    for i in 1..values.len() {
        let mut j = i;
        while j > 0 && values[j - 1] > values[j] {
            values.swap(j - 1, j);
            sign = -sign;
            j -= 1;
        }
        if j > 0 && values[j - 1] == values[j] {
            return None;
        }
    }
    Some(sign)
}
