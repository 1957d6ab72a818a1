//! Filtered streams of basis elements.

use crate::chain::BasisElement;
use crate::error::{malformed, HomologyError, Result};
use std::collections::HashMap;
use tracing::debug;

/// An ordered, filtered complex consumed by the homology algorithms.
///
/// Elements are produced in a stable order in which every face precedes
/// its cofaces. Queries are valid only after [`finalize`](Self::finalize)
/// and fail with `StreamNotFinalized` before.
pub trait FilteredStream<B: BasisElement>: Send + Sync {
    fn finalize(&mut self) -> Result<()>;

    fn is_finalized(&self) -> bool;

    /// Elements in filtration order.
    fn elements(&self) -> Result<&[B]>;

    fn filtration_index(&self, element: &B) -> Result<usize>;

    fn contains(&self, element: &B) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn dimension(&self, element: &B) -> Result<usize> {
        self.filtration_index(element)?;
        Ok(element.dimension())
    }

    fn boundary(&self, element: &B) -> Result<Vec<(B, i64)>> {
        self.filtration_index(element)?;
        Ok(element.boundary())
    }

    /// Largest filtration index, `None` for an empty stream.
    fn max_filtration_index(&self) -> Result<Option<usize>> {
        let elements = self.elements()?;
        match elements.last() {
            Some(last) => Ok(Some(self.filtration_index(last)?)),
            None => Ok(None),
        }
    }
}

/// Stream built by listing elements with their filtration indices.
#[derive(Debug, Clone)]
pub struct ExplicitStream<B: BasisElement> {
    indices: HashMap<B, usize>,
    ordered: Vec<B>,
    finalized: bool,
}

impl<B: BasisElement> ExplicitStream<B> {
    pub fn new() -> Self {
        Self {
            indices: HashMap::new(),
            ordered: Vec::new(),
            finalized: false,
        }
    }

    /// Builds and finalizes a stream from `(element, index)` pairs.
    pub fn from_elements(elements: impl IntoIterator<Item = (B, usize)>) -> Result<Self> {
        let mut stream = Self::new();
        for (element, index) in elements {
            stream.add(element, index)?;
        }
        stream.finalize()?;
        Ok(stream)
    }

    pub fn add(&mut self, element: B, index: usize) -> Result<()> {
        if self.finalized {
            return Err(HomologyError::StreamAlreadyFinalized);
        }
        if self.indices.contains_key(&element) {
            return Err(HomologyError::DuplicateElement(element.to_string()));
        }
        self.indices.insert(element, index);
        Ok(())
    }

    /// Adds `element` together with every missing face, all at `index`.
    /// Faces already present keep their own index.
    pub fn add_with_faces(&mut self, element: B, index: usize) -> Result<()> {
        if self.finalized {
            return Err(HomologyError::StreamAlreadyFinalized);
        }
        let mut pending = vec![element];
        while let Some(next) = pending.pop() {
            if self.indices.contains_key(&next) {
                continue;
            }
            pending.extend(next.boundary().into_iter().map(|(face, _)| face));
            self.indices.insert(next, index);
        }
        Ok(())
    }

    /// Checks that every face is present at an index no later than its
    /// coface, so that faces come first in stream order.
    pub fn validate(&self) -> Result<()> {
        for (element, &index) in &self.indices {
            for (face, _) in element.boundary() {
                match self.indices.get(&face) {
                    Some(&face_index) if face_index <= index => {}
                    _ => return Err(malformed(element, &face)),
                }
            }
        }
        Ok(())
    }
}

impl<B: BasisElement> Default for ExplicitStream<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BasisElement> FilteredStream<B> for ExplicitStream<B> {
    fn finalize(&mut self) -> Result<()> {
        if self.finalized {
            return Ok(());
        }
        let mut ordered: Vec<B> = self.indices.keys().cloned().collect();
        ordered.sort_by(|a, b| {
            self.indices[a]
                .cmp(&self.indices[b])
                .then_with(|| a.dimension().cmp(&b.dimension()))
                .then_with(|| a.cmp(b))
        });
        debug!(elements = ordered.len(), "finalized explicit stream");
        self.ordered = ordered;
        self.finalized = true;
        Ok(())
    }

    fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn elements(&self) -> Result<&[B]> {
        if !self.finalized {
            return Err(HomologyError::StreamNotFinalized);
        }
        Ok(&self.ordered)
    }

    fn filtration_index(&self, element: &B) -> Result<usize> {
        if !self.finalized {
            return Err(HomologyError::StreamNotFinalized);
        }
        self.indices
            .get(element)
            .copied()
            .ok_or_else(|| HomologyError::UnknownElement(element.to_string()))
    }

    fn contains(&self, element: &B) -> bool {
        self.indices.contains_key(element)
    }

    fn len(&self) -> usize {
        self.indices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Simplex;

    #[test]
    fn test_queries_require_finalize() {
        let mut stream = ExplicitStream::new();
        stream.add(Simplex::vertex(0), 0).unwrap();
        assert_eq!(stream.elements().unwrap_err(), HomologyError::StreamNotFinalized);
        assert_eq!(
            stream.filtration_index(&Simplex::vertex(0)).unwrap_err(),
            HomologyError::StreamNotFinalized
        );
        stream.finalize().unwrap();
        assert_eq!(stream.filtration_index(&Simplex::vertex(0)).unwrap(), 0);
        assert_eq!(
            stream.add(Simplex::vertex(1), 0).unwrap_err(),
            HomologyError::StreamAlreadyFinalized
        );
    }

    #[test]
    fn test_add_with_faces_keeps_earlier_indices() {
        let mut stream = ExplicitStream::new();
        stream.add_with_faces(Simplex::vertex(0), 0).unwrap();
        stream.add_with_faces(Simplex::new([0, 1, 2]), 1).unwrap();
        stream.add_with_faces(Simplex::new([0, 3]), 3).unwrap();
        stream.add_with_faces(Simplex::new([1, 3]), 4).unwrap();
        stream.finalize().unwrap();

        assert_eq!(stream.len(), 10);
        assert_eq!(stream.filtration_index(&Simplex::vertex(0)).unwrap(), 0);
        assert_eq!(stream.filtration_index(&Simplex::vertex(2)).unwrap(), 1);
        assert_eq!(stream.filtration_index(&Simplex::vertex(3)).unwrap(), 3);
        assert_eq!(stream.max_filtration_index().unwrap(), Some(4));
        stream.validate().unwrap();
    }

    #[test]
    fn test_order_is_index_then_dimension() {
        let stream = ExplicitStream::from_elements([
            (Simplex::new([0, 1]), 1),
            (Simplex::vertex(1), 1),
            (Simplex::vertex(0), 0),
            (Simplex::vertex(2), 2),
        ])
        .unwrap();
        let shown: Vec<String> = stream.elements().unwrap().iter().map(|s| s.to_string()).collect();
        assert_eq!(shown, vec!["[0]", "[1]", "[0,1]", "[2]"]);
    }

    #[test]
    fn test_validate_rejects_missing_and_late_faces() {
        let missing = ExplicitStream::from_elements([(Simplex::vertex(0), 0), (Simplex::new([0, 1]), 0)]).unwrap();
        assert!(matches!(missing.validate(), Err(HomologyError::MalformedBoundary { .. })));

        let late = ExplicitStream::from_elements([
            (Simplex::vertex(0), 0),
            (Simplex::vertex(1), 2),
            (Simplex::new([0, 1]), 1),
        ])
        .unwrap();
        assert!(matches!(late.validate(), Err(HomologyError::MalformedBoundary { .. })));
    }

    #[test]
    fn test_duplicate_element() {
        let mut stream = ExplicitStream::new();
        stream.add(Simplex::vertex(0), 0).unwrap();
        assert!(matches!(stream.add(Simplex::vertex(0), 1), Err(HomologyError::DuplicateElement(_))));
    }
}
