//! Chain maps from a product complex onto its factors.

use super::{BasisElement, FormalSum, FreeModule, ProductBasis};
use crate::algebra::Ring;

/// Image of a product chain under the first coordinate projection.
pub fn project_first<R, P>(
    chain: &FormalSum<R::Element, P>,
    product: &FreeModule<R, P>,
    factor: &FreeModule<R, P::Factor>,
) -> FormalSum<R::Element, P::Factor>
where
    R: Ring,
    P: ProductBasis,
{
    product.map_basis(chain, factor, |element| element.first())
}

/// Image of a product chain under the second coordinate projection.
pub fn project_second<R, P>(
    chain: &FormalSum<R::Element, P>,
    product: &FreeModule<R, P>,
    factor: &FreeModule<R, P::Factor>,
) -> FormalSum<R::Element, P::Factor>
where
    R: Ring,
    P: ProductBasis,
{
    product.map_basis(chain, factor, |element| element.second())
}

/// Terms of `chain` whose basis element has the given dimension.
pub fn filter_by_dimension<R, B>(
    chain: &FormalSum<R::Element, B>,
    module: &FreeModule<R, B>,
    dimension: usize,
) -> FormalSum<R::Element, B>
where
    R: Ring,
    B: BasisElement,
{
    module.filter(chain, |element| element.dimension() == dimension)
}
