//! Chain Module: Formal Sums, Free Modules and Basis Elements
//!
//! Chains are sparse linear combinations of basis elements with
//! coefficients in a [`Ring`](crate::algebra::Ring). The boundary of a
//! basis element comes from the [`BasisElement`] trait; a [`FreeModule`]
//! extends it linearly and owns all arithmetic on [`FormalSum`] values.
//!
//! ## Basis Types
//!
//! - `Simplex`: oriented simplex, ordered by dimension then vertices
//! - `SimplexPair`: simplex of a product complex, projecting onto either factor

mod formal_sum;
mod free_module;
mod basis;
pub mod projection;
pub mod matrix;

pub use formal_sum::FormalSum;
pub use free_module::FreeModule;
pub use basis::{BasisElement, ProductBasis, Simplex, SimplexPair};
pub use projection::{filter_by_dimension, project_first, project_second};
pub use matrix::MatrixConverter;
