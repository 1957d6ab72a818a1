//! Coefficient structure abstractions.
//!
//! A [`Ring`] is a value object describing arithmetic on its `Element`
//! type; it carries no mutable state, so one instance is shared by every
//! module and engine that uses it (see the factory functions in the parent
//! module). A [`Field`] adds division.

use crate::error::AlgebraicError;
use std::fmt;

/// Commutative ring with unit.
pub trait Ring: Send + Sync + fmt::Debug {
    type Element: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn negate(&self, a: &Self::Element) -> Self::Element;
    fn multiply(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn zero(&self) -> Self::Element;
    fn one(&self) -> Self::Element;

    /// Canonical image of an integer.
    fn value_of(&self, n: i64) -> Self::Element;

    /// 0 for characteristic-zero structures.
    fn characteristic(&self) -> u32;

    /// Inverse of `a` when `a` is a unit.
    fn unit_inverse(&self, a: &Self::Element) -> Option<Self::Element>;

    /// Canonical representative of `a`; structures with a single
    /// representation per element return it unchanged.
    fn normalize(&self, a: &Self::Element) -> Self::Element {
        a.clone()
    }

    fn subtract(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.add(a, &self.negate(b))
    }

    fn is_zero(&self, a: &Self::Element) -> bool {
        *a == self.zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        *a == self.one()
    }

    fn is_unit(&self, a: &Self::Element) -> bool {
        self.unit_inverse(a).is_some()
    }

    /// Short human-readable name used in logs.
    fn name(&self) -> String;
}

/// Ring in which every nonzero element is a unit.
pub trait Field: Ring {
    fn invert(&self, a: &Self::Element) -> Result<Self::Element, AlgebraicError> {
        self.unit_inverse(a).ok_or(AlgebraicError::DivisionByZero {
            structure: self.structure_name(),
        })
    }

    fn divide(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element, AlgebraicError> {
        Ok(self.multiply(a, &self.invert(b)?))
    }

    /// Static label reported in division errors.
    fn structure_name(&self) -> &'static str;
}
