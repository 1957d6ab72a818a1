//! Algebra Module: Coefficient Rings and Fields
//!
//! Homology is computed over a coefficient structure chosen by the caller:
//!
//! - `ModularIntField`: Z/pZ for a prime p (inverse table built once per p)
//! - `BooleanField`: Z/2Z on `bool`
//! - `BigIntegerRing`: Z, where only ±1 are invertible
//! - `BigRationalField`: Q, the general-purpose choice
//! - `RationalField`: Q on `Rational64`; faster, but long reductions can
//!   overflow `i64` and panic
//!
//! Structures are immutable and shared through `Arc` handles returned by the
//! factory functions below.

mod ring;
mod modular;
mod boolean;
mod integer;
mod rational;

pub use ring::{Field, Ring};
pub use modular::{modular_field, ModularIntField};
pub use boolean::BooleanField;
pub use integer::BigIntegerRing;
pub use rational::{BigRationalField, RationalField};

use std::sync::Arc;

pub fn boolean_field() -> Arc<BooleanField> {
    Arc::new(BooleanField)
}

pub fn integer_ring() -> Arc<BigIntegerRing> {
    Arc::new(BigIntegerRing)
}

pub fn rational_field() -> Arc<RationalField> {
    Arc::new(RationalField)
}

pub fn big_rational_field() -> Arc<BigRationalField> {
    Arc::new(BigRationalField)
}
