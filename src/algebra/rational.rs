//! The rationals, with machine-word and arbitrary-precision representations.

use super::{Field, Ring};
use num_bigint::BigInt;
use num_rational::{BigRational, Rational64};
use num_traits::{One, Zero};

/// Q backed by `Rational64`. Intermediate values must fit in `i64`;
/// prefer [`BigRationalField`] unless coefficients are known to stay small.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RationalField;

/// Q backed by `BigRational`, for coefficients that outgrow machine words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BigRationalField;

impl Ring for RationalField {
    type Element = Rational64;

    fn add(&self, a: &Rational64, b: &Rational64) -> Rational64 {
        a + b
    }

    fn subtract(&self, a: &Rational64, b: &Rational64) -> Rational64 {
        a - b
    }

    fn negate(&self, a: &Rational64) -> Rational64 {
        -a
    }

    fn multiply(&self, a: &Rational64, b: &Rational64) -> Rational64 {
        a * b
    }

    fn zero(&self) -> Rational64 {
        Rational64::zero()
    }

    fn one(&self) -> Rational64 {
        Rational64::one()
    }

    fn value_of(&self, n: i64) -> Rational64 {
        Rational64::from_integer(n)
    }

    fn characteristic(&self) -> u32 {
        0
    }

    fn unit_inverse(&self, a: &Rational64) -> Option<Rational64> {
        if a.is_zero() {
            None
        } else {
            Some(a.recip())
        }
    }

    fn is_zero(&self, a: &Rational64) -> bool {
        a.is_zero()
    }

    fn name(&self) -> String {
        "Q".to_string()
    }
}

impl Field for RationalField {
    fn structure_name(&self) -> &'static str {
        "Q"
    }
}

impl Ring for BigRationalField {
    type Element = BigRational;

    fn add(&self, a: &BigRational, b: &BigRational) -> BigRational {
        a + b
    }

    fn subtract(&self, a: &BigRational, b: &BigRational) -> BigRational {
        a - b
    }

    fn negate(&self, a: &BigRational) -> BigRational {
        -a
    }

    fn multiply(&self, a: &BigRational, b: &BigRational) -> BigRational {
        a * b
    }

    fn zero(&self) -> BigRational {
        BigRational::zero()
    }

    fn one(&self) -> BigRational {
        BigRational::one()
    }

    fn value_of(&self, n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    fn characteristic(&self) -> u32 {
        0
    }

    fn unit_inverse(&self, a: &BigRational) -> Option<BigRational> {
        if a.is_zero() {
            None
        } else {
            Some(a.recip())
        }
    }

    fn is_zero(&self, a: &BigRational) -> bool {
        a.is_zero()
    }

    fn name(&self) -> String {
        "Q (big)".to_string()
    }
}

impl Field for BigRationalField {
    fn structure_name(&self) -> &'static str {
        "Q"
    }
}
