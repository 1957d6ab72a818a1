//! Arbitrary-precision integers as a coefficient ring.

use super::Ring;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// The ring Z. Only `1` and `-1` are units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BigIntegerRing;

impl Ring for BigIntegerRing {
    type Element = BigInt;

    fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a + b
    }

    fn subtract(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a - b
    }

    fn negate(&self, a: &BigInt) -> BigInt {
        -a
    }

    fn multiply(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a * b
    }

    fn zero(&self) -> BigInt {
        BigInt::zero()
    }

    fn one(&self) -> BigInt {
        BigInt::one()
    }

    fn value_of(&self, n: i64) -> BigInt {
        BigInt::from(n)
    }

    fn characteristic(&self) -> u32 {
        0
    }

    fn unit_inverse(&self, a: &BigInt) -> Option<BigInt> {
        if a.abs().is_one() {
            Some(a.clone())
        } else {
            None
        }
    }

    fn is_zero(&self, a: &BigInt) -> bool {
        a.is_zero()
    }

    fn name(&self) -> String {
        "Z".to_string()
    }
}
