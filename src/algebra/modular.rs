//! Prime fields Z/pZ.

use super::{Field, Ring};
use crate::error::AlgebraicError;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Integers modulo a prime `p`, elements stored as canonical residues in `0..p`.
///
/// Inverses are tabulated once at construction.
#[derive(Debug, Clone)]
pub struct ModularIntField {
    modulus: u32,
    inverses: Vec<u32>,
}

static FIELD_CACHE: Lazy<Mutex<HashMap<u32, Arc<ModularIntField>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Shared Z/pZ instance, built on first request for each `p`.
pub fn modular_field(modulus: u32) -> Result<Arc<ModularIntField>, AlgebraicError> {
    let mut cache = FIELD_CACHE.lock();
    if let Some(field) = cache.get(&modulus) {
        return Ok(Arc::clone(field));
    }
    let field = Arc::new(ModularIntField::new(modulus)?);
    cache.insert(modulus, Arc::clone(&field));
    Ok(field)
}

impl ModularIntField {
    /// Build Z/pZ, failing with `NotPrime` when some nonzero residue has no inverse.
    pub fn new(modulus: u32) -> Result<Self, AlgebraicError> {
        if modulus < 2 {
            return Err(AlgebraicError::NotPrime { modulus });
        }
        let mut inverses = vec![0u32; modulus as usize];
        for a in 1..modulus {
            match inverse_mod(a, modulus) {
                Some(b) => inverses[a as usize] = b,
                None => return Err(AlgebraicError::NotPrime { modulus }),
            }
        }
        Ok(Self { modulus, inverses })
    }

    pub fn modulus(&self) -> u32 {
        self.modulus
    }

    fn reduce(&self, value: u64) -> u32 {
        (value % u64::from(self.modulus)) as u32
    }
}

/// Extended Euclid; `None` when `gcd(a, m) != 1`.
fn inverse_mod(a: u32, m: u32) -> Option<u32> {
    let (mut r0, mut r1) = (i64::from(m), i64::from(a));
    let (mut t0, mut t1) = (0i64, 1i64);
    while r1 != 0 {
        let q = r0 / r1;
        (r0, r1) = (r1, r0 - q * r1);
        (t0, t1) = (t1, t0 - q * t1);
    }
    if r0 != 1 {
        return None;
    }
    Some(t0.rem_euclid(i64::from(m)) as u32)
}

impl Ring for ModularIntField {
    type Element = u32;

    fn add(&self, a: &u32, b: &u32) -> u32 {
        self.reduce(u64::from(*a) + u64::from(*b))
    }

    fn negate(&self, a: &u32) -> u32 {
        let a = *a % self.modulus;
        if a == 0 {
            0
        } else {
            self.modulus - a
        }
    }

    fn multiply(&self, a: &u32, b: &u32) -> u32 {
        self.reduce(u64::from(*a) * u64::from(*b))
    }

    fn zero(&self) -> u32 {
        0
    }

    fn one(&self) -> u32 {
        1 % self.modulus
    }

    fn value_of(&self, n: i64) -> u32 {
        n.rem_euclid(i64::from(self.modulus)) as u32
    }

    fn characteristic(&self) -> u32 {
        self.modulus
    }

    fn unit_inverse(&self, a: &u32) -> Option<u32> {
        let a = *a % self.modulus;
        if a == 0 {
            None
        } else {
            Some(self.inverses[a as usize])
        }
    }

    fn normalize(&self, a: &u32) -> u32 {
        *a % self.modulus
    }

    fn is_zero(&self, a: &u32) -> bool {
        *a % self.modulus == 0
    }

    fn is_one(&self, a: &u32) -> bool {
        *a % self.modulus == 1 % self.modulus
    }

    fn name(&self) -> String {
        format!("Z/{}Z", self.modulus)
    }
}

impl Field for ModularIntField {
    fn structure_name(&self) -> &'static str {
        "Z/pZ"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PRIMES: [u32; 25] = [
        2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    ];

    #[test]
    fn test_inverse_table_for_small_primes() {
        for &p in &PRIMES {
            let field = ModularIntField::new(p).unwrap();
            for a in 1..p {
                let inv = field.invert(&a).unwrap();
                assert_eq!(field.multiply(&a, &inv), 1, "p = {}, a = {}", p, a);
            }
        }
    }

    #[test]
    fn test_rejects_composite_and_degenerate_moduli() {
        for n in [0u32, 1, 4, 6, 9, 15, 91] {
            assert_eq!(ModularIntField::new(n).unwrap_err(), AlgebraicError::NotPrime { modulus: n });
        }
        assert!(modular_field(12).is_err());
    }

    #[test]
    fn test_cache_returns_shared_instance() {
        let a = modular_field(13).unwrap();
        let b = modular_field(13).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_value_of_normalizes_negatives() {
        let field = ModularIntField::new(5).unwrap();
        assert_eq!(field.value_of(-1), 4);
        assert_eq!(field.value_of(-10), 0);
        assert_eq!(field.value_of(7), 2);
    }

    #[test]
    fn test_unreduced_residues_are_recognized() {
        let field = ModularIntField::new(7).unwrap();
        assert!(field.is_one(&8));
        assert!(field.is_one(&1));
        assert!(!field.is_one(&9));
        assert!(field.is_zero(&14));
        assert_eq!(field.normalize(&15), 1);
        assert_eq!(field.normalize(&6), 6);
    }

    #[test]
    fn test_zero_is_not_invertible() {
        let field = ModularIntField::new(7).unwrap();
        assert!(!field.is_unit(&0));
        assert_eq!(
            field.divide(&3, &0).unwrap_err(),
            AlgebraicError::DivisionByZero { structure: "Z/pZ" }
        );
    }

    proptest! {
        #[test]
        fn prop_field_laws(a in 0u32..97, b in 0u32..97, c in 0u32..97) {
            let f = ModularIntField::new(97).unwrap();
            prop_assert_eq!(f.add(&a, &b), f.add(&b, &a));
            prop_assert_eq!(f.multiply(&a, &f.add(&b, &c)), f.add(&f.multiply(&a, &b), &f.multiply(&a, &c)));
            prop_assert_eq!(f.add(&a, &f.negate(&a)), 0);
            prop_assert_eq!(f.subtract(&a, &b), f.add(&a, &f.negate(&b)));
            if a != 0 {
                prop_assert_eq!(f.divide(&f.multiply(&a, &b), &a).unwrap(), b);
            }
        }
    }
}
