//! The two-element field with `bool` elements.

use super::{Field, Ring};

/// Z/2Z with XOR as addition and AND as multiplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanField;

impl Ring for BooleanField {
    type Element = bool;

    fn add(&self, a: &bool, b: &bool) -> bool {
        a ^ b
    }

    fn negate(&self, a: &bool) -> bool {
        *a
    }

    fn multiply(&self, a: &bool, b: &bool) -> bool {
        *a && *b
    }

    fn zero(&self) -> bool {
        false
    }

    fn one(&self) -> bool {
        true
    }

    fn value_of(&self, n: i64) -> bool {
        n.rem_euclid(2) == 1
    }

    fn characteristic(&self) -> u32 {
        2
    }

    fn unit_inverse(&self, a: &bool) -> Option<bool> {
        a.then_some(true)
    }

    fn name(&self) -> String {
        "Z/2Z (boolean)".to_string()
    }
}

impl Field for BooleanField {
    fn structure_name(&self) -> &'static str {
        "Z/2Z"
    }
}
