//! Free modules over a coefficient ring.

use super::{BasisElement, FormalSum};
use crate::algebra::Ring;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// The free `R`-module on basis `B`.
///
/// Holds only a handle to the ring; every arithmetic operation on
/// [`FormalSum`] values is a method here so that zero coefficients are
/// pruned in one place.
pub struct FreeModule<R: Ring, B> {
    ring: Arc<R>,
    _basis: PhantomData<fn() -> B>,
}

impl<R: Ring, B> Clone for FreeModule<R, B> {
    fn clone(&self) -> Self {
        Self {
            ring: Arc::clone(&self.ring),
            _basis: PhantomData,
        }
    }
}

impl<R: Ring, B> fmt::Debug for FreeModule<R, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreeModule").field("ring", &self.ring).finish()
    }
}

impl<R: Ring, B: Ord + Clone> FreeModule<R, B> {
    pub fn new(ring: Arc<R>) -> Self {
        Self {
            ring,
            _basis: PhantomData,
        }
    }

    pub fn ring(&self) -> &Arc<R> {
        &self.ring
    }

    pub fn zero(&self) -> FormalSum<R::Element, B> {
        FormalSum::new()
    }

    /// `1 · basis`
    pub fn singleton(&self, basis: B) -> FormalSum<R::Element, B> {
        self.term(self.ring.one(), basis)
    }

    /// `coefficient · basis`, empty when the coefficient is zero.
    pub fn term(&self, coefficient: R::Element, basis: B) -> FormalSum<R::Element, B> {
        let mut sum = FormalSum::new();
        self.accumulate(&mut sum, basis, coefficient);
        sum
    }

    pub fn from_terms(&self, terms: impl IntoIterator<Item = (B, R::Element)>) -> FormalSum<R::Element, B> {
        let mut sum = FormalSum::new();
        for (basis, coefficient) in terms {
            self.accumulate(&mut sum, basis, coefficient);
        }
        sum
    }

    /// Sum built from integer coefficients through `Ring::value_of`.
    pub fn from_int_terms(&self, terms: impl IntoIterator<Item = (B, i64)>) -> FormalSum<R::Element, B> {
        self.from_terms(terms.into_iter().map(|(b, n)| (b, self.ring.value_of(n))))
    }

    /// Linear combination `Σ s_i · b_i` given as (scalar, basis) pairs.
    pub fn combine(&self, terms: impl IntoIterator<Item = (R::Element, B)>) -> FormalSum<R::Element, B> {
        self.from_terms(terms.into_iter().map(|(k, b)| (b, k)))
    }

    /// `sum += coefficient · basis`, removing the term if it cancels.
    pub fn accumulate(&self, sum: &mut FormalSum<R::Element, B>, basis: B, coefficient: R::Element) {
        if self.ring.is_zero(&coefficient) {
            return;
        }
        let cancelled = match sum.get_mut(&basis) {
            Some(existing) => {
                *existing = self.ring.add(existing, &coefficient);
                self.ring.is_zero(existing)
            }
            None => {
                sum.insert_raw(basis, self.ring.normalize(&coefficient));
                return;
            }
        };
        if cancelled {
            sum.remove(&basis);
        }
    }

    /// `sum += other`
    pub fn accumulate_sum(&self, sum: &mut FormalSum<R::Element, B>, other: &FormalSum<R::Element, B>) {
        for (basis, coefficient) in other {
            self.accumulate(sum, basis.clone(), coefficient.clone());
        }
    }

    /// `sum += scalar · other`
    pub fn accumulate_scaled(
        &self,
        sum: &mut FormalSum<R::Element, B>,
        other: &FormalSum<R::Element, B>,
        scalar: &R::Element,
    ) {
        if self.ring.is_zero(scalar) {
            return;
        }
        for (basis, coefficient) in other {
            self.accumulate(sum, basis.clone(), self.ring.multiply(scalar, coefficient));
        }
    }

    pub fn add(&self, a: &FormalSum<R::Element, B>, b: &FormalSum<R::Element, B>) -> FormalSum<R::Element, B> {
        let mut sum = a.clone();
        self.accumulate_sum(&mut sum, b);
        sum
    }

    pub fn subtract(&self, a: &FormalSum<R::Element, B>, b: &FormalSum<R::Element, B>) -> FormalSum<R::Element, B> {
        let mut sum = a.clone();
        self.accumulate_scaled(&mut sum, b, &self.ring.value_of(-1));
        sum
    }

    pub fn negate(&self, a: &FormalSum<R::Element, B>) -> FormalSum<R::Element, B> {
        self.scale(a, &self.ring.value_of(-1))
    }

    pub fn scale(&self, a: &FormalSum<R::Element, B>, scalar: &R::Element) -> FormalSum<R::Element, B> {
        let mut sum = FormalSum::new();
        self.accumulate_scaled(&mut sum, a, scalar);
        sum
    }

    /// `Σ_b a_b · b_b` over the common support.
    pub fn inner_product(&self, a: &FormalSum<R::Element, B>, b: &FormalSum<R::Element, B>) -> R::Element {
        let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
        small.iter().fold(self.ring.zero(), |acc, (basis, x)| match large.coefficient(basis) {
            Some(y) => self.ring.add(&acc, &self.ring.multiply(x, y)),
            None => acc,
        })
    }

    /// Linear extension of a partial, signed map on basis elements.
    ///
    /// Elements mapped to `None` contribute zero; an image `(c, s)` receives
    /// the coefficient multiplied by `s`.
    pub fn map_basis<C: Ord + Clone>(
        &self,
        sum: &FormalSum<R::Element, B>,
        target: &FreeModule<R, C>,
        mut f: impl FnMut(&B) -> Option<(C, i64)>,
    ) -> FormalSum<R::Element, C> {
        let mut image = FormalSum::new();
        for (basis, coefficient) in sum {
            if let Some((mapped, sign)) = f(basis) {
                let scaled = self.ring.multiply(coefficient, &self.ring.value_of(sign));
                target.accumulate(&mut image, mapped, scaled);
            }
        }
        image
    }

    /// Terms whose basis element satisfies `keep`.
    pub fn filter(&self, sum: &FormalSum<R::Element, B>, mut keep: impl FnMut(&B) -> bool) -> FormalSum<R::Element, B> {
        let mut filtered = sum.clone();
        filtered.retain(|b, _| keep(b));
        filtered
    }
}

impl<R: Ring, B: BasisElement> FreeModule<R, B> {
    /// Boundary of a single basis element.
    pub fn boundary(&self, element: &B) -> FormalSum<R::Element, B> {
        self.from_int_terms(element.boundary())
    }

    /// Boundary of a chain, extended linearly.
    pub fn boundary_of(&self, chain: &FormalSum<R::Element, B>) -> FormalSum<R::Element, B> {
        let mut result = FormalSum::new();
        for (element, coefficient) in chain {
            for (face, incidence) in element.boundary() {
                let scaled = self.ring.multiply(coefficient, &self.ring.value_of(incidence));
                self.accumulate(&mut result, face, scaled);
            }
        }
        result
    }
}
