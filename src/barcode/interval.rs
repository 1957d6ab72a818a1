//! Persistence intervals with explicit endpoint closure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interval `⟨start, end⟩` of a persistence barcode. `end == None` means
/// the interval extends to +∞ (and is then right-open).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval<I> {
    start: I,
    end: Option<I>,
    left_closed: bool,
    right_closed: bool,
}

impl<I> Interval<I> {
    pub fn new(start: I, end: Option<I>, left_closed: bool, right_closed: bool) -> Self {
        let right_closed = right_closed && end.is_some();
        Self {
            start,
            end,
            left_closed,
            right_closed,
        }
    }

    /// `[start, end)`
    pub fn half_open(start: I, end: I) -> Self {
        Self::new(start, Some(end), true, false)
    }

    /// `[start, end]`
    pub fn closed(start: I, end: I) -> Self {
        Self::new(start, Some(end), true, true)
    }

    /// `[start, ∞)`
    pub fn right_infinite(start: I) -> Self {
        Self::new(start, None, true, false)
    }

    pub fn start(&self) -> &I {
        &self.start
    }

    pub fn end(&self) -> Option<&I> {
        self.end.as_ref()
    }

    pub fn is_infinite(&self) -> bool {
        self.end.is_none()
    }

    pub fn is_left_closed(&self) -> bool {
        self.left_closed
    }

    pub fn is_right_closed(&self) -> bool {
        self.right_closed
    }

    /// Same interval with endpoints relabelled by `f`.
    pub fn map<J>(&self, mut f: impl FnMut(&I) -> J) -> Interval<J> {
        Interval {
            start: f(&self.start),
            end: self.end.as_ref().map(f),
            left_closed: self.left_closed,
            right_closed: self.right_closed,
        }
    }
}

impl<I: PartialOrd> Interval<I> {
    pub fn contains(&self, point: &I) -> bool {
        let after_start = if self.left_closed {
            *point >= self.start
        } else {
            *point > self.start
        };
        let before_end = match &self.end {
            None => true,
            Some(end) if self.right_closed => point <= end,
            Some(end) => point < end,
        };
        after_start && before_end
    }

    /// True when no point lies in the interval.
    pub fn is_empty(&self) -> bool {
        match &self.end {
            None => false,
            Some(end) if *end == self.start => !(self.left_closed && self.right_closed),
            Some(end) => *end < self.start,
        }
    }
}

impl Interval<f64> {
    /// `end - start`, infinite for right-infinite intervals.
    pub fn persistence(&self) -> f64 {
        match self.end {
            Some(end) => end - self.start,
            None => f64::INFINITY,
        }
    }
}

impl<I: fmt::Display> fmt::Display for Interval<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.left_closed { '[' } else { '(' };
        match &self.end {
            Some(end) => {
                let close = if self.right_closed { ']' } else { ')' };
                write!(f, "{}{}, {}{}", open, self.start, end, close)
            }
            None => write!(f, "{}{}, infinity)", open, self.start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_rules() {
        let half_open = Interval::half_open(1, 3);
        assert!(half_open.contains(&1));
        assert!(!half_open.contains(&3));
        assert!(Interval::closed(1, 3).contains(&3));
        assert!(Interval::right_infinite(2).contains(&1_000_000));
        assert!(!Interval::new(1, Some(3), false, false).contains(&1));
    }

    #[test]
    fn test_emptiness() {
        assert!(Interval::half_open(2, 2).is_empty());
        assert!(!Interval::closed(2, 2).is_empty());
        assert!(Interval::half_open(3, 2).is_empty());
        assert!(!Interval::right_infinite(5).is_empty());
    }

    #[test]
    fn test_infinite_interval_is_never_right_closed() {
        let interval = Interval::new(0, None, true, true);
        assert!(!interval.is_right_closed());
        assert_eq!(interval.to_string(), "[0, infinity)");
    }

    #[test]
    fn test_map_and_persistence() {
        let interval = Interval::half_open(2usize, 5).map(|&i| i as f64 * 0.5);
        assert!((interval.persistence() - 1.5).abs() < 1e-12);
        assert_eq!(interval.to_string(), "[1, 2.5)");
        assert!(Interval::right_infinite(0.0).persistence().is_infinite());
    }
}
