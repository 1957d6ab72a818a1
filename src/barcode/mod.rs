//! Barcode Module: Persistence Intervals
//!
//! A barcode is the multiset of intervals `⟨birth, death⟩` produced by a
//! persistence computation, grouped by homological dimension. Right-infinite
//! intervals are the classes that survive to the end of the filtration;
//! their count per dimension is the Betti sequence of the final complex.

mod interval;
mod collection;
mod betti;

pub use interval::Interval;
pub use collection::{AnnotatedBarcodeCollection, BarcodeCollection};
pub use betti::BettiNumbers;
