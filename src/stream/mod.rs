//! Stream Module: Filtered Complexes
//!
//! A [`FilteredStream`] delivers basis elements in filtration order
//! together with their integer filtration indices. Complex construction
//! from geometric data lives outside this crate; [`ExplicitStream`] takes
//! elements as listed by the caller and [`catalog`] holds small fixtures.

mod filtered;
mod converter;
pub mod catalog;

pub use filtered::{ExplicitStream, FilteredStream};
pub use converter::{ExplicitConverter, FiltrationConverter, IdentityConverter, LinearConverter};
