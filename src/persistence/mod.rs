//! Persistence Module: Barcodes of Filtered Complexes
//!
//! `PersistentHomology` reduces the filtered boundary matrix of a stream
//! over a chosen coefficient ring and reads off the barcode. Absolute and
//! relative homology share the same reduction; a [`ChainPolicy`] decides
//! which elements participate.

mod config;
mod echelon;
mod engine;
pub mod validation;

pub use config::{ChainPolicy, PersistenceConfig};
pub use engine::{AnnotatedBarcodes, PersistenceAlgorithm, PersistentHomology};
pub use validation::{cross_validate, CrossValidation};

pub(crate) use echelon::{Echelon, Insertion};
