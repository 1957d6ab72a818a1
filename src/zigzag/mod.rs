//! Zigzag Module: Incremental Homology Bases
//!
//! Tracks a basis of homology while elements are added to and removed from
//! a complex, and transports tracked classes between complexes related by
//! a bicomplex of pairs.

mod interval_tracker;
mod basis_tracker;
mod projection;
mod bootstrap;

pub use interval_tracker::{IntervalDescriptor, IntervalTracker};
pub use basis_tracker::{ClassDescriptor, HomologyBasisTracker, IncrementalPersistence};
pub use projection::project;
pub use bootstrap::ProjectionBootstrap;
