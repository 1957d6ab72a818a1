//! # TDA-Persistence
//!
//! Persistent and Zigzag Homology over Pluggable Coefficients
//!
//! ## Theoretical Framework
//!
//! A filtered complex is a nested sequence K₀ ⊆ K₁ ⊆ … ⊆ K_n of cell
//! complexes. Its homology with coefficients in a ring R forms a persistence
//! module whose indecomposable summands are intervals ⟨birth, death⟩, the
//! barcode of the filtration.
//!
//! ### Methodology
//!
//! 1. **Algebra**: Coefficient rings and fields (Z/pZ, Z/2Z, Z, Q) behind a
//!    common `Ring` / `Field` interface
//!
//! 2. **Chains**: Sparse formal sums over ordered basis elements (simplices
//!    and simplex pairs) with boundary operators and chain maps
//!
//! 3. **Persistence**: The standard column reduction R = D·V of the filtered
//!    boundary matrix, absolute or relative to a subcomplex, with optional
//!    representative cycles
//!
//! 4. **Zigzag**: An incrementally maintained homology basis supporting both
//!    insertion and removal, and transport of classes between complexes
//!    related by a bicomplex
//!
//! ## Key Result
//!
//! For every finite filtration and field F:
//!
//!   β_k(K_i; F) = #{ intervals of dimension k containing i }
//!
//! The barcode determines every Betti number of every stage.
//!
//! ## References
//!
//! - Zomorodian & Carlsson, "Computing Persistent Homology" (2005)
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Carlsson & de Silva, "Zigzag Persistence" (2010)
//! - de Silva, Morozov & Vejdemo-Johansson, "Dualities in Persistent
//!   (Co)homology" (2011)

pub mod error;
pub mod algebra;
pub mod chain;
pub mod stream;
pub mod barcode;
pub mod persistence;
pub mod zigzag;

// Re-exports from error
pub use error::{AlgebraicError, HomologyError};

// Re-exports from algebra
pub use algebra::{
    // Interfaces
    Field,
    Ring,
    // Coefficient structures
    BigIntegerRing,
    BigRationalField,
    BooleanField,
    ModularIntField,
    RationalField,
    // Shared handles
    big_rational_field,
    boolean_field,
    integer_ring,
    modular_field,
    rational_field,
};

// Re-exports from chain
pub use chain::{
    BasisElement,
    FormalSum,
    FreeModule,
    MatrixConverter,
    ProductBasis,
    Simplex,
    SimplexPair,
};

// Re-exports from stream
pub use stream::{
    ExplicitConverter,
    ExplicitStream,
    FilteredStream,
    FiltrationConverter,
    IdentityConverter,
    LinearConverter,
};

// Re-exports from barcode
pub use barcode::{
    AnnotatedBarcodeCollection,
    BarcodeCollection,
    BettiNumbers,
    Interval,
};

// Re-exports from persistence
pub use persistence::{
    ChainPolicy,
    PersistenceAlgorithm,
    PersistenceConfig,
    PersistentHomology,
    cross_validate,
};

// Re-exports from zigzag
pub use zigzag::{
    HomologyBasisTracker,
    IncrementalPersistence,
    IntervalTracker,
    ProjectionBootstrap,
};
