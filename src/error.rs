//! Error types shared by every module of the crate.
//!
//! Algebraic failures (division by zero, a non-prime modulus) are kept in
//! their own enum because the coefficient layer has no notion of streams or
//! complexes; they convert into [`HomologyError`] through `?`.

use thiserror::Error;

/// Failures raised by coefficient structures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraicError {
    #[error("division by zero in {structure}")]
    DivisionByZero { structure: &'static str },
    #[error("{modulus} is not a prime")]
    NotPrime { modulus: u32 },
}

/// Failures raised while building streams or computing homology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HomologyError {
    #[error(transparent)]
    Algebraic(#[from] AlgebraicError),
    #[error("stream has not been finalized")]
    StreamNotFinalized,
    #[error("stream is already finalized")]
    StreamAlreadyFinalized,
    #[error("inconsistent dimension window: min {min} > max {max}")]
    InconsistentDimensionWindow { min: usize, max: usize },
    #[error("malformed boundary: face {face} of {element} is missing or ordered after it")]
    MalformedBoundary { element: String, face: String },
    #[error("element {0} is not present")]
    UnknownElement(String),
    #[error("element {0} is already present")]
    DuplicateElement(String),
    #[error("cannot remove {element}: coface {coface} is still present")]
    HasCofaces { element: String, coface: String },
    #[error("chain is not a cycle of the current complex")]
    NotACycle,
    #[error("interval cannot end at {end} before it starts at {start}")]
    IntervalEndsBeforeStart { start: String, end: String },
    #[error("mismatched inputs: {0}")]
    MismatchedInputs(String),
}

pub type Result<T> = std::result::Result<T, HomologyError>;

pub(crate) fn malformed(element: &impl std::fmt::Display, face: &impl std::fmt::Display) -> HomologyError {
    HomologyError::MalformedBoundary {
        element: element.to_string(),
        face: face.to_string(),
    }
}
