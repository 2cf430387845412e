//! Errors raised while building basis functions.

use thiserror::Error;

/// Errors that can occur when constructing or (de)serializing basis functions.
#[derive(Debug, Error)]
pub enum BasisError {
    #[error("{field} must have exactly {expected} components, got {found}")]
    InvalidArity {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("exponent must be finite and strictly positive, got {0}")]
    InvalidExponent(f64),

    #[error("exponent powers {0:?} are too large to normalize")]
    PowersOutOfRange([u32; 3]),

    #[error("contraction has no positive self-overlap (got {0})")]
    DegenerateContraction(f64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pickle error: {0}")]
    Pickle(#[from] serde_pickle::Error),
}
