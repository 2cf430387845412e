//! Primitive and contracted Gaussian-type basis functions.
//!
//! The normalization follows H. Taketa, S. Huzinaga and K. O-ohata,
//! J. Phys. Soc. Japan 21, 2313 (1966).

pub mod basis;
pub mod cgbf;
pub mod error;
pub mod helper;
pub mod pgbf;


pub use basis::Basis;
pub use cgbf::ContractedGaussian;
pub use error::BasisError;
pub use pgbf::{PrimitiveGaussian, PrimitiveParams};
