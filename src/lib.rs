//! mtxvec: dense and sparse linear-algebra primitives
//!
//! This crate provides the `Vector`, `Matrix`, and `CsrMatrix` containers together
//! with the arithmetic, reduction, and transformation operations needed by iterative
//! numeric algorithms (power iteration, covariance computation, normalization).
//! Free destination-writing kernels expose the data-parallel structure of the hot
//! operations so that sequential and shared-memory-parallel backends share one call
//! signature; the `rayon` feature (default) enables the parallel paths.

pub mod core;
pub mod dense;
pub mod error;
pub mod kernels;
pub mod sparse;

// Re-exports for convenience
pub use crate::core::traits::{InnerProduct, MatShape, MatVec};
pub use dense::{Matrix, Vector};
pub use error::MtxError;
pub use sparse::CsrMatrix;
