//! Sparse containers: compressed-row matrix storage.

pub mod csr;

pub use csr::CsrMatrix;
