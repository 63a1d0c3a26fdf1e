//! Core module: linear-algebra trait seams.

pub mod traits;

pub use traits::{InnerProduct, MatShape, MatVec};
