//! Dense containers: 1-D `Vector` and row-major 2-D `Matrix`.

pub mod matrix;
pub mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
