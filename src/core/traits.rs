//! Core linear-algebra traits for mtxvec.
//!
//! These are the seams that let algorithm code stay generic over the operand
//! representation: a dense `Matrix` and a sparse `CsrMatrix` both implement
//! `MatVec`, so a power-iteration loop written against the trait runs on
//! either without changing its call sites.

/// Matrix–vector product: y ← A x.
pub trait MatVec<V> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}

/// Inner products & norms.
pub trait InnerProduct<V> {
    /// Associated scalar type.
    type Scalar: Copy + PartialOrd;
    /// Compute dot(x, y).
    fn dot(&self, x: &V, y: &V) -> Self::Scalar;
    /// Compute ‖x‖₂.
    fn norm(&self, x: &V) -> Self::Scalar;
}

/// Shape of a 2-D operand.
pub trait MatShape {
    /// Number of rows.
    fn nrows(&self) -> usize;
    /// Number of columns.
    fn ncols(&self) -> usize;
}
