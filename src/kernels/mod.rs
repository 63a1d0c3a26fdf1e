//! Destination-accumulation compute kernels.
//!
//! Each kernel writes its result into a caller-supplied, already-sized
//! destination instead of allocating, so hot loops reuse their buffers and
//! sequential, shared-memory-parallel, and device backends can share one call
//! signature. Destinations are overwritten, not accumulated into.
//!
//! With the `rayon` feature (default), the kernels whose output slots are
//! independent — the row loops of [`mat_vec_mul`], [`sp_mat_vec_mul`],
//! [`mat_mul_row_coef`] and the reductions [`vec_dot`], [`vec_norm2`] — run in
//! parallel. Parallel reductions combine partial sums in an unspecified
//! order; across backends only tolerance-level agreement is promised.

use crate::dense::{Matrix, Vector};
use crate::sparse::CsrMatrix;
use num_traits::Float;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// dst ← a · b.
pub fn vec_dot<T: Float + Send + Sync>(dst: &mut T, a: &Vector<T>, b: &Vector<T>) {
    assert_eq!(
        a.len(),
        b.len(),
        "vec_dot requires equal lengths ({} vs {})",
        a.len(),
        b.len()
    );
    #[cfg(feature = "rayon")]
    {
        *dst = a
            .as_slice()
            .par_iter()
            .zip(b.as_slice().par_iter())
            .map(|(&ai, &bi)| ai * bi)
            .reduce(T::zero, |acc, v| acc + v);
    }
    #[cfg(not(feature = "rayon"))]
    {
        *dst = a.dot(b);
    }
}

/// dst ← ‖v‖₂.
pub fn vec_norm2<T: Float + Send + Sync>(dst: &mut T, v: &Vector<T>) {
    #[cfg(feature = "rayon")]
    {
        *dst = v
            .as_slice()
            .par_iter()
            .map(|&x| x * x)
            .reduce(T::zero, |acc, v| acc + v)
            .sqrt();
    }
    #[cfg(not(feature = "rayon"))]
    {
        *dst = v.norm2();
    }
}

/// dst ← a + b, elementwise.
pub fn vec_add<T: Float>(dst: &mut Vector<T>, a: &Vector<T>, b: &Vector<T>) {
    assert_eq!(a.len(), b.len(), "vec_add requires equal input lengths");
    assert_eq!(dst.len(), a.len(), "vec_add destination has wrong length");
    for ((d, &ai), &bi) in dst
        .as_mut_slice()
        .iter_mut()
        .zip(a.as_slice())
        .zip(b.as_slice())
    {
        *d = ai + bi;
    }
}

/// dst ← a − b, elementwise.
pub fn vec_sub<T: Float>(dst: &mut Vector<T>, a: &Vector<T>, b: &Vector<T>) {
    assert_eq!(a.len(), b.len(), "vec_sub requires equal input lengths");
    assert_eq!(dst.len(), a.len(), "vec_sub destination has wrong length");
    for ((d, &ai), &bi) in dst
        .as_mut_slice()
        .iter_mut()
        .zip(a.as_slice())
        .zip(b.as_slice())
    {
        *d = ai - bi;
    }
}

/// dst ← src · scalar.
pub fn vec_scalar_mul<T: Float>(dst: &mut Vector<T>, src: &Vector<T>, scalar: T) {
    assert_eq!(
        dst.len(),
        src.len(),
        "vec_scalar_mul destination has wrong length"
    );
    for (d, &s) in dst.as_mut_slice().iter_mut().zip(src.as_slice()) {
        *d = s * scalar;
    }
}

/// dst ← mat · x. Each output row is an independent reduction, parallelized
/// over rows under the `rayon` feature.
pub fn mat_vec_mul<T: Float + Send + Sync>(dst: &mut Vector<T>, mat: &Matrix<T>, x: &Vector<T>) {
    assert_eq!(
        x.len(),
        mat.ncols(),
        "mat_vec_mul requires x.len() == ncols ({} vs {})",
        x.len(),
        mat.ncols()
    );
    assert_eq!(
        dst.len(),
        mat.nrows(),
        "mat_vec_mul destination has wrong length"
    );
    let xs = x.as_slice();
    let row_product = |i: usize| {
        mat.row_slice(i)
            .iter()
            .zip(xs)
            .map(|(&a, &xj)| a * xj)
            .fold(T::zero(), |acc, v| acc + v)
    };
    #[cfg(feature = "rayon")]
    {
        dst.as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, di)| *di = row_product(i));
    }
    #[cfg(not(feature = "rayon"))]
    {
        for (i, di) in dst.as_mut_slice().iter_mut().enumerate() {
            *di = row_product(i);
        }
    }
}

/// dst ← matᵀ (restricted to the first `nrows_` rows) · x, so
/// `dst[j] = Σ_{i < nrows_} mat[i][j] · x[i]`. Destination length is `ncols`.
pub fn mat_vec_mul_partial_t<T: Float + Send + Sync>(
    dst: &mut Vector<T>,
    mat: &Matrix<T>,
    x: &Vector<T>,
    nrows_: usize,
) {
    assert!(
        nrows_ <= mat.nrows(),
        "partial height {nrows_} exceeds nrows {}",
        mat.nrows()
    );
    assert!(
        x.len() >= nrows_,
        "mat_vec_mul_partial_t requires x.len() >= {nrows_} (got {})",
        x.len()
    );
    assert_eq!(
        dst.len(),
        mat.ncols(),
        "mat_vec_mul_partial_t destination has wrong length"
    );
    let xs = x.as_slice();
    let col_product = |j: usize| {
        (0..nrows_)
            .map(|i| mat.row_slice(i)[j] * xs[i])
            .fold(T::zero(), |acc, v| acc + v)
    };
    #[cfg(feature = "rayon")]
    {
        dst.as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .for_each(|(j, dj)| *dj = col_product(j));
    }
    #[cfg(not(feature = "rayon"))]
    {
        for (j, dj) in dst.as_mut_slice().iter_mut().enumerate() {
            *dj = col_product(j);
        }
    }
}

/// dst ← mat · x for a CSR matrix, iterating stored nonzeros only (O(nnz)).
pub fn sp_mat_vec_mul<T: Float + Send + Sync>(
    dst: &mut Vector<T>,
    mat: &CsrMatrix<T>,
    x: &Vector<T>,
) {
    assert!(
        x.len() >= mat.ncols(),
        "sp_mat_vec_mul requires x.len() >= ncols ({} vs {})",
        x.len(),
        mat.ncols()
    );
    assert_eq!(
        dst.len(),
        mat.nrows(),
        "sp_mat_vec_mul destination has wrong length"
    );
    let xs = x.as_slice();
    let (vals, cols, ptr) = (mat.values(), mat.col_indices(), mat.row_ptr());
    let row_product = |r: usize| {
        (ptr[r]..ptr[r + 1])
            .map(|k| vals[k] * xs[cols[k]])
            .fold(T::zero(), |acc, v| acc + v)
    };
    #[cfg(feature = "rayon")]
    {
        dst.as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .for_each(|(r, dr)| *dr = row_product(r));
    }
    #[cfg(not(feature = "rayon"))]
    {
        for (r, dr) in dst.as_mut_slice().iter_mut().enumerate() {
            *dr = row_product(r);
        }
    }
}

/// dst ← row `row` of the product a · b, so `dst[j] = Σ_k a[row][k] · b[k][j]`.
///
/// The per-row building block of a full matrix-matrix product; rows are
/// independent, so callers parallelize across them.
pub fn mat_mul_row_coef<T: Float + Send + Sync>(
    dst: &mut Vector<T>,
    a: &Matrix<T>,
    b: &Matrix<T>,
    row: usize,
) {
    assert!(row < a.nrows(), "row {row} out of range for {} rows", a.nrows());
    assert_eq!(
        a.ncols(),
        b.nrows(),
        "mat_mul_row_coef requires a.ncols() == b.nrows() ({} vs {})",
        a.ncols(),
        b.nrows()
    );
    assert_eq!(
        dst.len(),
        b.ncols(),
        "mat_mul_row_coef destination has wrong length"
    );
    let a_row = a.row_slice(row);
    let col_product = |j: usize| {
        a_row
            .iter()
            .enumerate()
            .map(|(k, &aik)| aik * b.row_slice(k)[j])
            .fold(T::zero(), |acc, v| acc + v)
    };
    #[cfg(feature = "rayon")]
    {
        dst.as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .for_each(|(j, dj)| *dj = col_product(j));
    }
    #[cfg(not(feature = "rayon"))]
    {
        for (j, dj) in dst.as_mut_slice().iter_mut().enumerate() {
            *dj = col_product(j);
        }
    }
}

/// Copies row `from` of `src` into row `to` of `dst`. Column counts must match.
pub fn copy_row<T: Float>(dst: &mut Matrix<T>, src: &Matrix<T>, to: usize, from: usize) {
    assert_eq!(
        dst.ncols(),
        src.ncols(),
        "copy_row requires matching column counts ({} vs {})",
        dst.ncols(),
        src.ncols()
    );
    dst.set_row(to, &src.row(from));
}

/// Copies column `from` of `src` into column `to` of `dst`. Row counts must match.
pub fn copy_col<T: Float>(dst: &mut Matrix<T>, src: &Matrix<T>, to: usize, from: usize) {
    assert_eq!(
        dst.nrows(),
        src.nrows(),
        "copy_col requires matching row counts ({} vs {})",
        dst.nrows(),
        src.nrows()
    );
    dst.set_col(to, &src.col(from));
}
