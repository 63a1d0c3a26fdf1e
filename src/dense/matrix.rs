//! Dense row-major 2-D matrix.

use crate::core::traits::{MatShape, MatVec};
use crate::dense::Vector;
use crate::error::MtxError;
use num_traits::Float;

/// Dense matrix with row-major flat storage.
///
/// Rows and columns are replaced wholesale through [`Matrix::set_row`] /
/// [`Matrix::set_col`]; the partial products exist for algorithms that operate
/// on a growing basis (e.g. incremental low-rank updates) without
/// materializing a truncated copy of the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

impl<T: Float> Matrix<T> {
    /// Zero-initialized `m × n` matrix.
    pub fn zeros(m: usize, n: usize) -> Self {
        Self {
            data: vec![T::zero(); m * n],
            nrows: m,
            ncols: n,
        }
    }

    /// `n × n` identity, the default basis fixture.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, T::one());
        }
        m
    }

    /// Builds from a nested sequence of reals (the dense loader shape).
    /// Ragged input is a `DimensionMismatch`.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, MtxError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            if row.len() != ncols {
                return Err(MtxError::DimensionMismatch {
                    expected: ncols,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, nrows, ncols })
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.nrows = 0;
        self.ncols = 0;
    }

    /// Resizes to `m × n`, keeping the overlapping top-left block and
    /// zero-filling anything new.
    pub fn resize(&mut self, m: usize, n: usize) {
        let mut data = vec![T::zero(); m * n];
        for i in 0..m.min(self.nrows) {
            for j in 0..n.min(self.ncols) {
                data[i * n + j] = self.data[i * self.ncols + j];
            }
        }
        self.data = data;
        self.nrows = m;
        self.ncols = n;
    }

    #[inline]
    fn check_bounds(&self, row_idx: usize, col_idx: usize) {
        assert!(
            row_idx < self.nrows && col_idx < self.ncols,
            "matrix index ({row_idx}, {col_idx}) out of range for {}x{}",
            self.nrows,
            self.ncols
        );
    }

    #[inline]
    pub fn get(&self, row_idx: usize, col_idx: usize) -> T {
        self.check_bounds(row_idx, col_idx);
        self.data[row_idx * self.ncols + col_idx]
    }

    #[inline]
    pub fn set(&mut self, row_idx: usize, col_idx: usize, val: T) {
        self.check_bounds(row_idx, col_idx);
        self.data[row_idx * self.ncols + col_idx] = val;
    }

    /// Raw read view of row `row_idx`, the accessor the free kernels use.
    #[inline]
    pub fn row_slice(&self, row_idx: usize) -> &[T] {
        assert!(
            row_idx < self.nrows,
            "row index {row_idx} out of range for {} rows",
            self.nrows
        );
        &self.data[row_idx * self.ncols..(row_idx + 1) * self.ncols]
    }

    /// Owned copy of row `row_idx`.
    pub fn row(&self, row_idx: usize) -> Vector<T> {
        Vector::from_vec(self.row_slice(row_idx).to_vec())
    }

    /// Owned copy of column `col_idx`.
    pub fn col(&self, col_idx: usize) -> Vector<T> {
        assert!(
            col_idx < self.ncols,
            "column index {col_idx} out of range for {} columns",
            self.ncols
        );
        let mut v = Vector::zeros(self.nrows);
        for i in 0..self.nrows {
            v.set(i, self.data[i * self.ncols + col_idx]);
        }
        v
    }

    /// Replaces row `row_idx` with `vec`. `vec.len()` must equal `ncols`.
    pub fn set_row(&mut self, row_idx: usize, vec: &Vector<T>) {
        assert!(row_idx < self.nrows, "row index {row_idx} out of range");
        assert_eq!(
            vec.len(),
            self.ncols,
            "set_row requires a vector of length ncols ({} vs {})",
            vec.len(),
            self.ncols
        );
        self.data[row_idx * self.ncols..(row_idx + 1) * self.ncols]
            .copy_from_slice(vec.as_slice());
    }

    /// Replaces column `col_idx` with `vec`. `vec.len()` must equal `nrows`.
    pub fn set_col(&mut self, col_idx: usize, vec: &Vector<T>) {
        assert!(col_idx < self.ncols, "column index {col_idx} out of range");
        assert_eq!(
            vec.len(),
            self.nrows,
            "set_col requires a vector of length nrows ({} vs {})",
            vec.len(),
            self.nrows
        );
        for i in 0..self.nrows {
            self.data[i * self.ncols + col_idx] = vec.get(i);
        }
    }

    /// Full dense matrix-vector product; `vec.len()` must equal `ncols`.
    pub fn mul(&self, vec: &Vector<T>) -> Vector<T> {
        assert_eq!(
            vec.len(),
            self.ncols,
            "mul requires a vector of length ncols ({} vs {})",
            vec.len(),
            self.ncols
        );
        self.mul_partial(vec, self.ncols)
    }

    /// Product using only the first `ncols_` columns.
    pub fn mul_partial(&self, vec: &Vector<T>, ncols_: usize) -> Vector<T> {
        assert!(
            ncols_ <= self.ncols,
            "partial width {ncols_} exceeds ncols {}",
            self.ncols
        );
        assert!(
            vec.len() >= ncols_,
            "mul_partial requires vec.len() >= {ncols_} (got {})",
            vec.len()
        );
        let x = vec.as_slice();
        let mut out = Vector::zeros(self.nrows);
        for i in 0..self.nrows {
            let row = &self.data[i * self.ncols..i * self.ncols + ncols_];
            let mut acc = T::zero();
            for (a, &xj) in row.iter().zip(x) {
                acc = acc + *a * xj;
            }
            out.set(i, acc);
        }
        out
    }

    /// Transpose product restricted to the first `nrows_` rows:
    /// `out[j] = Σ_{i < nrows_} self[i][j] · vec[i]`, result length `ncols`.
    pub fn mul_partial_t(&self, vec: &Vector<T>, nrows_: usize) -> Vector<T> {
        assert!(
            nrows_ <= self.nrows,
            "partial height {nrows_} exceeds nrows {}",
            self.nrows
        );
        assert!(
            vec.len() >= nrows_,
            "mul_partial_t requires vec.len() >= {nrows_} (got {})",
            vec.len()
        );
        let x = vec.as_slice();
        let mut out = Vector::zeros(self.ncols);
        for i in 0..nrows_ {
            let row = &self.data[i * self.ncols..(i + 1) * self.ncols];
            let xi = x[i];
            let o = out.as_mut_slice();
            for j in 0..self.ncols {
                o[j] = o[j] + row[j] * xi;
            }
        }
        out
    }

    /// New matrix with `out[j][i] = self[i][j]`.
    pub fn transpose(&self) -> Matrix<T> {
        let mut out = Matrix::zeros(self.ncols, self.nrows);
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                out.data[j * self.nrows + i] = self.data[i * self.ncols + j];
            }
        }
        out
    }

    /// Raw (non-centered) second moment of the columns:
    /// `out[j][k] = (Σ_i self[i][j] · self[i][k]) / nrows`.
    ///
    /// Mean-center the columns beforehand if a true covariance is needed; the
    /// divisor is `nrows` (N, not N−1).
    pub fn covariance(&self) -> Matrix<T> {
        let mut out = Matrix::zeros(self.ncols, self.ncols);
        for i in 0..self.nrows {
            let row = &self.data[i * self.ncols..(i + 1) * self.ncols];
            for j in 0..self.ncols {
                for k in 0..self.ncols {
                    out.data[j * self.ncols + k] =
                        out.data[j * self.ncols + k] + row[j] * row[k];
                }
            }
        }
        if self.nrows > 0 {
            let inv_n = T::one() / T::from(self.nrows).unwrap_or_else(T::one);
            for v in &mut out.data {
                *v = *v * inv_n;
            }
        }
        out
    }

    /// In-place elementwise sum. Shapes must match.
    pub fn add_assign(&mut self, other: &Matrix<T>) {
        assert_eq!(
            (self.nrows, self.ncols),
            (other.nrows, other.ncols),
            "add requires matching shapes"
        );
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a = *a + b;
        }
    }

    /// In-place elementwise difference. Shapes must match.
    pub fn sub_assign(&mut self, other: &Matrix<T>) {
        assert_eq!(
            (self.nrows, self.ncols),
            (other.nrows, other.ncols),
            "sub requires matching shapes"
        );
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a = *a - b;
        }
    }

    /// In-place scalar multiple.
    pub fn scale_assign(&mut self, s: T) {
        for a in &mut self.data {
            *a = *a * s;
        }
    }

    /// Multiplies each row `i` by `coef.get(i)`; `coef.len()` must equal `nrows`.
    pub fn row_scale_assign(&mut self, coef: &Vector<T>) {
        assert_eq!(
            coef.len(),
            self.nrows,
            "row_scale requires a coefficient per row ({} vs {})",
            coef.len(),
            self.nrows
        );
        for i in 0..self.nrows {
            let c = coef.get(i);
            for v in &mut self.data[i * self.ncols..(i + 1) * self.ncols] {
                *v = *v * c;
            }
        }
    }

    /// Divides each row `i` by `coef.get(i)`. A zero coefficient is a singular
    /// operation and leaves the matrix unchanged.
    pub fn row_div_assign(&mut self, coef: &Vector<T>) -> Result<(), MtxError> {
        assert_eq!(
            coef.len(),
            self.nrows,
            "row_div requires a coefficient per row ({} vs {})",
            coef.len(),
            self.nrows
        );
        if coef.as_slice().iter().any(|&c| c == T::zero()) {
            return Err(MtxError::SingularOperation("row_div"));
        }
        for i in 0..self.nrows {
            let inv = coef.get(i).recip();
            for v in &mut self.data[i * self.ncols..(i + 1) * self.ncols] {
                *v = *v * inv;
            }
        }
        Ok(())
    }
}

impl<T: Float + Send + Sync> MatVec<Vector<T>> for Matrix<T> {
    fn matvec(&self, x: &Vector<T>, y: &mut Vector<T>) {
        crate::kernels::mat_vec_mul(y, self, x);
    }
}

impl<T> MatShape for Matrix<T> {
    fn nrows(&self) -> usize {
        self.nrows
    }
    fn ncols(&self) -> usize {
        self.ncols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_concrete() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let t = m.transpose();
        assert_eq!(t, Matrix::from_rows(&[vec![1.0, 3.0], vec![2.0, 4.0]]).unwrap());
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, MtxError::DimensionMismatch { expected: 2, got: 1 });
    }

    #[test]
    fn resize_keeps_top_left_block() {
        let mut m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        m.resize(3, 3);
        assert_eq!(m.get(1, 1), 4.0);
        assert_eq!(m.get(2, 2), 0.0);
        m.resize(1, 1);
        assert_eq!(m.get(0, 0), 1.0);
    }

    #[test]
    fn partial_products_use_leading_block() {
        // [[1,2,3],[4,5,6]]
        let m = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let x = Vector::from_vec(vec![1.0, 1.0, 1.0]);
        assert_eq!(m.mul_partial(&x, 2).as_slice(), &[3.0, 9.0]);
        // first row only: out[j] = m[0][j]
        assert_eq!(m.mul_partial_t(&x, 1).as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn covariance_divides_by_row_count() {
        // columns [1,3] and [2,4]
        let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let c = m.covariance();
        assert_eq!(c.get(0, 0), (1.0 + 9.0) / 2.0);
        assert_eq!(c.get(0, 1), (2.0 + 12.0) / 2.0);
        assert_eq!(c.get(1, 1), (4.0 + 16.0) / 2.0);
    }

    #[test]
    fn row_div_zero_coef_is_singular() {
        let mut m = Matrix::identity(2);
        let coef = Vector::from_vec(vec![2.0, 0.0]);
        assert!(m.row_div_assign(&coef).is_err());
        assert_eq!(m, Matrix::identity(2));
    }
}
