//! Compressed sparse row (CSR) matrix.
//!
//! Storage scheme: `data` holds the nonzero values, `indices` the column index
//! of each nonzero, and `indptr` (length `nrows + 1`) the slice boundaries, so
//! row `r`'s entries live at `indptr[r]..indptr[r + 1]`. Column indices are
//! kept sorted and unique within each row, which makes position lookup a
//! binary search over the row slice.
//!
//! The sparsity pattern is fixed at construction: [`CsrMatrix::set`] can only
//! overwrite an existing nonzero slot. Growing the pattern means rebuilding
//! from a fresh triplet set.

use crate::core::traits::{MatShape, MatVec};
use crate::dense::{Matrix, Vector};
use crate::error::MtxError;
use num_traits::Float;

#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix<T> {
    data: Vec<T>,
    indices: Vec<usize>,
    indptr: Vec<usize>,
    nrows: usize,
    ncols: usize,
}

impl<T: Float> CsrMatrix<T> {
    /// Builds from (value, row, col) triplets, the sparse loader shape.
    ///
    /// Triplets sharing a (row, col) position are summed. A triplet outside
    /// `nrows × ncols` is a construction error.
    pub fn from_triplets(
        triplets: &[(T, usize, usize)],
        nrows: usize,
        ncols: usize,
    ) -> Result<Self, MtxError> {
        for &(_, row, col) in triplets {
            if row >= nrows || col >= ncols {
                return Err(MtxError::IndexOutOfRange {
                    row,
                    col,
                    nrows,
                    ncols,
                });
            }
        }

        // Bucket per row, then sort each bucket by column.
        let mut counts = vec![0usize; nrows];
        for &(_, row, _) in triplets {
            counts[row] += 1;
        }
        let mut cursor = vec![0usize; nrows];
        let mut start = 0;
        for (r, &c) in counts.iter().enumerate() {
            cursor[r] = start;
            start += c;
        }
        let mut cols = vec![0usize; triplets.len()];
        let mut vals = vec![T::zero(); triplets.len()];
        for &(val, row, col) in triplets {
            let pos = cursor[row];
            cols[pos] = col;
            vals[pos] = val;
            cursor[row] += 1;
        }

        let mut data = Vec::with_capacity(triplets.len());
        let mut indices = Vec::with_capacity(triplets.len());
        let mut indptr = Vec::with_capacity(nrows + 1);
        indptr.push(0);
        let mut row_start = 0;
        for &count in &counts {
            let row_cols = &mut cols[row_start..row_start + count];
            let row_vals = &mut vals[row_start..row_start + count];
            // Insertion sort keeps the paired arrays aligned; rows are short.
            for j in 1..count {
                let mut k = j;
                while k > 0 && row_cols[k - 1] > row_cols[k] {
                    row_cols.swap(k - 1, k);
                    row_vals.swap(k - 1, k);
                    k -= 1;
                }
            }
            // Accumulate duplicates while emitting.
            for k in 0..count {
                if k > 0 && row_cols[k] == row_cols[k - 1] {
                    let last = data.len() - 1;
                    data[last] = data[last] + row_vals[k];
                } else {
                    indices.push(row_cols[k]);
                    data.push(row_vals[k]);
                }
            }
            indptr.push(data.len());
            row_start += count;
        }

        Ok(Self {
            data,
            indices,
            indptr,
            nrows,
            ncols,
        })
    }

    /// Sparsifies a dense matrix, keeping entries whose magnitude exceeds
    /// `T::epsilon()`. Lossy for nonzero source entries below that threshold.
    pub fn from_dense(dense: &Matrix<T>) -> Self {
        let nrows = dense.nrows();
        let ncols = dense.ncols();
        let mut data = Vec::new();
        let mut indices = Vec::new();
        let mut indptr = Vec::with_capacity(nrows + 1);
        indptr.push(0);
        for i in 0..nrows {
            for (j, &v) in dense.row_slice(i).iter().enumerate() {
                if v.abs() > T::epsilon() {
                    indices.push(j);
                    data.push(v);
                }
            }
            indptr.push(data.len());
        }
        Self {
            data,
            indices,
            indptr,
            nrows,
            ncols,
        }
    }

    /// Densifies back into a `Matrix`, zeros outside the pattern.
    pub fn to_dense(&self) -> Matrix<T> {
        let mut m = Matrix::zeros(self.nrows, self.ncols);
        for row in 0..self.nrows {
            for k in self.indptr[row]..self.indptr[row + 1] {
                m.set(row, self.indices[k], self.data[k]);
            }
        }
        m
    }

    /// Number of stored nonzeros.
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn check_bounds(&self, row_idx: usize, col_idx: usize) {
        assert!(
            row_idx < self.nrows && col_idx < self.ncols,
            "sparse index ({row_idx}, {col_idx}) out of range for {}x{}",
            self.nrows,
            self.ncols
        );
    }

    /// Linear offset of (row, col) into `data`/`indices`, if stored.
    ///
    /// Row slices are sorted by column, so this is a binary search over
    /// `indptr[row]..indptr[row + 1]`.
    pub fn pos_in_data(&self, row_idx: usize, col_idx: usize) -> Option<usize> {
        let slice = &self.indices[self.indptr[row_idx]..self.indptr[row_idx + 1]];
        slice
            .binary_search(&col_idx)
            .ok()
            .map(|k| self.indptr[row_idx] + k)
    }

    /// Stored value at (row, col), or zero when the position is not in the
    /// pattern. A sparse "missing" reads as the additive identity, not an
    /// error.
    #[inline]
    pub fn get(&self, row_idx: usize, col_idx: usize) -> T {
        self.check_bounds(row_idx, col_idx);
        match self.pos_in_data(row_idx, col_idx) {
            Some(k) => self.data[k],
            None => T::zero(),
        }
    }

    /// Pattern-preserving update: overwrites the value at (row, col) and
    /// returns `true` if the position is stored, returns `false` without
    /// mutating anything otherwise.
    #[inline]
    pub fn set(&mut self, row_idx: usize, col_idx: usize, val: T) -> bool {
        self.check_bounds(row_idx, col_idx);
        match self.pos_in_data(row_idx, col_idx) {
            Some(k) => {
                self.data[k] = val;
                true
            }
            None => false,
        }
    }

    /// Dense materialization of row `row_idx`, zeros outside the pattern.
    pub fn row(&self, row_idx: usize) -> Vector<T> {
        assert!(
            row_idx < self.nrows,
            "row index {row_idx} out of range for {} rows",
            self.nrows
        );
        let mut v = Vector::zeros(self.ncols);
        for k in self.indptr[row_idx]..self.indptr[row_idx + 1] {
            v.set(self.indices[k], self.data[k]);
        }
        v
    }

    /// Sparse matrix-vector product over stored nonzeros only, O(nnz).
    /// `vec.len()` must be at least `ncols`.
    pub fn mul(&self, vec: &Vector<T>) -> Vector<T> {
        assert!(
            vec.len() >= self.ncols,
            "mul requires vec.len() >= ncols ({} vs {})",
            vec.len(),
            self.ncols
        );
        let x = vec.as_slice();
        let mut out = Vector::zeros(self.nrows);
        for row in 0..self.nrows {
            let mut acc = T::zero();
            for k in self.indptr[row]..self.indptr[row + 1] {
                acc = acc + self.data[k] * x[self.indices[k]];
            }
            out.set(row, acc);
        }
        out
    }

    /// Product using only columns below `ncols_`: stored entries with
    /// `indices[k] >= ncols_` are skipped.
    pub fn mul_partial(&self, vec: &Vector<T>, ncols_: usize) -> Vector<T> {
        assert!(
            vec.len() >= ncols_,
            "mul_partial requires vec.len() >= {ncols_} (got {})",
            vec.len()
        );
        let x = vec.as_slice();
        let mut out = Vector::zeros(self.nrows);
        for row in 0..self.nrows {
            let mut acc = T::zero();
            for k in self.indptr[row]..self.indptr[row + 1] {
                let col = self.indices[k];
                // indices are sorted per row, the rest of the slice is out of range
                if col >= ncols_ {
                    break;
                }
                acc = acc + self.data[k] * x[col];
            }
            out.set(row, acc);
        }
        out
    }

    /// Raw views for destination-accumulation kernels.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn col_indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn row_ptr(&self) -> &[usize] {
        &self.indptr
    }
}

impl<T: Float + Send + Sync> MatVec<Vector<T>> for CsrMatrix<T> {
    fn matvec(&self, x: &Vector<T>, y: &mut Vector<T>) {
        crate::kernels::sp_mat_vec_mul(y, self, x);
    }
}

impl<T> MatShape for CsrMatrix<T> {
    fn nrows(&self) -> usize {
        self.nrows
    }
    fn ncols(&self) -> usize {
        self.ncols
    }
}
