//! Dense 1-D vector of real numbers.
//!
//! `Vector` is a value-like container passed by reference into the in-place
//! kernels; the pure/in-place two-form contract (`add`/`add_assign`, ...) exists
//! so that hot loops can avoid reallocation. Reductions here are sequential;
//! the backend-swappable parallel variants live in [`crate::kernels`] and in
//! the [`InnerProduct`] impl below.

use crate::core::traits::InnerProduct;
use crate::dense::Matrix;
use crate::error::MtxError;
use num_traits::Float;

/// Dense vector with fixed-at-a-time length and zero-initialized growth.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Float> Vector<T> {
    /// Empty vector of length 0.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Zero-initialized vector of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![T::zero(); n],
        }
    }

    /// Takes ownership of existing storage.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Truncates or zero-extends to length `n`.
    pub fn resize(&mut self, n: usize) {
        self.data.resize(n, T::zero());
    }

    #[inline]
    pub fn get(&self, idx: usize) -> T {
        assert!(
            idx < self.data.len(),
            "vector index {idx} out of range for length {}",
            self.data.len()
        );
        self.data[idx]
    }

    #[inline]
    pub fn set(&mut self, idx: usize, val: T) {
        assert!(
            idx < self.data.len(),
            "vector index {idx} out of range for length {}",
            self.data.len()
        );
        self.data[idx] = val;
    }

    /// Raw read view, the accessor the free kernels operate through.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Raw write view for destination-accumulation kernels.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Resizes to `other`'s length and copies its contents.
    pub fn copy_from(&mut self, other: &Vector<T>) {
        self.data.clear();
        self.data.extend_from_slice(&other.data);
    }

    /// Euclidean (L2) norm, `sqrt(Σ xᵢ²)`.
    pub fn norm2(&self) -> T {
        self.data
            .iter()
            .map(|&x| x * x)
            .fold(T::zero(), |acc, v| acc + v)
            .sqrt()
    }

    /// Inner product with `other`. Lengths must match.
    pub fn dot(&self, other: &Vector<T>) -> T {
        assert_eq!(
            self.len(),
            other.len(),
            "dot requires equal lengths ({} vs {})",
            self.len(),
            other.len()
        );
        self.data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| a * b)
            .fold(T::zero(), |acc, v| acc + v)
    }

    /// Outer product: a `len() × other.len()` matrix with `m[i][j] = self[i]·other[j]`.
    pub fn outer(&self, other: &Vector<T>) -> Matrix<T> {
        let mut m = Matrix::zeros(self.len(), other.len());
        for i in 0..self.len() {
            for j in 0..other.len() {
                m.set(i, j, self.data[i] * other.data[j]);
            }
        }
        m
    }

    /// Scales in place to unit L2 norm. A zero norm is a singular operation
    /// and leaves the vector unchanged.
    pub fn normalize(&mut self) -> Result<(), MtxError> {
        let n = self.norm2();
        if n == T::zero() {
            return Err(MtxError::SingularOperation("normalize"));
        }
        let inv = T::one() / n;
        for x in &mut self.data {
            *x = *x * inv;
        }
        Ok(())
    }

    /// Replaces each element with its reciprocal in place. Any zero element
    /// is a singular operation and leaves the vector unchanged.
    pub fn recip(&mut self) -> Result<(), MtxError> {
        if self.data.iter().any(|&x| x == T::zero()) {
            return Err(MtxError::SingularOperation("recip"));
        }
        for x in &mut self.data {
            *x = x.recip();
        }
        Ok(())
    }

    /// Elementwise sum. Lengths must match.
    pub fn add(&self, other: &Vector<T>) -> Vector<T> {
        let mut out = self.clone();
        out.add_assign(other);
        out
    }

    /// In-place elementwise sum.
    pub fn add_assign(&mut self, other: &Vector<T>) {
        assert_eq!(
            self.len(),
            other.len(),
            "add requires equal lengths ({} vs {})",
            self.len(),
            other.len()
        );
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a = *a + b;
        }
    }

    /// Elementwise difference. Lengths must match.
    pub fn sub(&self, other: &Vector<T>) -> Vector<T> {
        let mut out = self.clone();
        out.sub_assign(other);
        out
    }

    /// In-place elementwise difference.
    pub fn sub_assign(&mut self, other: &Vector<T>) {
        assert_eq!(
            self.len(),
            other.len(),
            "sub requires equal lengths ({} vs {})",
            self.len(),
            other.len()
        );
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a = *a - b;
        }
    }

    /// Scalar multiple.
    pub fn scale(&self, s: T) -> Vector<T> {
        let mut out = self.clone();
        out.scale_assign(s);
        out
    }

    /// In-place scalar multiple.
    pub fn scale_assign(&mut self, s: T) {
        for a in &mut self.data {
            *a = *a * s;
        }
    }
}

impl<T: Float> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

/// Inner product and norm for `Vector`, with optional Rayon parallelism.
///
/// The parallel path combines partial sums in an unspecified order, so across
/// backends only tolerance-level agreement with the sequential result is
/// promised, not bit-exact equality.
impl<T: Float + Send + Sync> InnerProduct<Vector<T>> for () {
    type Scalar = T;

    fn dot(&self, x: &Vector<T>, y: &Vector<T>) -> T {
        assert_eq!(
            x.len(),
            y.len(),
            "dot requires equal lengths ({} vs {})",
            x.len(),
            y.len()
        );
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.as_slice()
                .par_iter()
                .zip(y.as_slice().par_iter())
                .map(|(&xi, &yi)| xi * yi)
                .reduce(T::zero, |acc, v| acc + v)
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.dot(y)
        }
    }

    fn norm(&self, x: &Vector<T>) -> T {
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.as_slice()
                .par_iter()
                .map(|&xi| xi * xi)
                .reduce(T::zero, |acc, v| acc + v)
                .sqrt()
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.norm2()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn norm2_three_four_five() {
        let v = Vector::from_vec(vec![3.0, 4.0]);
        assert_abs_diff_eq!(v.norm2(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn normalize_preserves_direction() {
        let mut v = Vector::from_vec(vec![3.0, 4.0]);
        v.normalize().unwrap();
        assert_abs_diff_eq!(v.get(0), 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(v.get(1), 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(v.norm2(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn normalize_zero_vector_is_singular() {
        let mut v = Vector::<f64>::zeros(3);
        assert_eq!(v.normalize(), Err(MtxError::SingularOperation("normalize")));
        // unchanged
        assert_eq!(v.as_slice(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn recip_rejects_zero_and_leaves_data_alone() {
        let mut v = Vector::from_vec(vec![2.0, 0.0, 4.0]);
        assert!(v.recip().is_err());
        assert_eq!(v.as_slice(), &[2.0, 0.0, 4.0]);

        let mut w = Vector::from_vec(vec![2.0, 4.0]);
        w.recip().unwrap();
        assert_eq!(w.as_slice(), &[0.5, 0.25]);
    }

    #[test]
    fn outer_product_shape_and_values() {
        let a = Vector::from_vec(vec![1.0, 2.0]);
        let b = Vector::from_vec(vec![3.0, 4.0, 5.0]);
        let m = a.outer(&b);
        assert_eq!((m.nrows(), m.ncols()), (2, 3));
        assert_eq!(m.get(1, 2), 10.0);
    }
}
