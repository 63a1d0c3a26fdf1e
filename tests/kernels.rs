//! Tests for the destination-accumulation kernels and trait seams.
//!
//! The kernels must agree with the container methods they mirror and must
//! overwrite (not accumulate into) their pre-sized destinations.

use approx::assert_abs_diff_eq;
use mtxvec::kernels;
use mtxvec::{CsrMatrix, InnerProduct, MatVec, Matrix, Vector};
use rand::Rng;

fn random_vector(n: usize) -> Vector<f64> {
    let mut rng = rand::thread_rng();
    Vector::from_vec((0..n).map(|_| rng.r#gen::<f64>() - 0.5).collect())
}

fn random_matrix(m: usize, n: usize) -> Matrix<f64> {
    let mut rng = rand::thread_rng();
    Matrix::from_rows(
        &(0..m)
            .map(|_| (0..n).map(|_| rng.r#gen::<f64>() - 0.5).collect())
            .collect::<Vec<_>>(),
    )
    .unwrap()
}

#[test]
fn vec_kernels_match_container_ops() {
    let a = random_vector(64);
    let b = random_vector(64);

    let mut dot = 0.0;
    kernels::vec_dot(&mut dot, &a, &b);
    assert_abs_diff_eq!(dot, a.dot(&b), epsilon = 1e-12);

    let mut norm = 0.0;
    kernels::vec_norm2(&mut norm, &a);
    assert_abs_diff_eq!(norm, a.norm2(), epsilon = 1e-12);

    // destinations start dirty to check overwrite semantics
    let mut sum = random_vector(64);
    kernels::vec_add(&mut sum, &a, &b);
    let mut diff = random_vector(64);
    kernels::vec_sub(&mut diff, &a, &b);
    let mut scaled = random_vector(64);
    kernels::vec_scalar_mul(&mut scaled, &a, 2.5);
    for i in 0..64 {
        assert_abs_diff_eq!(sum.get(i), a.get(i) + b.get(i), epsilon = 1e-15);
        assert_abs_diff_eq!(diff.get(i), a.get(i) - b.get(i), epsilon = 1e-15);
        assert_abs_diff_eq!(scaled.get(i), a.get(i) * 2.5, epsilon = 1e-15);
    }
}

#[test]
fn mat_vec_kernel_overwrites_destination() {
    let a = random_matrix(6, 4);
    let x = random_vector(4);
    let mut y = random_vector(6);
    kernels::mat_vec_mul(&mut y, &a, &x);
    let reference = a.mul(&x);
    for i in 0..6 {
        assert_abs_diff_eq!(y.get(i), reference.get(i), epsilon = 1e-12);
    }
}

#[test]
fn partial_transpose_kernel_matches_method() {
    let a = random_matrix(5, 3);
    let x = random_vector(5);
    let mut y = Vector::zeros(3);
    kernels::mat_vec_mul_partial_t(&mut y, &a, &x, 4);
    let reference = a.mul_partial_t(&x, 4);
    for j in 0..3 {
        assert_abs_diff_eq!(y.get(j), reference.get(j), epsilon = 1e-12);
    }
}

#[test]
fn spmv_kernel_matches_dense_product() {
    let d = Matrix::from_rows(&[
        vec![1.0, 0.0, 2.0],
        vec![0.0, 0.0, 0.0],
        vec![0.0, 3.0, 4.0],
    ])
    .unwrap();
    let s = CsrMatrix::from_dense(&d);
    let x = random_vector(3);
    let mut y = Vector::zeros(3);
    kernels::sp_mat_vec_mul(&mut y, &s, &x);
    let reference = d.mul(&x);
    for i in 0..3 {
        assert_abs_diff_eq!(y.get(i), reference.get(i), epsilon = 1e-12);
    }
}

#[test]
fn row_coef_kernel_builds_product_rows() {
    let a = random_matrix(3, 4);
    let b = random_matrix(4, 5);
    let mut row = Vector::zeros(5);
    for i in 0..3 {
        kernels::mat_mul_row_coef(&mut row, &a, &b, i);
        for j in 0..5 {
            let expected = (0..4).map(|k| a.get(i, k) * b.get(k, j)).sum::<f64>();
            assert_abs_diff_eq!(row.get(j), expected, epsilon = 1e-12);
        }
    }
}

#[test]
fn copy_row_and_col_across_matrices() {
    let src = random_matrix(4, 3);
    let mut dst = Matrix::zeros(2, 3);
    kernels::copy_row(&mut dst, &src, 1, 3);
    assert_eq!(dst.row(1), src.row(3));

    let src2 = random_matrix(2, 5);
    kernels::copy_col(&mut dst, &src2, 0, 4);
    assert_eq!(dst.col(0), src2.col(4));
}

#[test]
fn matvec_trait_unifies_dense_and_sparse() {
    // power-iteration-style call site written against the trait
    fn one_step<M: MatVec<Vector<f64>>>(a: &M, x: &Vector<f64>, y: &mut Vector<f64>) {
        a.matvec(x, y);
    }

    let d = Matrix::from_rows(&[vec![4.0, 1.0], vec![1.0, 3.0]]).unwrap();
    let s = CsrMatrix::from_dense(&d);
    let x = Vector::from_vec(vec![1.0, 1.0]);
    let mut yd = Vector::zeros(2);
    let mut ys = Vector::zeros(2);
    one_step(&d, &x, &mut yd);
    one_step(&s, &x, &mut ys);
    assert_eq!(yd.as_slice(), &[5.0, 4.0]);
    assert_eq!(ys.as_slice(), yd.as_slice());
}

#[test]
fn inner_product_agrees_with_sequential_within_tolerance() {
    let a = random_vector(1000);
    let b = random_vector(1000);
    let ip = ();
    assert_abs_diff_eq!(ip.dot(&a, &b), a.dot(&b), epsilon = 1e-10);
    assert_abs_diff_eq!(ip.norm(&a), a.norm2(), epsilon = 1e-10);
}

#[test]
#[should_panic(expected = "destination has wrong length")]
fn undersized_destination_panics() {
    let a = random_matrix(3, 3);
    let x = random_vector(3);
    let mut y = Vector::zeros(2);
    kernels::mat_vec_mul(&mut y, &a, &x);
}
