// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};
use num_complex::Complex;

/// The `dim` x `dim` complex identity
pub(crate) fn identity(dim: usize) -> Array2<Complex<f64>> {
    Array2::from_diag_elem(dim, Complex::from(1_f64))
}

/// Inverts a square complex matrix, returning `None` when it is singular
///
/// The decomposition is done by nalgebra, the result is copied back into ndarray storage.
pub(crate) fn invert_matrix(matrix: ArrayView2<Complex<f64>>) -> Option<Array2<Complex<f64>>> {
    let (rows, columns) = matrix.dim();
    if rows != columns {
        return None;
    }
    let dense = DMatrix::from_fn(rows, columns, |i, j| matrix[[i, j]]);
    let inverse = dense.try_inverse()?;
    if inverse.iter().any(|element| !element.is_finite()) {
        return None;
    }
    Some(Array2::from_shape_fn((rows, columns), |(i, j)| {
        inverse[(i, j)]
    }))
}

/// Tests for hermiticity of a matrix
pub(crate) fn is_hermitian(matrix: ArrayView2<Complex<f64>>) -> bool {
    if matrix.nrows() != matrix.ncols() {
        return false;
    }
    let matrix_transpose = matrix.t();
    matrix
        .iter()
        .zip(matrix_transpose.iter())
        .all(|(element, adjoint_element)| {
            (element - adjoint_element.conj()).norm() < std::f64::EPSILON * 100_f64
        })
}

#[cfg(test)]
mod test {
    use super::{identity, invert_matrix, is_hermitian};
    use ndarray::array;
    use num_complex::Complex;
    use rand::Rng;

    #[test]
    fn real_non_hermitian_matrix_returns_false() {
        let matrix = array![[1., 2., 3.], [4., 5., 6.], [7., 8., 9.]];
        let matrix = matrix.mapv(Complex::from);
        assert!(!is_hermitian(matrix.view()));
    }

    #[test]
    fn complex_hermitian_matrices_return_true() {
        let matrix = array![
            [Complex::new(1., 0.), Complex::new(2., 2.)],
            [Complex::new(2., -2.), Complex::new(5., 0.)]
        ];
        assert!(is_hermitian(matrix.view()));
    }

    #[test]
    fn inverse_of_random_matrix_is_a_left_and_right_inverse() {
        let mut rng = rand::thread_rng();
        let dim = 4;
        // diagonally dominant, so invertible
        let matrix = ndarray::Array2::from_shape_fn((dim, dim), |(i, j)| {
            let shift = if i == j { 10. } else { 0. };
            Complex::new(rng.gen::<f64>() + shift, rng.gen::<f64>())
        });
        let inverse = invert_matrix(matrix.view()).unwrap();
        for product in [matrix.dot(&inverse), inverse.dot(&matrix)] {
            for (value, expected) in product.iter().zip(identity(dim).iter()) {
                approx::assert_relative_eq!(value.re, expected.re, epsilon = 1e-12);
                approx::assert_relative_eq!(value.im, expected.im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn singular_and_rectangular_matrices_have_no_inverse() {
        let singular = array![[1., 2.], [2., 4.]].mapv(Complex::from);
        assert!(invert_matrix(singular.view()).is_none());
        let rectangular = array![[1., 0., 0.], [0., 1., 0.]].mapv(Complex::from);
        assert!(invert_matrix(rectangular.view()).is_none());
    }
}
