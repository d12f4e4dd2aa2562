// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Sampling
//!
//! A container on a compact basis holds expansion coefficients `g_l`. Dense data at a set of
//! sampling points `x_i` follows as `g(x_i) = sum_l U_il g_l`, where `U_il` is basis function `l`
//! evaluated at `x_i`. The transform is injected through [`SamplingTransform`] so that the container
//! layer never depends on how the basis itself was computed.
//!
//! [`BasisSampling`] builds `U` from the evaluation matrices of any [`IrBasis`], and
//! [`PoleBasis`] is a discrete Lehmann basis which can be used where no compact basis is available.

mod pole;

pub use pole::PoleBasis;

use dmft_mesher::{IrBasis, Statistic};
use miette::Diagnostic;
use nalgebra::DMatrix;
use ndarray::{Array2, Array3, ArrayView3, Axis};
use num_complex::Complex64;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Failures of the transform between basis coefficients and sampled data
pub enum SamplingError {
    /// The parity of a Matsubara index does not match the statistic of the basis
    #[error("Matsubara index {index} does not belong to a {statistic} basis")]
    StatisticMismatch {
        /// The offending index `2k + zeta`
        index: i64,
        /// Statistic of the basis
        statistic: Statistic,
    },
    /// An imaginary time outside of `[0, beta]`
    #[error("Imaginary time {tau} lies outside [0, {beta}]")]
    TauOutOfRange {
        /// The offending time
        tau: f64,
        /// Inverse temperature of the basis
        beta: f64,
    },
    /// The coefficient tensor does not have one entry per basis function along the sampled axis
    #[error("Coefficients have {found} entries along axis {axis}, the basis has {expected}")]
    CoefficientShape {
        /// The sampled axis
        axis: usize,
        /// Size of the basis
        expected: usize,
        /// Extent of the sampled axis
        found: usize,
    },
    /// The sampled axis does not exist
    #[error("Axis {0} is out of bounds for a rank-3 tensor")]
    InvalidAxis(usize),
    /// A basis cannot be built from the given parameters
    #[error("Invalid basis: {0}")]
    InvalidBasis(String),
}

/// A prepared evaluator taking coefficients to values at fixed sampling points
pub trait SparseSampling: std::fmt::Debug {
    /// Number of sampling points, the extent of the sampled axis after evaluation
    fn n_sampling_points(&self) -> usize;

    /// Number of basis functions, the extent of the sampled axis before evaluation
    fn basis_size(&self) -> usize;

    /// Evaluate along `axis`, leaving the other two axes untouched
    fn evaluate(
        &self,
        coefficients: ArrayView3<'_, Complex64>,
        axis: Axis,
    ) -> Result<Array3<Complex64>, SamplingError>;
}

/// Factory for sampling evaluators on a basis
pub trait SamplingTransform {
    /// An evaluator at the Matsubara frequencies `i (2k + zeta) pi / beta`, given as `2k + zeta`
    fn matsubara_sampling(
        &self,
        basis: &dyn IrBasis,
        sampling_points: &[i64],
    ) -> Result<Box<dyn SparseSampling>, SamplingError>;

    /// An evaluator at the imaginary times `sampling_points`
    fn tau_sampling(
        &self,
        basis: &dyn IrBasis,
        sampling_points: &[f64],
    ) -> Result<Box<dyn SparseSampling>, SamplingError>;
}

/// Sampling through the evaluation matrices of the basis
#[derive(Clone, Copy, Debug, Default)]
pub struct BasisSampling;

impl SamplingTransform for BasisSampling {
    fn matsubara_sampling(
        &self,
        basis: &dyn IrBasis,
        sampling_points: &[i64],
    ) -> Result<Box<dyn SparseSampling>, SamplingError> {
        let statistic = basis.statistic();
        if let Some(&index) = sampling_points
            .iter()
            .find(|&&index| index.rem_euclid(2) != statistic.zeta())
        {
            return Err(SamplingError::StatisticMismatch { index, statistic });
        }
        let matrix = basis.evaluate_matsubara(sampling_points);
        tracing::trace!(
            "Matsubara sampling matrix of shape {}x{}",
            matrix.nrows(),
            matrix.ncols()
        );
        Ok(Box::new(MatrixSampling::from_nalgebra(&matrix)))
    }

    fn tau_sampling(
        &self,
        basis: &dyn IrBasis,
        sampling_points: &[f64],
    ) -> Result<Box<dyn SparseSampling>, SamplingError> {
        let beta = basis.beta();
        if let Some(&tau) = sampling_points
            .iter()
            .find(|&&tau| !(0_f64..=beta).contains(&tau))
        {
            return Err(SamplingError::TauOutOfRange { tau, beta });
        }
        let matrix = basis.evaluate_tau(sampling_points).map(Complex64::from);
        tracing::trace!(
            "Tau sampling matrix of shape {}x{}",
            matrix.nrows(),
            matrix.ncols()
        );
        Ok(Box::new(MatrixSampling::from_nalgebra(&matrix)))
    }
}

/// Evaluation by a dense `(sampling points, basis size)` matrix
#[derive(Clone, Debug)]
pub struct MatrixSampling {
    matrix: Array2<Complex64>,
}

impl MatrixSampling {
    /// Sample with `matrix[sampling_point, basis_function]`
    pub fn new(matrix: Array2<Complex64>) -> Self {
        Self { matrix }
    }

    fn from_nalgebra(matrix: &DMatrix<Complex64>) -> Self {
        Self::new(Array2::from_shape_fn(
            (matrix.nrows(), matrix.ncols()),
            |(i, l)| matrix[(i, l)],
        ))
    }

    /// The sampling matrix
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }
}

impl SparseSampling for MatrixSampling {
    fn n_sampling_points(&self) -> usize {
        self.matrix.nrows()
    }

    fn basis_size(&self) -> usize {
        self.matrix.ncols()
    }

    fn evaluate(
        &self,
        coefficients: ArrayView3<'_, Complex64>,
        axis: Axis,
    ) -> Result<Array3<Complex64>, SamplingError> {
        if axis.index() >= 3 {
            return Err(SamplingError::InvalidAxis(axis.index()));
        }
        let found = coefficients.len_of(axis);
        if found != self.basis_size() {
            return Err(SamplingError::CoefficientShape {
                axis: axis.index(),
                expected: self.basis_size(),
                found,
            });
        }

        // Work with the sampled axis in front
        let mut coefficients = coefficients;
        coefficients.swap_axes(0, axis.index());
        let (_, rest_a, rest_b) = coefficients.dim();
        let mut values = Array3::zeros((self.n_sampling_points(), rest_a, rest_b));
        for (mut value, row) in values.outer_iter_mut().zip(self.matrix.outer_iter()) {
            for (&weight, coefficient) in row.iter().zip(coefficients.outer_iter()) {
                value.scaled_add(weight, &coefficient);
            }
        }
        values.swap_axes(0, axis.index());
        Ok(values.as_standard_layout().into_owned())
    }
}

#[cfg(test)]
mod test {
    use super::{BasisSampling, MatrixSampling, PoleBasis, SamplingError, SamplingTransform, SparseSampling};
    use dmft_mesher::Statistic;
    use ndarray::{array, Array2, Array3, Axis};
    use num_complex::Complex64;
    use rand::Rng;

    fn random_coefficients(shape: (usize, usize, usize)) -> Array3<Complex64> {
        let mut rng = rand::thread_rng();
        Array3::from_shape_simple_fn(shape, || Complex64::new(rng.gen(), rng.gen()))
    }

    #[test]
    fn evaluation_along_any_axis_is_a_matrix_product() {
        let matrix = array![[1., 2., 0.], [0., 1., -1.]].mapv(Complex64::from);
        let sampling = MatrixSampling::new(matrix.clone());
        let coefficients = random_coefficients((2, 3, 4));

        let values = sampling.evaluate(coefficients.view(), Axis(1)).unwrap();
        assert_eq!(values.shape(), &[2, 2, 4]);
        for ((a, i, b), value) in values.indexed_iter() {
            let expected: Complex64 = (0..3).map(|l| matrix[[i, l]] * coefficients[[a, l, b]]).sum();
            approx::assert_relative_eq!(value.re, expected.re, epsilon = 1e-12);
            approx::assert_relative_eq!(value.im, expected.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn mismatched_coefficients_are_rejected() {
        let sampling = MatrixSampling::new(Array2::zeros((2, 3)));
        let coefficients = random_coefficients((2, 2, 2));
        assert!(matches!(
            sampling.evaluate(coefficients.view(), Axis(0)),
            Err(SamplingError::CoefficientShape { axis: 0, expected: 3, found: 2 })
        ));
        assert!(matches!(
            sampling.evaluate(coefficients.view(), Axis(3)),
            Err(SamplingError::InvalidAxis(3))
        ));
    }

    #[test]
    fn sampling_points_must_match_the_basis() {
        let basis = PoleBasis::new(2., Statistic::Fermion, vec![-1., 1.]).unwrap();
        assert!(matches!(
            BasisSampling.matsubara_sampling(&basis, &[-3, -1, 2]),
            Err(SamplingError::StatisticMismatch { index: 2, .. })
        ));
        assert!(BasisSampling.matsubara_sampling(&basis, &[-3, -1, 1]).is_ok());
        assert!(matches!(
            BasisSampling.tau_sampling(&basis, &[0., 2.5]),
            Err(SamplingError::TauOutOfRange { .. })
        ));
        let sampling = BasisSampling.tau_sampling(&basis, &[0., 1., 2.]).unwrap();
        assert_eq!(sampling.n_sampling_points(), 3);
        assert_eq!(sampling.basis_size(), 2);
    }
}
