// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The affine expression `a0 + a1 z` over the frequency variable of a mesh
//!
//! An operator is built symbolically, from [`i_omega_n`] and the arithmetic below, and only
//! becomes a tensor when it is evaluated against a reference container. On a Matsubara mesh `z` is
//! `i nu`, on a real-frequency mesh it is `omega`. Evaluating against any other mesh fails.

use crate::{
    greens_functions::Gf,
    utilities::{identity, invert_matrix},
    GfError,
};
use dmft_mesher::Mesh;
use ndarray::{Array2, ArrayView2, Axis};
use num_complex::Complex64;
use std::ops::{Mul, Neg};

/// A coefficient of an affine operator, either a multiple of the identity or a full matrix
#[derive(Clone, Debug, PartialEq)]
pub enum Coefficient {
    /// A multiple of the identity
    Scalar(Complex64),
    /// A square matrix over the target space
    Matrix(Array2<Complex64>),
}

impl Coefficient {
    /// The coefficient as a `dim` x `dim` matrix
    pub fn to_matrix(&self, dim: usize) -> Result<Array2<Complex64>, GfError> {
        match self {
            Coefficient::Scalar(value) => Ok(identity(dim) * *value),
            Coefficient::Matrix(matrix) => {
                if matrix.dim() != (dim, dim) {
                    return Err(GfError::shape(&[dim, dim], matrix.shape()));
                }
                Ok(matrix.clone())
            }
        }
    }

    fn scale(&self, factor: Complex64) -> Self {
        match self {
            Coefficient::Scalar(value) => Coefficient::Scalar(value * factor),
            Coefficient::Matrix(matrix) => Coefficient::Matrix(matrix * factor),
        }
    }
}

impl From<f64> for Coefficient {
    fn from(value: f64) -> Self {
        Coefficient::Scalar(Complex64::new(value, 0.))
    }
}

impl From<Complex64> for Coefficient {
    fn from(value: Complex64) -> Self {
        Coefficient::Scalar(value)
    }
}

impl From<Array2<Complex64>> for Coefficient {
    fn from(matrix: Array2<Complex64>) -> Self {
        Coefficient::Matrix(matrix)
    }
}

impl From<Array2<f64>> for Coefficient {
    fn from(matrix: Array2<f64>) -> Self {
        Coefficient::Matrix(matrix.mapv(Complex64::from))
    }
}

/// The expression `a0 + a1 z`
#[derive(Clone, Debug, PartialEq)]
pub struct AffineOperator {
    a0: Coefficient,
    a1: Coefficient,
}

/// The frequency variable itself, `0 + 1 z`
pub fn i_omega_n() -> AffineOperator {
    AffineOperator::new(0., 1.)
}

impl AffineOperator {
    /// The operator `a0 + a1 z`
    pub fn new(a0: impl Into<Coefficient>, a1: impl Into<Coefficient>) -> Self {
        Self {
            a0: a0.into(),
            a1: a1.into(),
        }
    }

    /// The constant coefficient
    pub fn a0(&self) -> &Coefficient {
        &self.a0
    }

    /// The coefficient of the frequency variable
    pub fn a1(&self) -> &Coefficient {
        &self.a1
    }

    /// Shift the constant term by a scalar, which requires the constant term to be a scalar
    pub fn add_scalar(&self, value: impl Into<Complex64>) -> Result<Self, GfError> {
        match &self.a0 {
            Coefficient::Scalar(a0) => Ok(Self {
                a0: Coefficient::Scalar(a0 + value.into()),
                a1: self.a1.clone(),
            }),
            Coefficient::Matrix(_) => Err(GfError::UnsupportedOperand(
                "cannot add a scalar to an operator with a matrix constant term".into(),
            )),
        }
    }

    /// Subtract `value` times the identity, see [`AffineOperator::add_scalar`]
    pub fn sub_scalar(&self, value: impl Into<Complex64>) -> Result<Self, GfError> {
        self.add_scalar(-value.into())
    }

    /// Add a matrix to the constant term
    ///
    /// A scalar constant term is promoted to a multiple of the identity sized from `matrix`.
    pub fn add_matrix(&self, matrix: ArrayView2<'_, Complex64>) -> Result<Self, GfError> {
        let (rows, columns) = matrix.dim();
        if rows != columns {
            return Err(GfError::shape(&[rows, rows], &[rows, columns]));
        }
        let a0 = self.a0.to_matrix(rows)? + &matrix;
        Ok(Self {
            a0: Coefficient::Matrix(a0),
            a1: self.a1.clone(),
        })
    }

    /// Subtract a target-space matrix from the constant coefficient
    pub fn sub_matrix(&self, matrix: ArrayView2<'_, Complex64>) -> Result<Self, GfError> {
        self.add_matrix(matrix.mapv(|x| -x).view())
    }

    /// Evaluate against the mesh of `g` and add the values of `g`, giving `a0 + a1 z + g`
    pub fn add_to<M: Mesh>(&self, g: &Gf<M>) -> Result<Gf<M>, GfError> {
        let mut result = self.evaluate(g)?;
        result.add_assign_from(g)?;
        Ok(result)
    }

    /// Evaluate against the mesh of `g` and subtract the values of `g`, giving `a0 + a1 z - g`
    pub fn sub_gf<M: Mesh>(&self, g: &Gf<M>) -> Result<Gf<M>, GfError> {
        let negated = -g;
        self.add_to(&negated)
    }

    /// Tabulate `a0 + a1 z` on the mesh of `g`
    ///
    /// The result is a copy of `g` with its data replaced; `g` itself is not modified.
    pub fn evaluate<M: Mesh>(&self, g: &Gf<M>) -> Result<Gf<M>, GfError> {
        let frequencies = g.mesh().frequencies().ok_or_else(|| {
            GfError::UnsupportedOperand(format!(
                "affine operators are only defined on frequency meshes, not {}",
                M::FORMAT
            ))
        })?;
        let [_, rows, columns] = g.shape();
        if rows != columns {
            return Err(GfError::shape(&[rows, rows], &[rows, columns]));
        }
        let a0 = self.a0.to_matrix(rows)?;
        let a1 = self.a1.to_matrix(rows)?;

        let mut result = g.copy();
        result.zero();
        for (mut point, z) in result.data_mut().axis_iter_mut(Axis(0)).zip(frequencies) {
            point.scaled_add(z, &a1);
            point += &a0;
        }
        Ok(result)
    }

    /// The deferred inverse `(a0 + a1 z)^-1`
    pub fn inverse(&self) -> InverseAffineOperator {
        InverseAffineOperator {
            operator: self.clone(),
        }
    }
}

impl Mul<f64> for &AffineOperator {
    type Output = AffineOperator;
    fn mul(self, scalar: f64) -> AffineOperator {
        self * Complex64::new(scalar, 0.)
    }
}

impl Mul<Complex64> for &AffineOperator {
    type Output = AffineOperator;
    fn mul(self, scalar: Complex64) -> AffineOperator {
        AffineOperator {
            a0: self.a0.scale(scalar),
            a1: self.a1.scale(scalar),
        }
    }
}

impl Mul<f64> for AffineOperator {
    type Output = AffineOperator;
    fn mul(self, scalar: f64) -> AffineOperator {
        &self * scalar
    }
}

impl Mul<Complex64> for AffineOperator {
    type Output = AffineOperator;
    fn mul(self, scalar: Complex64) -> AffineOperator {
        &self * scalar
    }
}

impl Mul<AffineOperator> for f64 {
    type Output = AffineOperator;
    fn mul(self, operator: AffineOperator) -> AffineOperator {
        operator * self
    }
}

impl Neg for AffineOperator {
    type Output = AffineOperator;
    fn neg(self) -> AffineOperator {
        self * -1.
    }
}

/// The pointwise inverse of an [`AffineOperator`], evaluated lazily
#[derive(Clone, Debug, PartialEq)]
pub struct InverseAffineOperator {
    operator: AffineOperator,
}

impl InverseAffineOperator {
    /// The operator being inverted
    pub fn operator(&self) -> &AffineOperator {
        &self.operator
    }

    /// Tabulate `(a0 + a1 z)^-1` on the mesh of `g`, failing on the first singular point
    pub fn evaluate<M: Mesh>(&self, g: &Gf<M>) -> Result<Gf<M>, GfError> {
        let mut result = self.operator.evaluate(g)?;
        for (mesh_index, mut point) in result.data_mut().axis_iter_mut(Axis(0)).enumerate() {
            let inverse =
                invert_matrix(point.view()).ok_or(GfError::SingularMatrix { mesh_index })?;
            point.assign(&inverse);
        }
        Ok(result)
    }

    /// Undo the inversion
    pub fn inverse(&self) -> AffineOperator {
        self.operator.clone()
    }
}
