// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Elementwise arithmetic on containers
//!
//! The fallible methods take an [`Operand`] and return an error for unsupported kinds or mismatched
//! shapes. The std operators cover the cases whose operand type already guarantees success, except
//! for `+` between containers which panics on a shape mismatch like ndarray does.

use super::{Gf, Operand};
use crate::GfError;
use dmft_mesher::Mesh;
use num_complex::Complex64;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg};

impl<M: Mesh> Gf<M> {
    /// Check that `operand` can be added to `self`, returning it in resolved form
    fn addend<'a>(&self, operand: Operand<'a, M>) -> Result<Operand<'a, M>, GfError> {
        match operand.resolve()? {
            Operand::Gf(other) if other.shape() != self.shape() => {
                Err(GfError::shape(&self.shape(), &other.shape()))
            }
            Operand::Rank3(view) if view.shape() != self.shape() => {
                Err(GfError::shape(&self.shape(), view.shape()))
            }
            Operand::Rank2(view) if view.shape() != self.target_shape() => {
                Err(GfError::shape(&self.target_shape(), view.shape()))
            }
            operand @ (Operand::Gf(_) | Operand::Rank3(_) | Operand::Rank2(_)) => Ok(operand),
            other => Err(GfError::UnsupportedOperand(format!(
                "cannot add a {} to a Green's function",
                other.kind()
            ))),
        }
    }

    /// Add a same-kind container, a full tensor or a broadcast matrix in place
    pub fn add_assign_from<'a, O>(&mut self, value: O) -> Result<(), GfError>
    where
        O: Into<Operand<'a, M>>,
        M: 'a,
    {
        match self.addend(value.into())? {
            Operand::Gf(other) => self.data += &other.data,
            Operand::Rank3(view) => self.data += &view,
            Operand::Rank2(view) => self.data += &view,
            _ => unreachable!("addend only returns additive operands"),
        }
        Ok(())
    }

    /// The sum of `self` and `value` as a new container with the mesh and indices of `self`
    pub fn try_add<'a, O>(&self, value: O) -> Result<Self, GfError>
    where
        O: Into<Operand<'a, M>>,
        M: 'a,
    {
        let operand = self.addend(value.into())?;
        let mut result = self.copy();
        result.add_assign_from(operand)?;
        Ok(result)
    }

    /// Scale every entry by a scalar operand
    pub fn try_mul<'a, O>(&self, value: O) -> Result<Self, GfError>
    where
        O: Into<Operand<'a, M>>,
        M: 'a,
    {
        match value.into() {
            Operand::Scalar(scalar) => Ok(self * scalar),
            other => Err(GfError::UnsupportedOperand(format!(
                "cannot multiply a Green's function by a {}",
                other.kind()
            ))),
        }
    }

    /// Divide every entry by a scalar operand
    pub fn try_div<'a, O>(&self, value: O) -> Result<Self, GfError>
    where
        O: Into<Operand<'a, M>>,
        M: 'a,
    {
        match value.into() {
            Operand::Scalar(scalar) => Ok(self / scalar),
            other => Err(GfError::UnsupportedOperand(format!(
                "cannot divide a Green's function by a {}",
                other.kind()
            ))),
        }
    }
}

impl<M: Mesh, S: Into<Complex64>> MulAssign<S> for Gf<M> {
    fn mul_assign(&mut self, scalar: S) {
        let scalar = scalar.into();
        self.data.mapv_inplace(|x| x * scalar);
    }
}

impl<M: Mesh, S: Into<Complex64>> DivAssign<S> for Gf<M> {
    fn div_assign(&mut self, scalar: S) {
        let scalar = scalar.into();
        self.data.mapv_inplace(|x| x / scalar);
    }
}

impl<M: Mesh, S: Into<Complex64>> Mul<S> for &Gf<M> {
    type Output = Gf<M>;

    fn mul(self, scalar: S) -> Gf<M> {
        let mut result = self.copy();
        result *= scalar;
        result
    }
}

impl<M: Mesh, S: Into<Complex64>> Mul<S> for Gf<M> {
    type Output = Gf<M>;

    fn mul(mut self, scalar: S) -> Gf<M> {
        self *= scalar;
        self
    }
}

impl<M: Mesh> Mul<&Gf<M>> for f64 {
    type Output = Gf<M>;

    fn mul(self, g: &Gf<M>) -> Gf<M> {
        g * self
    }
}

impl<M: Mesh> Mul<&Gf<M>> for Complex64 {
    type Output = Gf<M>;

    fn mul(self, g: &Gf<M>) -> Gf<M> {
        g * self
    }
}

impl<M: Mesh, S: Into<Complex64>> Div<S> for &Gf<M> {
    type Output = Gf<M>;

    fn div(self, scalar: S) -> Gf<M> {
        let mut result = self.copy();
        result /= scalar;
        result
    }
}

impl<M: Mesh, S: Into<Complex64>> Div<S> for Gf<M> {
    type Output = Gf<M>;

    fn div(mut self, scalar: S) -> Gf<M> {
        self /= scalar;
        self
    }
}

impl<M: Mesh> Neg for &Gf<M> {
    type Output = Gf<M>;

    fn neg(self) -> Gf<M> {
        self * -1_f64
    }
}

impl<M: Mesh> Add<&Gf<M>> for &Gf<M> {
    type Output = Gf<M>;

    fn add(self, other: &Gf<M>) -> Gf<M> {
        match self.try_add(other) {
            Ok(sum) => sum,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<M: Mesh> AddAssign<&Gf<M>> for Gf<M> {
    fn add_assign(&mut self, other: &Gf<M>) {
        if let Err(e) = self.add_assign_from(other) {
            panic!("{e}");
        }
    }
}
