// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Right-hand sides accepted by assignment and arithmetic
//!
//! Every kind of value a container can be combined with is a variant of [`Operand`]; operations
//! match exhaustively and reject the kinds they do not support with
//! [`GfError::UnsupportedOperand`].

use super::Gf;
use crate::{
    affine::{AffineOperator, InverseAffineOperator},
    GfError,
};
use dmft_mesher::Mesh;
use ndarray::{Array2, Array3, ArrayD, ArrayView2, ArrayView3, ArrayViewD, Ix2, Ix3};
use num_complex::Complex64;

/// A borrowed right-hand side for [`Gf::set_from`] and the fallible arithmetic methods
#[derive(Debug)]
pub enum Operand<'a, M: Mesh> {
    /// Another container of the same kind
    Gf(&'a Gf<M>),
    /// A tensor with the full `(mesh, rows, columns)` shape
    Rank3(ArrayView3<'a, Complex64>),
    /// A target-space matrix, broadcast over every mesh point
    Rank2(ArrayView2<'a, Complex64>),
    /// A tensor whose rank is only known at run time
    Dynamic(ArrayViewD<'a, Complex64>),
    /// A number, broadcast over every entry
    Scalar(Complex64),
    /// An affine expression, evaluated against the receiving container
    Affine(&'a AffineOperator),
    /// The inverse of an affine expression, evaluated against the receiving container
    InverseAffine(&'a InverseAffineOperator),
}

impl<'a, M: Mesh> Operand<'a, M> {
    /// Resolve run-time ranked tensors into their static counterparts
    pub(crate) fn resolve(self) -> Result<Self, GfError> {
        match self {
            Operand::Dynamic(view) => match view.ndim() {
                3 => view
                    .into_dimensionality::<Ix3>()
                    .map(Operand::Rank3)
                    .map_err(|e| GfError::UnsupportedOperand(e.to_string())),
                2 => view
                    .into_dimensionality::<Ix2>()
                    .map(Operand::Rank2)
                    .map_err(|e| GfError::UnsupportedOperand(e.to_string())),
                _ => Err(GfError::Shape {
                    expected: vec![0; 3],
                    found: view.shape().to_vec(),
                }),
            },
            other => Ok(other),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Operand::Gf(_) => "Green's function",
            Operand::Rank3(_) => "rank-3 tensor",
            Operand::Rank2(_) => "rank-2 tensor",
            Operand::Dynamic(_) => "tensor",
            Operand::Scalar(_) => "scalar",
            Operand::Affine(_) => "affine operator",
            Operand::InverseAffine(_) => "inverse affine operator",
        }
    }
}

impl<'a, M: Mesh> From<&'a Gf<M>> for Operand<'a, M> {
    fn from(g: &'a Gf<M>) -> Self {
        Operand::Gf(g)
    }
}

impl<'a, M: Mesh> From<ArrayView3<'a, Complex64>> for Operand<'a, M> {
    fn from(view: ArrayView3<'a, Complex64>) -> Self {
        Operand::Rank3(view)
    }
}

impl<'a, M: Mesh> From<&'a Array3<Complex64>> for Operand<'a, M> {
    fn from(array: &'a Array3<Complex64>) -> Self {
        Operand::Rank3(array.view())
    }
}

impl<'a, M: Mesh> From<ArrayView2<'a, Complex64>> for Operand<'a, M> {
    fn from(view: ArrayView2<'a, Complex64>) -> Self {
        Operand::Rank2(view)
    }
}

impl<'a, M: Mesh> From<&'a Array2<Complex64>> for Operand<'a, M> {
    fn from(array: &'a Array2<Complex64>) -> Self {
        Operand::Rank2(array.view())
    }
}

impl<'a, M: Mesh> From<ArrayViewD<'a, Complex64>> for Operand<'a, M> {
    fn from(view: ArrayViewD<'a, Complex64>) -> Self {
        Operand::Dynamic(view)
    }
}

impl<'a, M: Mesh> From<&'a ArrayD<Complex64>> for Operand<'a, M> {
    fn from(array: &'a ArrayD<Complex64>) -> Self {
        Operand::Dynamic(array.view())
    }
}

impl<M: Mesh> From<f64> for Operand<'_, M> {
    fn from(value: f64) -> Self {
        Operand::Scalar(Complex64::new(value, 0.))
    }
}

impl<M: Mesh> From<Complex64> for Operand<'_, M> {
    fn from(value: Complex64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a, M: Mesh> From<&'a AffineOperator> for Operand<'a, M> {
    fn from(operator: &'a AffineOperator) -> Self {
        Operand::Affine(operator)
    }
}

impl<'a, M: Mesh> From<&'a InverseAffineOperator> for Operand<'a, M> {
    fn from(operator: &'a InverseAffineOperator) -> Self {
        Operand::InverseAffine(operator)
    }
}

impl<M: Mesh> Gf<M> {
    /// Assign a new value to the container
    ///
    /// - another container copies its data, name, `beta` and statistic, the mesh is kept;
    /// - a rank-3 tensor is copied elementwise, a rank-2 tensor is broadcast over the mesh;
    /// - an affine operator or its inverse is evaluated against `self` and the result assigned.
    ///
    /// Any other operand, or a shape that does not match, fails without modifying `self`.
    pub fn set_from<'a, O>(&mut self, value: O) -> Result<(), GfError>
    where
        O: Into<Operand<'a, M>>,
        M: 'a,
    {
        match value.into().resolve()? {
            Operand::Gf(other) => {
                if other.shape() != self.shape() {
                    return Err(GfError::shape(&self.shape(), &other.shape()));
                }
                self.data.assign(&other.data);
                self.name = other.name.clone();
                self.beta = other.beta;
                self.statistic = other.statistic;
            }
            Operand::Rank3(view) => {
                if view.shape() != self.shape() {
                    return Err(GfError::shape(&self.shape(), view.shape()));
                }
                self.data.assign(&view);
            }
            Operand::Rank2(view) => {
                if view.shape() != self.target_shape() {
                    return Err(GfError::shape(&self.target_shape(), view.shape()));
                }
                // ndarray broadcasts the matrix over the leading axis
                self.data.assign(&view);
            }
            Operand::Affine(operator) => {
                let evaluated = operator.evaluate(self)?;
                self.data.assign(&evaluated.data);
            }
            Operand::InverseAffine(operator) => {
                let evaluated = operator.evaluate(self)?;
                self.data.assign(&evaluated.data);
            }
            other @ (Operand::Scalar(_) | Operand::Dynamic(_)) => {
                return Err(GfError::UnsupportedOperand(format!(
                    "cannot assign a {} to a Green's function",
                    other.kind()
                )))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{
        affine::{i_omega_n, AffineOperator},
        greens_functions::{GfBuilder, GfImFreq, GfImTime},
        GfError,
    };
    use approx::assert_relative_eq;
    use dmft_mesher::{MeshImFreq, Statistic};
    use ndarray::{array, Array2, Array3, ArrayD, IxDyn};
    use num_complex::Complex64;
    use std::f64::consts::PI;

    fn gf(n_points: usize, orbitals: usize) -> GfImFreq {
        GfBuilder::new()
            .with_mesh(MeshImFreq::new(10., Statistic::Fermion, n_points).unwrap())
            .with_indices(crate::indices::GfIndices::with_default(orbitals, orbitals))
            .with_beta(10.)
            .build()
            .unwrap()
    }

    #[test]
    fn identity_operator_assigns_the_matsubara_frequencies() {
        let mut g = gf(1, 1);
        g.set_from(&i_omega_n()).unwrap();
        assert_eq!(g.mesh().matsubara_points(), &[-1, 0]);
        assert_relative_eq!(g.data()[[0, 0, 0]].re, 0.);
        assert_relative_eq!(g.data()[[0, 0, 0]].im, -PI / 10.);
        assert_relative_eq!(g.data()[[1, 0, 0]].re, 0.);
        assert_relative_eq!(g.data()[[1, 0, 0]].im, PI / 10.);
    }

    #[test]
    fn assigning_a_container_copies_metadata_but_keeps_the_mesh() {
        let mut source: GfImFreq = GfBuilder::new()
            .with_mesh(MeshImFreq::new(3., Statistic::Boson, 2).unwrap())
            .with_indices(["a"])
            .with_beta(3.)
            .with_statistic(Statistic::Boson)
            .with_name("source")
            .build()
            .unwrap();
        source.data_mut().fill(Complex64::new(2., -1.));

        let mut target = gf(2, 1);
        let mesh_before = target.mesh().clone();
        target.set_from(&source).unwrap();
        assert_eq!(target.data(), source.data());
        assert_eq!(target.name(), "source");
        assert_eq!(target.beta(), Some(3.));
        assert_eq!(target.statistic(), Statistic::Boson);
        assert_eq!(target.mesh(), &mesh_before);
    }

    #[test]
    fn rank_two_tensors_are_broadcast_over_the_mesh() {
        let mut g = gf(3, 2);
        let matrix = array![
            [Complex64::new(1., 0.), Complex64::new(0., 1.)],
            [Complex64::new(0., -1.), Complex64::new(2., 0.)]
        ];
        g.set_from(&matrix).unwrap();
        for point in g.data().outer_iter() {
            assert_eq!(point, matrix);
        }
    }

    #[test]
    fn rank_three_tensors_are_copied_elementwise() {
        let mut g = gf(1, 1);
        let data = Array3::from_shape_vec(
            (2, 1, 1),
            vec![Complex64::new(1., 2.), Complex64::new(3., 4.)],
        )
        .unwrap();
        g.set_from(&data).unwrap();
        assert_eq!(g.data(), &data);

        let dynamic: ArrayD<Complex64> = data.clone().into_dyn();
        g.zero();
        g.set_from(&dynamic).unwrap();
        assert_eq!(g.data(), &data);
    }

    #[test]
    fn bad_ranks_shapes_and_kinds_leave_the_container_untouched() {
        let mut g = gf(1, 2);
        g.set_from(&i_omega_n()).unwrap();
        let before = g.data().clone();

        let rank_four = ArrayD::<Complex64>::zeros(IxDyn(&[2, 2, 2, 1]));
        assert!(matches!(g.set_from(&rank_four), Err(GfError::Shape { .. })));
        let rank_one = ArrayD::<Complex64>::zeros(IxDyn(&[2]));
        assert!(matches!(g.set_from(&rank_one), Err(GfError::Shape { .. })));
        let wrong_matrix = Array2::<Complex64>::zeros((3, 3));
        assert!(matches!(g.set_from(&wrong_matrix), Err(GfError::Shape { .. })));
        let wrong_tensor = Array3::<Complex64>::zeros((4, 2, 2));
        assert!(matches!(g.set_from(&wrong_tensor), Err(GfError::Shape { .. })));
        assert!(matches!(g.set_from(1.5), Err(GfError::UnsupportedOperand(_))));
        let other = gf(2, 2);
        assert!(matches!(g.set_from(&other), Err(GfError::Shape { .. })));

        assert_eq!(g.data(), &before);
    }

    #[test]
    fn affine_operators_need_a_frequency_mesh() {
        let mut g: GfImTime = GfBuilder::new()
            .with_beta(1.)
            .with_n_points(4)
            .with_indices(["0"])
            .build()
            .unwrap();
        let operator = AffineOperator::new(1., 1.);
        assert!(matches!(
            g.set_from(&operator),
            Err(GfError::UnsupportedOperand(_))
        ));
        assert!(matches!(
            g.set_from(&operator.inverse()),
            Err(GfError::UnsupportedOperand(_))
        ));
    }
}
