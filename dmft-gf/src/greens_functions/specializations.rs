// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Operations that only exist for some mesh kinds

use super::{Gf, GfBuilder, GfIr};
use crate::{sampling::SamplingTransform, GfError};
use dmft_mesher::{IrBasis, Mesh, MeshImFreq, MeshImTime, MeshIr, MeshLegendre, MeshReFreq};
use ndarray::{Array3, Axis};
use num_complex::Complex64;
use std::sync::Arc;

/// Meshes over a frequency variable, on which containers can be inverted pointwise
pub trait FrequencyDomain: Mesh {}

impl FrequencyDomain for MeshImFreq {}
impl FrequencyDomain for MeshReFreq {}

impl<M: FrequencyDomain> Gf<M> {
    /// A new container holding the matrix inverse at every mesh point
    ///
    /// A singular point is reported as [`GfError::SingularMatrix`] and is not recovered from.
    #[tracing::instrument(name = "Gf inverse", level = "trace", skip_all)]
    pub fn inverse(&self) -> Result<Self, GfError> {
        let mut inverse = self.copy();
        inverse.invert_in_place()?;
        Ok(inverse)
    }
}

/// Compute the pointwise inverse of a frequency Green's function
pub fn inverse<M: FrequencyDomain>(g: &Gf<M>) -> Result<Gf<M>, GfError> {
    g.inverse()
}

fn check_sampled<M: Mesh>(target: &Gf<M>, values: &Array3<Complex64>) -> Result<(), GfError> {
    if values.shape() != target.shape() {
        return Err(GfError::shape(&target.shape(), values.shape()));
    }
    Ok(())
}

/// The source basis must describe the same temperature and statistic as the target mesh
fn check_target<M: Mesh>(target: &Gf<M>, source: &GfIr) -> Result<(), GfError> {
    if source.target_shape() != target.target_shape() {
        return Err(GfError::shape(&target.target_shape(), &source.target_shape()));
    }
    let basis = source.basis();
    GfError::check_domain(
        (target.mesh.beta(), target.mesh.statistic()),
        (Some(basis.beta()), Some(basis.statistic())),
    )
}

impl Gf<MeshImFreq> {
    /// Evaluate the basis expansion held by `g` at the Matsubara frequencies of this mesh
    #[tracing::instrument(name = "Matsubara sampling", level = "debug", skip_all)]
    pub fn set_from_ir(
        &mut self,
        g: &GfIr,
        transform: &dyn SamplingTransform,
    ) -> Result<(), GfError> {
        check_target(self, g)?;
        let sampling_points = self.mesh.matsubara_indices();
        tracing::trace!("Sampling {} frequencies", sampling_points.len());
        let sampling = transform.matsubara_sampling(g.mesh().basis().as_ref(), &sampling_points)?;
        let values = sampling.evaluate(g.data.view(), Axis(0))?;
        check_sampled(self, &values)?;
        self.data.assign(&values);
        Ok(())
    }
}

impl Gf<MeshImTime> {
    /// Evaluate the basis expansion held by `g` at the imaginary times of this mesh
    #[tracing::instrument(name = "Tau sampling", level = "debug", skip_all)]
    pub fn set_from_ir(
        &mut self,
        g: &GfIr,
        transform: &dyn SamplingTransform,
    ) -> Result<(), GfError> {
        check_target(self, g)?;
        tracing::trace!("Sampling {} times", self.mesh.size());
        let sampling = transform.tau_sampling(g.mesh().basis().as_ref(), self.mesh.x_values())?;
        let values = sampling.evaluate(g.data.view(), Axis(0))?;
        check_sampled(self, &values)?;
        self.data.assign(&values);
        Ok(())
    }
}

impl Gf<MeshLegendre> {
    /// A builder whose mesh is fixed to `n_points` Legendre coefficients
    pub fn legendre_builder(n_points: usize) -> Result<GfBuilder<MeshLegendre>, GfError> {
        Ok(GfBuilder::new().with_mesh(MeshLegendre::new(n_points)?))
    }
}

impl Gf<MeshIr> {
    /// Wrap expansion coefficients `data[l, row, column]` in the basis they refer to
    ///
    /// The inverse temperature and statistic are taken from the basis.
    pub fn from_basis(
        data: Array3<Complex64>,
        basis: Arc<dyn IrBasis>,
        name: impl Into<String>,
    ) -> Result<Self, GfError> {
        GfBuilder::new()
            .with_beta(basis.beta())
            .with_statistic(basis.statistic())
            .with_mesh(MeshIr::new(basis))
            .with_data(data)
            .with_name(name)
            .build()
    }

    /// The basis the coefficients refer to
    pub fn basis(&self) -> &Arc<dyn IrBasis> {
        self.mesh.basis()
    }
}

#[cfg(test)]
mod test {
    use super::inverse;
    use crate::{
        affine::{i_omega_n, AffineOperator},
        greens_functions::{Gf, GfBuilder, GfImFreq, GfReFreq},
        GfError,
    };
    use approx::assert_relative_eq;
    use dmft_mesher::{Mesh, MeshImFreq, MeshReFreq, Statistic};
    use ndarray::{array, Array3};
    use num_complex::Complex64;

    fn resolvent(n_points: usize) -> GfImFreq {
        let hamiltonian = array![
            [Complex64::new(0.3, 0.), Complex64::new(0.2, 0.1)],
            [Complex64::new(0.2, -0.1), Complex64::new(-0.4, 0.)]
        ];
        let mut g: GfImFreq = GfBuilder::new()
            .with_mesh(MeshImFreq::new(8., Statistic::Fermion, n_points).unwrap())
            .with_indices(["up", "down"])
            .build()
            .unwrap();
        g.set_from(&i_omega_n().sub_matrix(hamiltonian.view()).unwrap().inverse())
            .unwrap();
        g
    }

    #[test]
    fn double_inversion_recovers_the_data() {
        let g = resolvent(16);
        let twice = g.inverse().unwrap().inverse().unwrap();
        for (x, y) in twice.data().iter().zip(g.data().iter()) {
            assert_relative_eq!(x.re, y.re, epsilon = 1e-12);
            assert_relative_eq!(x.im, y.im, epsilon = 1e-12);
        }
        assert_eq!(twice.indices(), g.indices());
    }

    #[test]
    fn inverse_times_original_is_the_identity() {
        let g = resolvent(4);
        let inverse = inverse(&g).unwrap();
        for (a, b) in g.data().outer_iter().zip(inverse.data().outer_iter()) {
            let product = a.dot(&b);
            for ((i, j), value) in product.indexed_iter() {
                let expected = if i == j { 1. } else { 0. };
                assert_relative_eq!(value.re, expected, epsilon = 1e-12);
                assert_relative_eq!(value.im, 0., epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn real_frequency_resolvent_has_a_pole_structure() {
        let mesh = MeshReFreq::new(-1., 1., 5).unwrap();
        let mut g: GfReFreq = GfBuilder::new()
            .with_mesh(mesh)
            .with_indices(["0"])
            .build()
            .unwrap();
        let broadening = Complex64::new(0., 0.1);
        g.set_from(&i_omega_n().add_scalar(broadening).unwrap().inverse())
            .unwrap();
        for (omega, value) in g.mesh().points().zip(g.data().iter()) {
            let expected = Complex64::new(1., 0.) / (Complex64::new(omega, 0.) + broadening);
            assert_relative_eq!(value.re, expected.re, epsilon = 1e-12);
            assert_relative_eq!(value.im, expected.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn singular_points_propagate_as_errors() {
        let mut g: Gf<MeshImFreq> = GfBuilder::new()
            .with_beta(1.)
            .with_data(Array3::zeros((2, 1, 1)))
            .build()
            .unwrap();
        assert!(matches!(
            g.inverse(),
            Err(GfError::SingularMatrix { mesh_index: 0 })
        ));
        g.set_from(&AffineOperator::new(1., 0.)).unwrap();
        assert!(g.inverse().is_ok());
    }
}
