// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Real and imaginary frequency meshes

use crate::{validate_beta, DefaultMesh, Mesh, MeshError, Statistic};
use nalgebra::Complex;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Linear grid over the real frequency window `[omega_min, omega_max]`, both ends included
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshReFreq {
    omega_min: f64,
    omega_max: f64,
    points: Vec<f64>,
}

impl MeshReFreq {
    pub fn new(omega_min: f64, omega_max: f64, n_points: usize) -> Result<Self, MeshError> {
        if n_points == 0 {
            return Err(MeshError::Empty("real-frequency mesh"));
        }
        if !(omega_min.is_finite() && omega_max.is_finite()) || omega_min >= omega_max {
            return Err(MeshError::InvalidRange {
                min: omega_min,
                max: omega_max,
            });
        }
        let cell_size = if n_points > 1 {
            (omega_max - omega_min) / (n_points - 1) as f64
        } else {
            0_f64
        };
        let mut points: Vec<f64> = (0..n_points)
            .map(|i| omega_min + i as f64 * cell_size)
            .collect();
        // Pin the upper edge so accumulated rounding never leaves the window
        if n_points > 1 {
            points[n_points - 1] = omega_max;
        }
        Ok(Self {
            omega_min,
            omega_max,
            points,
        })
    }

    pub fn omega_min(&self) -> f64 {
        self.omega_min
    }

    pub fn omega_max(&self) -> f64 {
        self.omega_max
    }
}

impl Mesh for MeshReFreq {
    const FORMAT: &'static str = "MeshReFreq";

    fn x_values(&self) -> &[f64] {
        &self.points
    }

    fn frequencies(&self) -> Option<Vec<Complex<f64>>> {
        Some(self.points.iter().map(|&omega| Complex::new(omega, 0_f64)).collect())
    }
}

impl DefaultMesh for MeshReFreq {
    fn from_n_points(_: Option<f64>, _: Statistic, _: usize) -> Result<Self, MeshError> {
        Err(MeshError::NotInferable("real-frequency mesh"))
    }
}

/// Matsubara frequency mesh
///
/// Holds the signed integers `k` in `[-n, n)`, covering both negative and positive frequencies.
/// Point `k` maps to the Matsubara frequency `nu_k = (2k + zeta) pi / beta`, where `zeta` is 1 for
/// fermions and 0 for bosons.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshImFreq {
    beta: f64,
    statistic: Statistic,
    n_points: usize,
    indices: Vec<i64>,
    values: Vec<f64>,
}

impl MeshImFreq {
    /// Build a mesh with `n_points` non-negative frequencies and as many negative ones
    pub fn new(beta: f64, statistic: Statistic, n_points: usize) -> Result<Self, MeshError> {
        let beta = validate_beta(beta)?;
        if n_points == 0 {
            return Err(MeshError::Empty("imaginary-frequency mesh"));
        }
        let n = n_points as i64;
        let indices: Vec<i64> = (-n..n).collect();
        let values = indices
            .iter()
            .map(|&k| (2 * k + statistic.zeta()) as f64 * PI / beta)
            .collect();
        Ok(Self {
            beta,
            statistic,
            n_points,
            indices,
            values,
        })
    }

    /// Number of non-negative frequencies
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// The signed integers `k` labelling each point
    pub fn matsubara_points(&self) -> &[i64] {
        &self.indices
    }

    /// The full Matsubara index `2k + zeta` of each point
    pub fn matsubara_indices(&self) -> Vec<i64> {
        self.indices
            .iter()
            .map(|&k| 2 * k + self.statistic.zeta())
            .collect()
    }

    /// The positive real number `nu_k` such that the frequency is `i nu_k`
    pub fn matsubara_values(&self) -> &[f64] {
        &self.values
    }

    /// The imaginary frequency `i nu_k` at mesh position `index`
    pub fn frequency_at(&self, index: usize) -> Option<Complex<f64>> {
        self.values.get(index).map(|&nu| Complex::new(0_f64, nu))
    }
}

impl Mesh for MeshImFreq {
    const FORMAT: &'static str = "MeshImFreq";

    fn x_values(&self) -> &[f64] {
        &self.values
    }

    fn frequencies(&self) -> Option<Vec<Complex<f64>>> {
        Some(self.values.iter().map(|&nu| Complex::new(0_f64, nu)).collect())
    }

    fn beta(&self) -> Option<f64> {
        Some(self.beta)
    }

    fn statistic(&self) -> Option<Statistic> {
        Some(self.statistic)
    }
}

impl DefaultMesh for MeshImFreq {
    fn from_n_points(
        beta: Option<f64>,
        statistic: Statistic,
        n_points: usize,
    ) -> Result<Self, MeshError> {
        let beta = beta.ok_or(MeshError::MissingBeta("imaginary-frequency mesh"))?;
        Self::new(beta, statistic, n_points)
    }

    /// The leading dimension counts both signs of frequency, so it must be even
    fn infer_from_leading_dimension(
        beta: Option<f64>,
        statistic: Statistic,
        leading_dimension: usize,
    ) -> Result<Self, MeshError> {
        if leading_dimension % 2 != 0 {
            return Err(MeshError::OddLength(leading_dimension));
        }
        Self::from_n_points(beta, statistic, leading_dimension / 2)
    }
}

#[cfg(test)]
mod test {
    use super::{MeshImFreq, MeshReFreq};
    use crate::{DefaultMesh, Mesh, MeshError, Statistic};
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    #[test]
    fn single_point_fermion_mesh_straddles_zero() {
        let mesh = MeshImFreq::new(10., Statistic::Fermion, 1).unwrap();
        assert_eq!(mesh.size(), 2);
        assert_eq!(mesh.matsubara_points(), &[-1, 0]);
        assert_relative_eq!(mesh.x_values()[0], -PI / 10.);
        assert_relative_eq!(mesh.x_values()[1], PI / 10.);
        assert_eq!(mesh.matsubara_indices(), vec![-1, 1]);
    }

    #[test]
    fn boson_mesh_uses_even_indices() {
        let mesh = MeshImFreq::new(2., Statistic::Boson, 2).unwrap();
        assert_eq!(mesh.matsubara_indices(), vec![-4, -2, 0, 2]);
        assert_relative_eq!(mesh.x_values()[2], 0.);
        assert_relative_eq!(mesh.x_values()[3], 2. * PI / 2.);
    }

    #[test]
    fn iteration_restarts_from_the_first_point() {
        let mesh = MeshImFreq::new(5., Statistic::Fermion, 3).unwrap();
        let first: Vec<f64> = mesh.points().collect();
        let second: Vec<f64> = mesh.points().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), mesh.size());
    }

    #[test]
    fn frequencies_are_purely_imaginary() {
        let mesh = MeshImFreq::new(1., Statistic::Fermion, 4).unwrap();
        for (z, nu) in mesh.frequencies().unwrap().iter().zip(mesh.points()) {
            assert_eq!(z.re, 0.);
            assert_relative_eq!(z.im, nu);
        }
        assert_eq!(mesh.frequency_at(8), None);
    }

    #[test]
    fn invalid_imaginary_frequency_parameters_are_rejected() {
        assert_eq!(
            MeshImFreq::new(-1., Statistic::Fermion, 2),
            Err(MeshError::InvalidBeta(-1.))
        );
        assert!(MeshImFreq::new(1., Statistic::Fermion, 0).is_err());
        assert_eq!(
            MeshImFreq::infer_from_leading_dimension(Some(1.), Statistic::Fermion, 3),
            Err(MeshError::OddLength(3))
        );
        assert_eq!(
            MeshImFreq::from_n_points(None, Statistic::Fermion, 3),
            Err(MeshError::MissingBeta("imaginary-frequency mesh"))
        );
    }

    #[test]
    fn inferred_mesh_halves_the_leading_dimension() {
        let mesh = MeshImFreq::infer_from_leading_dimension(Some(3.), Statistic::Fermion, 8).unwrap();
        assert_eq!(mesh.n_points(), 4);
        assert_eq!(mesh.size(), 8);
    }

    #[test]
    fn real_frequency_grid_includes_both_edges() {
        let mesh = MeshReFreq::new(-2., 2., 5).unwrap();
        assert_eq!(mesh.x_values(), &[-2., -1., 0., 1., 2.]);
        let frequencies = mesh.frequencies().unwrap();
        assert!(frequencies.iter().all(|z| z.im == 0.));
    }

    #[test]
    fn real_frequency_grid_cannot_be_inferred() {
        assert_eq!(
            MeshReFreq::infer_from_leading_dimension(Some(1.), Statistic::Fermion, 10),
            Err(MeshError::NotInferable("real-frequency mesh"))
        );
        assert!(MeshReFreq::new(1., -1., 10).is_err());
        assert_eq!(MeshReFreq::new(-1., 1., 1).unwrap().x_values(), &[-1.]);
    }

    proptest! {
        #[test]
        fn fermion_mesh_maps_every_point_onto_odd_matsubara_frequencies(beta in 0.1f64..500., n_points in 1usize..200) {
            let mesh = MeshImFreq::new(beta, Statistic::Fermion, n_points).unwrap();
            prop_assert_eq!(mesh.size(), 2 * n_points);
            for (&k, nu) in mesh.matsubara_points().iter().zip(mesh.points()) {
                let expected = (2 * k + 1) as f64 * PI / beta;
                prop_assert!((nu - expected).abs() <= 1e-12 * expected.abs().max(1.));
            }
        }
    }
}
