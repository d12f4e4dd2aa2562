// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::SamplingError;
use dmft_mesher::{IrBasis, Statistic};
use nalgebra::DMatrix;
use num_complex::Complex64;
use std::f64::consts::PI;

/// A discrete Lehmann basis with one function per real-frequency pole `omega_l`
///
/// In frequency `u_l(i nu) = 1 / (i nu - omega_l)`. In imaginary time
/// - `u_l(tau) = -exp(-tau omega_l) / (1 + exp(-beta omega_l))` for fermions,
/// - `u_l(tau) = exp(-tau omega_l) / (1 - exp(-beta omega_l))` for bosons.
///
/// A Green's function with spectral weight `g_l` at each pole then has these coefficients.
#[derive(Clone, Debug, PartialEq)]
pub struct PoleBasis {
    beta: f64,
    statistic: Statistic,
    poles: Vec<f64>,
}

impl PoleBasis {
    /// A basis of single poles at the real frequencies `poles`
    pub fn new(beta: f64, statistic: Statistic, poles: Vec<f64>) -> Result<Self, SamplingError> {
        if !beta.is_finite() || beta <= 0_f64 {
            return Err(SamplingError::InvalidBasis(format!(
                "beta must be positive and finite, got {beta}"
            )));
        }
        if poles.is_empty() {
            return Err(SamplingError::InvalidBasis("a basis needs at least one pole".into()));
        }
        if let Some(pole) = poles.iter().find(|pole| !pole.is_finite()) {
            return Err(SamplingError::InvalidBasis(format!("pole {pole} is not finite")));
        }
        if statistic == Statistic::Boson && poles.iter().any(|&pole| pole == 0_f64) {
            return Err(SamplingError::InvalidBasis(
                "a bosonic basis cannot have a pole at zero frequency".into(),
            ));
        }
        Ok(Self {
            beta,
            statistic,
            poles,
        })
    }

    /// Pole positions
    pub fn poles(&self) -> &[f64] {
        &self.poles
    }

    fn tau_function(&self, tau: f64, omega: f64) -> f64 {
        let beta = self.beta;
        // Factor out the larger exponential so neither term overflows
        match self.statistic {
            Statistic::Fermion if omega >= 0_f64 => {
                -(-tau * omega).exp() / (1_f64 + (-beta * omega).exp())
            }
            Statistic::Fermion => -((beta - tau) * omega).exp() / (1_f64 + (beta * omega).exp()),
            Statistic::Boson if omega > 0_f64 => {
                (-tau * omega).exp() / -(-beta * omega).exp_m1()
            }
            Statistic::Boson => -((beta - tau) * omega).exp() / -(beta * omega).exp_m1(),
        }
    }
}

impl IrBasis for PoleBasis {
    fn size(&self) -> usize {
        self.poles.len()
    }

    fn beta(&self) -> f64 {
        self.beta
    }

    fn statistic(&self) -> Statistic {
        self.statistic
    }

    fn evaluate_tau(&self, tau: &[f64]) -> DMatrix<f64> {
        DMatrix::from_fn(tau.len(), self.size(), |i, l| {
            self.tau_function(tau[i], self.poles[l])
        })
    }

    fn evaluate_matsubara(&self, indices: &[i64]) -> DMatrix<Complex64> {
        DMatrix::from_fn(indices.len(), self.size(), |i, l| {
            let nu = indices[i] as f64 * PI / self.beta;
            Complex64::new(1_f64, 0_f64) / Complex64::new(-self.poles[l], nu)
        })
    }
}
