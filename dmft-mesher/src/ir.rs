// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Mesh over the coefficients of a compact (intermediate representation) basis

use crate::{DefaultMesh, Mesh, MeshError, Statistic};
use nalgebra::{Complex, DMatrix};
use std::fmt;
use std::sync::Arc;

/// A compact basis supplied by the caller
///
/// The basis is an external collaborator: this crate only needs its size, its domain and the values
/// of its basis functions at requested sampling points.
pub trait IrBasis: fmt::Debug + Send + Sync {
    /// Number of basis functions
    fn size(&self) -> usize;
    fn beta(&self) -> f64;
    fn statistic(&self) -> Statistic;
    /// Matrix `u[(p, l)] = u_l(tau_p)` for imaginary times `tau`
    fn evaluate_tau(&self, tau: &[f64]) -> DMatrix<f64>;
    /// Matrix `u[(p, l)] = u_l(i nu_p)`, with `nu_p = n_p pi / beta` for Matsubara indices `n_p`
    fn evaluate_matsubara(&self, indices: &[i64]) -> DMatrix<Complex<f64>>;
}

/// Mesh whose points are the coefficient indices of an injected basis
///
/// The basis is shared read-only between every container built on this mesh.
#[derive(Clone)]
pub struct MeshIr {
    basis: Arc<dyn IrBasis>,
    orders: Vec<f64>,
}

impl MeshIr {
    pub fn new(basis: Arc<dyn IrBasis>) -> Self {
        let orders = (0..basis.size()).map(|l| l as f64).collect();
        Self { basis, orders }
    }

    pub fn basis(&self) -> &Arc<dyn IrBasis> {
        &self.basis
    }
}

impl fmt::Debug for MeshIr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshIr")
            .field("size", &self.orders.len())
            .field("basis", &self.basis)
            .finish()
    }
}

impl Mesh for MeshIr {
    const FORMAT: &'static str = "MeshIR";

    fn x_values(&self) -> &[f64] {
        &self.orders
    }

    fn beta(&self) -> Option<f64> {
        Some(self.basis.beta())
    }

    fn statistic(&self) -> Option<Statistic> {
        Some(self.basis.statistic())
    }
}

impl DefaultMesh for MeshIr {
    fn from_n_points(_: Option<f64>, _: Statistic, _: usize) -> Result<Self, MeshError> {
        Err(MeshError::NotInferable("IR mesh"))
    }
}

#[cfg(test)]
mod test {
    use super::{IrBasis, MeshIr};
    use crate::{Mesh, Statistic};
    use nalgebra::{Complex, DMatrix};
    use std::sync::Arc;

    #[derive(Debug)]
    struct ConstantBasis;

    impl IrBasis for ConstantBasis {
        fn size(&self) -> usize {
            3
        }
        fn beta(&self) -> f64 {
            7.
        }
        fn statistic(&self) -> Statistic {
            Statistic::Boson
        }
        fn evaluate_tau(&self, tau: &[f64]) -> DMatrix<f64> {
            DMatrix::from_element(tau.len(), 3, 1.)
        }
        fn evaluate_matsubara(&self, indices: &[i64]) -> DMatrix<Complex<f64>> {
            DMatrix::from_element(indices.len(), 3, Complex::new(1., 0.))
        }
    }

    #[test]
    fn ir_mesh_takes_its_domain_from_the_basis() {
        let basis: Arc<dyn IrBasis> = Arc::new(ConstantBasis);
        let mesh = MeshIr::new(Arc::clone(&basis));
        assert_eq!(mesh.size(), 3);
        assert_eq!(mesh.beta(), Some(7.));
        assert_eq!(mesh.statistic(), Some(Statistic::Boson));
        let shared = mesh.clone();
        assert!(Arc::ptr_eq(shared.basis(), &basis));
    }
}
