// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::{DefaultMesh, Mesh, MeshError, Statistic};
use serde::{Deserialize, Serialize};

/// Legendre coefficient mesh, the points are the polynomial orders `0..n_points`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshLegendre {
    orders: Vec<f64>,
}

impl MeshLegendre {
    pub fn new(n_points: usize) -> Result<Self, MeshError> {
        if n_points == 0 {
            return Err(MeshError::Empty("Legendre mesh"));
        }
        Ok(Self {
            orders: (0..n_points).map(|l| l as f64).collect(),
        })
    }
}

impl Mesh for MeshLegendre {
    const FORMAT: &'static str = "MeshLegendre";

    fn x_values(&self) -> &[f64] {
        &self.orders
    }
}

impl DefaultMesh for MeshLegendre {
    fn from_n_points(_: Option<f64>, _: Statistic, n_points: usize) -> Result<Self, MeshError> {
        Self::new(n_points)
    }
}

#[cfg(test)]
mod test {
    use super::MeshLegendre;
    use crate::Mesh;

    #[test]
    fn legendre_orders_count_from_zero() {
        let mesh = MeshLegendre::new(4).unwrap();
        assert_eq!(mesh.points().collect::<Vec<_>>(), vec![0., 1., 2., 3.]);
        assert!(mesh.beta().is_none());
        assert!(MeshLegendre::new(0).is_err());
    }
}
