// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::{validate_beta, DefaultMesh, Mesh, MeshError, Statistic};
use serde::{Deserialize, Serialize};

/// Uniform imaginary-time mesh on `[0, beta]`, both ends included
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshImTime {
    beta: f64,
    statistic: Statistic,
    points: Vec<f64>,
}

impl MeshImTime {
    pub fn new(beta: f64, statistic: Statistic, n_points: usize) -> Result<Self, MeshError> {
        let beta = validate_beta(beta)?;
        if n_points == 0 {
            return Err(MeshError::Empty("imaginary-time mesh"));
        }
        let points = match n_points {
            1 => vec![0_f64],
            _ => (0..n_points)
                .map(|i| beta * i as f64 / (n_points - 1) as f64)
                .collect(),
        };
        Ok(Self {
            beta,
            statistic,
            points,
        })
    }
}

impl Mesh for MeshImTime {
    const FORMAT: &'static str = "MeshImTime";

    fn x_values(&self) -> &[f64] {
        &self.points
    }

    fn beta(&self) -> Option<f64> {
        Some(self.beta)
    }

    fn statistic(&self) -> Option<Statistic> {
        Some(self.statistic)
    }
}

impl DefaultMesh for MeshImTime {
    fn from_n_points(
        beta: Option<f64>,
        statistic: Statistic,
        n_points: usize,
    ) -> Result<Self, MeshError> {
        let beta = beta.ok_or(MeshError::MissingBeta("imaginary-time mesh"))?;
        Self::new(beta, statistic, n_points)
    }
}

#[cfg(test)]
mod test {
    use super::MeshImTime;
    use crate::{DefaultMesh, Mesh, Statistic};
    use approx::assert_relative_eq;

    #[test]
    fn times_span_zero_to_beta() {
        let mesh = MeshImTime::new(4., Statistic::Fermion, 5).unwrap();
        assert_eq!(mesh.x_values(), &[0., 1., 2., 3., 4.]);
        assert!(mesh.frequencies().is_none());
    }

    #[test]
    fn leading_dimension_is_the_number_of_times() {
        let mesh =
            MeshImTime::infer_from_leading_dimension(Some(2.), Statistic::Boson, 11).unwrap();
        assert_eq!(mesh.size(), 11);
        assert_relative_eq!(*mesh.x_values().last().unwrap(), 2.);
        assert_eq!(mesh.statistic(), Some(Statistic::Boson));
    }
}
