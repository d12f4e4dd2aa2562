// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Discretisation domains for single-particle Green's functions
//!
//! A mesh is an ordered, immutable sequence of points on which a Green's function is sampled.
//! The point sequence is computed once on construction and never mutated afterwards.
//! All meshes implement [`Mesh`], which exposes the number of points, a restartable iterator
//! over the x-axis values and, for frequency meshes, the complex frequency variable `z`.

mod error;
mod frequency;
mod ir;
mod legendre;
mod statistic;
mod time;

pub use error::MeshError;
pub use frequency::{MeshImFreq, MeshReFreq};
pub use ir::{IrBasis, MeshIr};
pub use legendre::MeshLegendre;
pub use statistic::Statistic;
pub use time::MeshImTime;

use nalgebra::Complex;

/// Common behaviour of every discretisation domain
pub trait Mesh: Clone + std::fmt::Debug + Send + Sync {
    /// The discriminator written to the `Format` attribute of an archived mesh
    const FORMAT: &'static str;

    /// The x-axis value of every point, in mesh order
    fn x_values(&self) -> &[f64];

    /// The number of points in the mesh
    fn size(&self) -> usize {
        self.x_values().len()
    }

    /// A finite iterator over the x-axis values. Calling it again restarts the sequence.
    fn points(&self) -> std::iter::Copied<std::slice::Iter<'_, f64>> {
        self.x_values().iter().copied()
    }

    /// The complex frequency variable `z` at every point, if this is a frequency mesh
    fn frequencies(&self) -> Option<Vec<Complex<f64>>> {
        None
    }

    /// The inverse temperature of the domain, when the domain carries one
    fn beta(&self) -> Option<f64> {
        None
    }

    /// The statistic of the domain, when the domain carries one
    fn statistic(&self) -> Option<Statistic> {
        None
    }
}

/// Meshes which can be built from scalar domain parameters alone
///
/// Used by the container constructor when no explicit mesh is supplied.
pub trait DefaultMesh: Mesh + Sized {
    /// Build the mesh from the number of points requested by the caller
    fn from_n_points(
        beta: Option<f64>,
        statistic: Statistic,
        n_points: usize,
    ) -> Result<Self, MeshError>;

    /// Build the mesh matching a data tensor whose leading dimension is `leading_dimension`
    fn infer_from_leading_dimension(
        beta: Option<f64>,
        statistic: Statistic,
        leading_dimension: usize,
    ) -> Result<Self, MeshError> {
        Self::from_n_points(beta, statistic, leading_dimension)
    }
}

pub(crate) fn validate_beta(beta: f64) -> Result<f64, MeshError> {
    if beta.is_finite() && beta > 0_f64 {
        Ok(beta)
    } else {
        Err(MeshError::InvalidBeta(beta))
    }
}
