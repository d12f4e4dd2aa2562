// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Green's functions
//!
//! [`Gf`] owns a complex tensor `data[mesh_index, row, column]` bound to one mesh and one
//! [`GfIndices`]. The leading extent always equals the mesh size and the trailing extents always
//! equal the number of row and column labels; every constructor and mutator preserves this.
//!
//! The specializations fix the mesh type:
//! - [`GfImFreq`] on Matsubara frequencies, with per-point inversion and assignment from an IR basis,
//! - [`GfImTime`] on imaginary times, with assignment from an IR basis,
//! - [`GfReFreq`] on a real-frequency grid,
//! - [`GfLegendre`] and [`GfIr`] holding expansion coefficients.

mod arithmetic;
mod builder;
mod operand;
mod specializations;
mod view;

pub use builder::GfBuilder;
pub use operand::Operand;
pub use specializations::{inverse, FrequencyDomain};
pub use view::GfDataView;

use crate::{indices::GfIndices, utilities::invert_matrix, GfError};
use dmft_mesher::{
    Mesh, MeshImFreq, MeshImTime, MeshIr, MeshLegendre, MeshReFreq, Statistic,
};
use ndarray::{s, Array3, ArrayView2, Axis};
use num_complex::Complex64;

/// Green's function on Matsubara frequencies
pub type GfImFreq = Gf<MeshImFreq>;
/// Green's function on imaginary times
pub type GfImTime = Gf<MeshImTime>;
/// Green's function on real frequencies
pub type GfReFreq = Gf<MeshReFreq>;
/// Legendre coefficients of a Green's function
pub type GfLegendre = Gf<MeshLegendre>;
/// Coefficients of a Green's function in an injected compact basis
pub type GfIr = Gf<MeshIr>;

/// A matrix-valued Green's function sampled on a mesh
///
/// Cloning is a full value copy: the tensor and the index labels are allocated afresh, so mutating
/// a clone never affects the source. A mesh wrapping an injected basis shares that basis read-only.
#[derive(Clone, Debug)]
pub struct Gf<M: Mesh> {
    data: Array3<Complex64>,
    mesh: M,
    indices: GfIndices,
    name: String,
    beta: Option<f64>,
    statistic: Statistic,
}

impl<M: Mesh> Gf<M> {
    /// The tensor `data[mesh_index, row, column]`
    pub fn data(&self) -> &Array3<Complex64> {
        &self.data
    }

    /// Mutable access to the tensor values; the shape cannot be changed through this view
    pub fn data_mut(&mut self) -> ndarray::ArrayViewMut3<'_, Complex64> {
        self.data.view_mut()
    }

    /// The mesh over the leading axis
    pub fn mesh(&self) -> &M {
        &self.mesh
    }

    /// Target-space labels
    pub fn indices(&self) -> &GfIndices {
        &self.indices
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the container, the name is only used to label output
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Inverse temperature, if known
    pub fn beta(&self) -> Option<f64> {
        self.beta
    }

    /// Particle statistic
    pub fn statistic(&self) -> Statistic {
        self.statistic
    }

    /// `(mesh size, rows, columns)`
    pub fn shape(&self) -> [usize; 3] {
        let (n, rows, columns) = self.data.dim();
        [n, rows, columns]
    }

    /// `(rows, columns)` of the matrix at each mesh point
    pub fn target_shape(&self) -> [usize; 2] {
        let [_, rows, columns] = self.shape();
        [rows, columns]
    }

    /// Reset every entry to zero, keeping the shape
    pub fn zero(&mut self) {
        self.data.fill(Complex64::new(0., 0.));
    }

    /// An independent value copy of the container
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Matrix transform of the target space, `self[w] = L G[w] R` at every mesh point `w`
    ///
    /// With `L` of shape `(a, c)`, `g` of target shape `(c, d)` and `R` of shape `(d, b)`, `self`
    /// must have target shape `(a, b)` and the same number of mesh points as `g`. All five
    /// relations are checked before `self` is written.
    #[tracing::instrument(name = "L G R transform", level = "trace", skip_all)]
    pub fn from_l_g_r<N: Mesh>(
        &mut self,
        left: ArrayView2<'_, Complex64>,
        g: &Gf<N>,
        right: ArrayView2<'_, Complex64>,
    ) -> Result<(), GfError> {
        let [n_self, a, b] = self.shape();
        let [n_g, c, d] = g.shape();
        let checks = [
            ("L", "self", left.nrows(), a),
            ("L", "G", left.ncols(), c),
            ("G", "R", d, right.nrows()),
            ("R", "self", right.ncols(), b),
            ("G", "self", n_g, n_self),
        ];
        if let Some(&(left, right, left_dim, right_dim)) = checks
            .iter()
            .find(|(_, _, left_dim, right_dim)| left_dim != right_dim)
        {
            return Err(GfError::DimensionMismatch {
                left,
                right,
                left_dim,
                right_dim,
            });
        }

        for (mut target, source) in self
            .data
            .axis_iter_mut(Axis(0))
            .zip(g.data.axis_iter(Axis(0)))
        {
            target.assign(&left.dot(&source).dot(&right));
        }
        Ok(())
    }

    /// Replace the matrix at every mesh point by its inverse
    ///
    /// All points are inverted into scratch storage first, so a singular point leaves `self` unchanged.
    pub(crate) fn invert_in_place(&mut self) -> Result<(), GfError> {
        let [n, rows, columns] = self.shape();
        if rows != columns {
            return Err(GfError::shape(&[n, rows, rows], &[n, rows, columns]));
        }
        let mut inverted = Array3::zeros(self.data.raw_dim());
        for (mesh_index, matrix) in self.data.axis_iter(Axis(0)).enumerate() {
            let inverse =
                invert_matrix(matrix).ok_or(GfError::SingularMatrix { mesh_index })?;
            inverted.slice_mut(s![mesh_index, .., ..]).assign(&inverse);
        }
        self.data = inverted;
        Ok(())
    }
}
