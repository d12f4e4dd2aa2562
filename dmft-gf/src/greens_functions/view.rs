// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::Gf;
use dmft_mesher::Mesh;
use ndarray::{s, Array1, ArrayView1, ArrayView3};
use num_complex::Complex64;

/// Data returned alongside the mesh axis by [`Gf::x_data_view`]
#[derive(Debug, PartialEq)]
pub enum GfDataView<'a> {
    /// The full `(mesh, rows, columns)` slice
    Tensor(ArrayView3<'a, Complex64>),
    /// A single-entry container collapsed to one value per mesh point
    Series(ArrayView1<'a, Complex64>),
}

impl GfDataView<'_> {
    /// Number of mesh points in the view
    pub fn len(&self) -> usize {
        match self {
            GfDataView::Tensor(view) => view.len_of(ndarray::Axis(0)),
            GfDataView::Series(view) => view.len(),
        }
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M: Mesh> Gf<M> {
    /// The mesh axis and the matching slice of data, for plotting or inspection
    ///
    /// Frequency meshes report the imaginary part of the frequency. A `window` keeps only the points
    /// with `min <= x <= max`; `flatten` collapses a `(1, 1)` target to a one dimensional series.
    pub fn x_data_view(
        &self,
        window: Option<(f64, f64)>,
        flatten: bool,
    ) -> (Array1<f64>, GfDataView<'_>) {
        let x = self.mesh.x_values();
        let (start, end) = match window {
            Some((min, max)) => {
                // mesh values are sorted ascending
                let start = x.partition_point(|&value| value < min);
                let end = x.partition_point(|&value| value <= max).max(start);
                (start, end)
            }
            None => (0, x.len()),
        };
        let axis = Array1::from(x[start..end].to_vec());

        let data = if flatten && self.target_shape() == [1, 1] {
            GfDataView::Series(self.data.slice(s![start..end, 0, 0]))
        } else {
            GfDataView::Tensor(self.data.slice(s![start..end, .., ..]))
        };
        (axis, data)
    }
}

#[cfg(test)]
mod test {
    use super::GfDataView;
    use crate::{
        affine::i_omega_n,
        greens_functions::{GfBuilder, GfImFreq, GfReFreq},
    };
    use dmft_mesher::{MeshImFreq, MeshReFreq, Statistic};
    use std::f64::consts::PI;

    fn matsubara(orbitals: usize) -> GfImFreq {
        let mut g: GfImFreq = GfBuilder::new()
            .with_mesh(MeshImFreq::new(1., Statistic::Fermion, 4).unwrap())
            .with_indices(crate::indices::GfIndices::with_default(orbitals, orbitals))
            .build()
            .unwrap();
        g.set_from(&i_omega_n()).unwrap();
        g
    }

    #[test]
    fn full_view_reports_imaginary_frequencies() {
        let g = matsubara(2);
        let (x, data) = g.x_data_view(None, false);
        assert_eq!(x.len(), 8);
        approx::assert_relative_eq!(x[0], -7. * PI);
        approx::assert_relative_eq!(x[7], 7. * PI);
        match data {
            GfDataView::Tensor(view) => assert_eq!(view.shape(), &[8, 2, 2]),
            GfDataView::Series(_) => panic!("a 2x2 target cannot be flattened"),
        }
    }

    #[test]
    fn window_keeps_the_points_inside_the_bounds() {
        let g = matsubara(1);
        let (x, data) = g.x_data_view(Some((-PI * 3.5, PI * 4.)), true);
        assert_eq!(x.to_vec().len(), 4);
        approx::assert_relative_eq!(x[0], -3. * PI);
        approx::assert_relative_eq!(x[3], 3. * PI);
        match data {
            GfDataView::Series(series) => {
                assert_eq!(series.len(), 4);
                for (value, nu) in series.iter().zip(x.iter()) {
                    approx::assert_relative_eq!(value.im, *nu);
                }
            }
            GfDataView::Tensor(_) => panic!("a 1x1 target should flatten"),
        }
    }

    #[test]
    fn disjoint_windows_yield_empty_views() {
        let g: GfReFreq = GfBuilder::new()
            .with_mesh(MeshReFreq::new(-1., 1., 11).unwrap())
            .with_indices(["0"])
            .build()
            .unwrap();
        let (x, data) = g.x_data_view(Some((2., 3.)), false);
        assert!(x.is_empty());
        assert!(data.is_empty());
        let (_, data) = g.x_data_view(Some((1., -1.)), false);
        assert!(data.is_empty());
    }
}
