// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Keyword-style construction of [`Gf`]
//!
//! Arguments are resolved with a fixed precedence and fully validated before a container exists:
//! 1. `n_points` builds the default mesh of the specialization; neither data nor a mesh may be given.
//! 2. Without data, the index set fixes the target shape and a zero tensor is allocated.
//! 3. Without a mesh, the default mesh is inferred from the leading dimension of the data.
//! 4. Without indices, the labels default to stringified integer ranges.
//! 5. Without `beta` or a statistic, the values carried by the mesh are used. Explicit values must
//!    agree with the mesh, and the statistic finally defaults to `Fermion`.

use super::Gf;
use crate::{indices::GfIndices, GfError};
use dmft_mesher::{DefaultMesh, MeshError, Statistic};
use ndarray::Array3;
use num_complex::Complex64;

/// Builder for [`Gf`]
#[derive(Clone, Debug)]
pub struct GfBuilder<M> {
    data: Option<Array3<Complex64>>,
    mesh: Option<M>,
    indices: Option<GfIndices>,
    name: String,
    beta: Option<f64>,
    statistic: Option<Statistic>,
    n_points: Option<usize>,
}

impl<M> Default for GfBuilder<M> {
    fn default() -> Self {
        Self {
            data: None,
            mesh: None,
            indices: None,
            name: String::new(),
            beta: None,
            statistic: None,
            n_points: None,
        }
    }
}

impl<M> GfBuilder<M> {
    /// Initialise an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the tensor, its leading dimension runs over the mesh
    pub fn with_data(mut self, data: Array3<Complex64>) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach an explicit mesh, which must hold one point per leading entry of the data
    pub fn with_mesh(mut self, mesh: M) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Attach target-space labels, either a [`GfIndices`] or a flat list applied to both axes
    pub fn with_indices(mut self, indices: impl Into<GfIndices>) -> Self {
        self.indices = Some(indices.into());
        self
    }

    /// Name the container
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Inverse temperature, defaulted from the mesh when absent
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    /// Particle statistic, defaulted from the mesh when absent
    pub fn with_statistic(mut self, statistic: Statistic) -> Self {
        self.statistic = Some(statistic);
        self
    }

    /// Number of points of the default mesh
    ///
    /// Kept for compatibility: prefer passing an explicit mesh. For imaginary frequencies the mesh
    /// holds `2 n_points` frequencies, covering both signs.
    pub fn with_n_points(mut self, n_points: usize) -> Self {
        self.n_points = Some(n_points);
        self
    }
}

fn construction(error: MeshError) -> GfError {
    GfError::Construction(error.to_string())
}

impl<M: DefaultMesh> GfBuilder<M> {
    /// Resolve the arguments into a container
    #[tracing::instrument(name = "Gf builder", level = "debug", skip(self), fields(name = %self.name))]
    pub fn build(self) -> Result<Gf<M>, GfError> {
        let GfBuilder {
            data,
            mesh,
            indices,
            name,
            beta,
            statistic,
            n_points,
        } = self;

        let default_statistic = statistic.unwrap_or_default();
        let mesh = match (n_points, mesh) {
            (Some(_), Some(_)) => {
                return Err(GfError::Construction(
                    "n_points cannot be combined with an explicit mesh".into(),
                ))
            }
            (Some(_), None) if data.is_some() => {
                return Err(GfError::Construction(
                    "n_points cannot be combined with data".into(),
                ))
            }
            (Some(n_points), None) => {
                tracing::trace!("Building the default mesh from {n_points} points");
                Some(M::from_n_points(beta, default_statistic, n_points).map_err(construction)?)
            }
            (None, mesh) => mesh,
        };

        let data = match data {
            Some(data) => data,
            None => {
                let indices = indices.as_ref().ok_or_else(|| {
                    GfError::Construction("either data or indices must be supplied".into())
                })?;
                let mesh = mesh.as_ref().ok_or_else(|| {
                    GfError::Construction(
                        "allocating from indices requires a mesh or n_points".into(),
                    )
                })?;
                tracing::trace!("Allocating a zero tensor from the index set");
                let (rows, columns) = indices.shape();
                Array3::zeros((mesh.size(), rows, columns))
            }
        };
        let (leading_dimension, rows, columns) = data.dim();

        let mesh = match mesh {
            Some(mesh) => mesh,
            None => {
                tracing::trace!("Inferring the mesh from a leading dimension of {leading_dimension}");
                M::infer_from_leading_dimension(beta, default_statistic, leading_dimension)
                    .map_err(construction)?
            }
        };
        if mesh.size() != leading_dimension {
            return Err(GfError::Construction(format!(
                "the mesh holds {} points but the data holds {leading_dimension}",
                mesh.size()
            )));
        }

        GfError::check_domain((mesh.beta(), mesh.statistic()), (beta, statistic)).map_err(
            |error| GfError::Construction(format!("arguments contradict the mesh: {error}")),
        )?;

        let indices = indices.unwrap_or_else(|| GfIndices::with_default(rows, columns));
        if indices.shape() != (rows, columns) {
            return Err(GfError::Construction(format!(
                "indices of shape {:?} do not match a target shape of {:?}",
                indices.shape(),
                (rows, columns)
            )));
        }

        let beta = beta.or_else(|| mesh.beta());
        let statistic = statistic.or_else(|| mesh.statistic()).unwrap_or_default();
        Ok(Gf {
            data,
            beta,
            mesh,
            indices,
            name,
            statistic,
        })
    }
}

#[cfg(test)]
mod test {
    use super::GfBuilder;
    use crate::{
        greens_functions::{GfImFreq, GfImTime, GfLegendre, GfReFreq},
        indices::GfIndices,
        GfError,
    };
    use dmft_mesher::{Mesh, MeshImFreq, MeshReFreq, Statistic};
    use ndarray::Array3;
    use num_complex::Complex64;

    #[test]
    fn n_points_builds_the_default_frequency_mesh() {
        let g: GfImFreq = GfBuilder::new()
            .with_beta(10.)
            .with_n_points(3)
            .with_indices(["a", "b"])
            .build()
            .unwrap();
        assert_eq!(g.shape(), [6, 2, 2]);
        assert_eq!(g.beta(), Some(10.));
        assert!(g.data().iter().all(|&x| x == Complex64::new(0., 0.)));
    }

    #[test]
    fn n_points_is_exclusive_with_data_and_mesh() {
        let with_data: Result<GfImFreq, _> = GfBuilder::new()
            .with_beta(1.)
            .with_n_points(1)
            .with_data(Array3::zeros((2, 1, 1)))
            .build();
        assert!(matches!(with_data, Err(GfError::Construction(_))));

        let with_mesh: Result<GfImFreq, _> = GfBuilder::new()
            .with_n_points(1)
            .with_mesh(MeshImFreq::new(1., Statistic::Fermion, 1).unwrap())
            .with_indices(["0"])
            .build();
        assert!(matches!(with_mesh, Err(GfError::Construction(_))));
    }

    #[test]
    fn data_infers_frequency_and_time_meshes() {
        let g: GfImFreq = GfBuilder::new()
            .with_beta(2.)
            .with_statistic(Statistic::Boson)
            .with_data(Array3::zeros((8, 1, 2)))
            .build()
            .unwrap();
        assert_eq!(g.mesh().n_points(), 4);
        assert_eq!(g.mesh().statistic(), Some(Statistic::Boson));
        assert_eq!(g.indices(), &GfIndices::new(["0"], ["0", "1"]));

        let g: GfImTime = GfBuilder::new()
            .with_beta(2.)
            .with_data(Array3::zeros((7, 1, 1)))
            .build()
            .unwrap();
        assert_eq!(g.mesh().size(), 7);

        let g: GfLegendre = GfBuilder::new()
            .with_data(Array3::zeros((5, 1, 1)))
            .build()
            .unwrap();
        assert_eq!(g.mesh().size(), 5);
        assert_eq!(g.beta(), None);
    }

    #[test]
    fn unresolvable_arguments_fail_to_construct() {
        let nothing: Result<GfImFreq, _> = GfBuilder::new().with_beta(1.).build();
        assert!(matches!(nothing, Err(GfError::Construction(_))));

        let odd: Result<GfImFreq, _> = GfBuilder::new()
            .with_beta(1.)
            .with_data(Array3::zeros((3, 1, 1)))
            .build();
        assert!(matches!(odd, Err(GfError::Construction(_))));

        let no_beta: Result<GfImFreq, _> = GfBuilder::new()
            .with_data(Array3::zeros((2, 1, 1)))
            .build();
        assert!(matches!(no_beta, Err(GfError::Construction(_))));

        let real: Result<GfReFreq, _> = GfBuilder::new()
            .with_data(Array3::zeros((2, 1, 1)))
            .build();
        assert!(matches!(real, Err(GfError::Construction(_))));
    }

    #[test]
    fn inconsistent_shapes_are_rejected() {
        let wrong_labels: Result<GfImFreq, _> = GfBuilder::new()
            .with_beta(1.)
            .with_data(Array3::zeros((2, 2, 2)))
            .with_indices(["only-one"])
            .build();
        assert!(matches!(wrong_labels, Err(GfError::Construction(_))));

        let wrong_mesh: Result<GfReFreq, _> = GfBuilder::new()
            .with_mesh(MeshReFreq::new(-1., 1., 10).unwrap())
            .with_data(Array3::zeros((9, 1, 1)))
            .build();
        assert!(matches!(wrong_mesh, Err(GfError::Construction(_))));
    }

    #[test]
    fn beta_falls_back_to_the_mesh() {
        let g: GfImFreq = GfBuilder::new()
            .with_mesh(MeshImFreq::new(4., Statistic::Fermion, 2).unwrap())
            .with_indices(["x"])
            .with_name("G0")
            .build()
            .unwrap();
        assert_eq!(g.beta(), Some(4.));
        assert_eq!(g.name(), "G0");
    }

    #[test]
    fn statistic_falls_back_to_the_mesh() {
        let g: GfImFreq = GfBuilder::new()
            .with_mesh(MeshImFreq::new(4., Statistic::Boson, 2).unwrap())
            .with_indices(["x"])
            .build()
            .unwrap();
        assert_eq!(g.statistic(), Statistic::Boson);
        assert_eq!(g.beta(), Some(4.));

        let g: GfLegendre = GfBuilder::new()
            .with_data(Array3::zeros((3, 1, 1)))
            .build()
            .unwrap();
        assert_eq!(g.statistic(), Statistic::Fermion);
    }

    #[test]
    fn arguments_contradicting_the_mesh_are_rejected() {
        let mesh = MeshImFreq::new(4., Statistic::Boson, 2).unwrap();
        let wrong_beta: Result<GfImFreq, _> = GfBuilder::new()
            .with_mesh(mesh.clone())
            .with_indices(["x"])
            .with_beta(100.)
            .build();
        assert!(matches!(wrong_beta, Err(GfError::Construction(_))));

        let wrong_statistic: Result<GfImFreq, _> = GfBuilder::new()
            .with_mesh(mesh.clone())
            .with_indices(["x"])
            .with_statistic(Statistic::Fermion)
            .build();
        assert!(matches!(wrong_statistic, Err(GfError::Construction(_))));

        let agreeing: GfImFreq = GfBuilder::new()
            .with_mesh(mesh)
            .with_indices(["x"])
            .with_beta(4.)
            .with_statistic(Statistic::Boson)
            .build()
            .unwrap();
        assert_eq!(agreeing.statistic(), Statistic::Boson);
    }
}
