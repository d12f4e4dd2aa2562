// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use color_eyre::eyre::{eyre, WrapErr};
use config::{Config, File, FileFormat};
use dmft_mesher::Statistic;
use ndarray::Array2;
use num_complex::Complex64;
use serde::Deserialize;
use std::{env, path::Path};

/// Settings for a run of the driver
#[derive(Debug, Deserialize)]
pub struct Configuration {
    /// The imaginary-frequency mesh
    pub mesh: MeshConfiguration,
    /// The non-interacting model
    pub model: ModelConfiguration,
}

/// Parameters of the Matsubara mesh
#[derive(Debug, Deserialize)]
pub struct MeshConfiguration {
    /// Inverse temperature
    pub beta: f64,
    #[serde(default)]
    /// Defaults to fermions
    pub statistic: Statistic,
    /// Number of non-negative frequencies
    pub n_points: usize,
}

/// A local model given by a real Hamiltonian matrix
#[derive(Debug, Deserialize)]
pub struct ModelConfiguration {
    /// Used to name the resulting Green's function
    pub name: String,
    /// Row-major Hamiltonian
    pub hamiltonian: Vec<Vec<f64>>,
    /// One label per orbital, shared by rows and columns
    pub index_labels: Vec<String>,
}

impl Configuration {
    /// Read `default.toml` from `config_dir`, overlaid by `{RUN_MODE}.toml` when present
    pub fn build(config_dir: &Path) -> color_eyre::Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // The default settings used in the general case
            .add_source(File::with_name(&config_dir.join("default").to_string_lossy()))
            // The override settings which may be set by the user, optional
            .add_source(
                File::with_name(&config_dir.join(&run_mode).to_string_lossy()).required(false),
            )
            .build()
            .wrap_err("Failed to read the configuration")?;

        Self::deserialize_and_validate(s)
    }

    /// Read a configuration from a toml document
    pub fn from_toml_str(document: &str) -> color_eyre::Result<Self> {
        let s = Config::builder()
            .add_source(File::from_str(document, FileFormat::Toml))
            .build()?;
        Self::deserialize_and_validate(s)
    }

    fn deserialize_and_validate(s: Config) -> color_eyre::Result<Self> {
        let configuration: Self = s
            .try_deserialize()
            .map_err(|e| eyre!(format!("Failed to deserialize the config file: {:?}", e)))?;
        configuration.validate()?;
        Ok(configuration)
    }

    fn validate(&self) -> color_eyre::Result<()> {
        let dimension = self.model.hamiltonian.len();
        if dimension == 0 {
            return Err(eyre!("The Hamiltonian must have at least one row"));
        }
        if let Some(row) = self
            .model
            .hamiltonian
            .iter()
            .position(|row| row.len() != dimension)
        {
            return Err(eyre!(
                "The Hamiltonian must be square, row {row} does not have {dimension} entries"
            ));
        }
        if self.model.index_labels.len() != dimension {
            return Err(eyre!(
                "{} index labels were given for a Hamiltonian of dimension {dimension}",
                self.model.index_labels.len()
            ));
        }
        if self.mesh.n_points == 0 {
            return Err(eyre!("The mesh needs at least one frequency"));
        }
        Ok(())
    }

    /// The Hamiltonian as a complex matrix
    pub fn hamiltonian(&self) -> Array2<Complex64> {
        let dimension = self.model.hamiltonian.len();
        Array2::from_shape_fn((dimension, dimension), |(i, j)| {
            Complex64::new(self.model.hamiltonian[i][j], 0_f64)
        })
    }
}

#[cfg(test)]
mod test {
    use super::Configuration;
    use dmft_mesher::Statistic;

    const TWO_ORBITALS: &str = r#"
[mesh]
beta = 10.0
n_points = 32

[model]
name = "G0"
hamiltonian = [[0.5, 0.1], [0.1, -0.5]]
index_labels = ["up", "down"]
"#;

    #[test]
    fn documents_deserialize_with_default_statistic() {
        let configuration = Configuration::from_toml_str(TWO_ORBITALS).unwrap();
        assert_eq!(configuration.mesh.statistic, Statistic::Fermion);
        assert_eq!(configuration.mesh.n_points, 32);
        let hamiltonian = configuration.hamiltonian();
        assert_eq!(hamiltonian.dim(), (2, 2));
        assert_eq!(hamiltonian[[0, 1]].re, 0.1);
    }

    #[test]
    fn ragged_hamiltonians_and_label_mismatches_are_rejected() {
        let ragged = TWO_ORBITALS.replace("[0.1, -0.5]", "[0.1]");
        assert!(Configuration::from_toml_str(&ragged).is_err());
        let labels = TWO_ORBITALS.replace(r#"["up", "down"]"#, r#"["up"]"#);
        assert!(Configuration::from_toml_str(&labels).is_err());
        let empty = TWO_ORBITALS.replace("n_points = 32", "n_points = 0");
        assert!(Configuration::from_toml_str(&empty).is_err());
    }

    #[test]
    fn the_shipped_defaults_are_valid() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../.config");
        let configuration = Configuration::build(&dir).unwrap();
        assert!(configuration.mesh.beta > 0.);
    }
}
