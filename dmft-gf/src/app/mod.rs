// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The command line driver
//!
//! Reads a model from the configuration directory, builds its non-interacting propagator
//! `G0(i nu) = (i nu - H)^-1` on a Matsubara mesh and reports on the result.

mod configuration;
mod telemetry;

pub use configuration::{Configuration, MeshConfiguration, ModelConfiguration};

use crate::{
    affine::i_omega_n,
    archive::{ArchiveGroup, ArchiveWrite},
    greens_functions::{GfBuilder, GfDataView, GfImFreq},
    indices::GfIndices,
    utilities::is_hermitian,
    GfError,
};
use clap::{ArgEnum, Parser};
use dmft_mesher::MeshImFreq;
use itertools::Itertools;
use std::{fmt, path::PathBuf};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// Directory holding `default.toml` and the optional run mode overlay
    #[clap(long, default_value = ".config")]
    config_dir: PathBuf,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    /// Directory for the json log file
    #[clap(long, default_value = ".")]
    log_dir: PathBuf,
    /// Print the archive layout of the result
    #[clap(short, long)]
    archive: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{level}")
    }
}

/// Entry point of the `dmft-gf` binary
pub fn run() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = App::parse();

    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level, &cli.log_dir);
    telemetry::init_subscriber(subscriber)?;

    tracing::info!("Reading configuration from {}", cli.config_dir.display());
    let configuration = Configuration::build(&cli.config_dir)?;

    let g0 = non_interacting_greens_function(&configuration)?;
    summarise(&g0);

    if cli.archive {
        let mut root = ArchiveGroup::new();
        g0.write_archive(&mut root, g0.name())?;
        println!("{root}");
    }
    Ok(())
}

/// The propagator `(i nu - H)^-1` of the configured model on the configured mesh
#[tracing::instrument(name = "Non-interacting Green's function", skip_all, fields(model = %configuration.model.name))]
pub fn non_interacting_greens_function(
    configuration: &Configuration,
) -> Result<GfImFreq, GfError> {
    let hamiltonian = configuration.hamiltonian();
    if !is_hermitian(hamiltonian.view()) {
        tracing::warn!("The Hamiltonian is not hermitian, G0 will not satisfy G(-i nu) = G(i nu)*");
    }

    let mesh = MeshImFreq::new(
        configuration.mesh.beta,
        configuration.mesh.statistic,
        configuration.mesh.n_points,
    )?;
    let labels = &configuration.model.index_labels;
    let mut g0: GfImFreq = GfBuilder::new()
        .with_mesh(mesh)
        .with_indices(GfIndices::new(labels, labels))
        .with_beta(configuration.mesh.beta)
        .with_statistic(configuration.mesh.statistic)
        .with_name(configuration.model.name.as_str())
        .build()?;

    let resolvent = i_omega_n().sub_matrix(hamiltonian.view())?.inverse();
    tracing::debug!("Evaluating the resolvent on {} frequencies", g0.mesh().n_points() * 2);
    g0.set_from(&resolvent)?;
    Ok(g0)
}

fn summarise(g: &GfImFreq) {
    let (frequencies, data) = g.x_data_view(None, false);
    let GfDataView::Tensor(data) = data else {
        return;
    };
    for (position, label) in [(0, "first"), (frequencies.len().saturating_sub(1), "last")] {
        let Some(nu) = frequencies.get(position) else {
            continue;
        };
        let diagonal = data
            .index_axis(ndarray::Axis(0), position)
            .diag()
            .iter()
            .map(|value| format!("{:.4}{:+.4}i", value.re, value.im))
            .join(", ");
        tracing::info!("{} frequency {:.4}: diag G = [{}]", label, nu, diagonal);
    }
}
