// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! dmft-gf is a data model for single-particle Green's functions in Rust
//!
//! # Overview
//! Quantum many-body solvers built on dynamical mean-field theory exchange Green's functions: complex
//! tensors indexed by a mesh point and two target-space (orbital/spin) indices. This crate provides
//! the container for such tensors, the algebra used to compose them, and the bridges used to move
//! them in and out of a compact basis and a persistent archive. It performs no solver algorithm itself.
//!
//! The main pieces are
//! - [`greens_functions::Gf`], a rank-3 tensor bound to one mesh from [`dmft_mesher`] and one
//!   [`indices::GfIndices`], with assignment, arithmetic and similarity transforms,
//! - [`affine::AffineOperator`], the expression `a0 + a1 z` whose (inverse) evaluation builds
//!   resolvents such as `(i nu - H)^-1`,
//! - [`sampling`], the injected transform from basis coefficients to dense time or frequency data,
//! - [`archive`], the group/leaf/attribute tree consumed by a persistence layer.
//!
//! # Usage
//! The non-interacting propagator of a two-orbital model is
//!
//! ```
//! use dmft_gf::{affine::i_omega_n, greens_functions::{GfBuilder, GfImFreq}};
//! use dmft_mesher::{MeshImFreq, Statistic};
//! use ndarray::array;
//! use num_complex::Complex64;
//!
//! let mesh = MeshImFreq::new(10.0, Statistic::Fermion, 64).unwrap();
//! let mut g0: GfImFreq = GfBuilder::new()
//!     .with_mesh(mesh)
//!     .with_indices(["up", "down"])
//!     .with_beta(10.0)
//!     .build()
//!     .unwrap();
//! let hamiltonian = array![[Complex64::new(0.5, 0.), Complex64::new(0.1, 0.)],
//!                          [Complex64::new(0.1, 0.), Complex64::new(-0.5, 0.)]];
//! let resolvent = i_omega_n().sub_matrix(hamiltonian.view()).unwrap().inverse();
//! g0.set_from(&resolvent).unwrap();
//! ```

#![warn(missing_docs)]
#![allow(clippy::type_complexity)]

/// Affine frequency expressions `a0 + a1 z` and their inverses
pub mod affine;

/// The command line driver, configuration and tracing setup
pub mod app;

/// Serialisation of containers, meshes and indices into a group/leaf/attribute tree
pub mod archive;

/// Named blocks of Green's functions sharing a mesh
pub mod block;

/// Error handling
mod error;

/// The Green's function container and its specializations
pub mod greens_functions;

/// Target-space index labels
pub mod indices;

/// Transforms between compact basis coefficients and dense sampled data
pub mod sampling;

/// Helper functions for dense complex matrices
mod utilities;

pub use error::GfError;
