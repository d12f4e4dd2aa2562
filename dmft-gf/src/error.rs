// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! The error type for container construction, assignment and arithmetic

use crate::sampling::SamplingError;
use dmft_mesher::{MeshError, Statistic};
use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Errors raised by the container layer
///
/// Every multi-step operation validates its operands before the first write, so an error leaves the
/// receiving container untouched.
pub enum GfError {
    /// Contradictory or insufficient constructor arguments
    #[error("failed to construct Green's function: {0}")]
    #[diagnostic(code(dmft_gf::construction))]
    Construction(String),
    /// Tensor rank or extent mismatch in assignment or arithmetic
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    #[diagnostic(code(dmft_gf::shape))]
    Shape {
        /// The shape required by the receiving operation
        expected: Vec<usize>,
        /// The shape that was supplied
        found: Vec<usize>,
    },
    /// Named dimensions disagree in a matrix similarity transform
    #[error("dimensions of {left} and {right} are not compatible: {left_dim} != {right_dim}")]
    #[diagnostic(code(dmft_gf::dimension_mismatch))]
    DimensionMismatch {
        /// The operand on the left of the failing comparison
        left: &'static str,
        /// The operand on the right of the failing comparison
        right: &'static str,
        /// The extent contributed by `left`
        left_dim: usize,
        /// The extent contributed by `right`
        right_dim: usize,
    },
    /// The right-hand side kind is not accepted by the operation
    #[error("unsupported operand: {0}")]
    #[diagnostic(code(dmft_gf::unsupported_operand))]
    UnsupportedOperand(String),
    /// A per-point matrix inversion failed
    #[error("the target-space matrix at mesh point {mesh_index} is singular")]
    #[diagnostic(code(dmft_gf::singular))]
    SingularMatrix {
        /// Position in the mesh of the singular matrix
        mesh_index: usize,
    },
    /// Two domains disagree on their inverse temperature or statistic
    #[error("{quantity} mismatch: expected {expected}, found {found}")]
    #[diagnostic(code(dmft_gf::domain_mismatch))]
    DomainMismatch {
        /// Either `beta` or `statistic`
        quantity: &'static str,
        /// The value carried by the receiving container or its mesh
        expected: String,
        /// The value that was supplied
        found: String,
    },
    /// A block name that is not part of a block container
    #[error("no block named {0}")]
    #[diagnostic(code(dmft_gf::unknown_block))]
    UnknownBlock(String),
    /// A reordering that does not visit every target index exactly once
    #[error("{0:?} is not a permutation of the target indices")]
    #[diagnostic(code(dmft_gf::permutation))]
    InvalidPermutation(Vec<usize>),
    #[error(transparent)]
    /// Mesh construction failed outside of the container constructor
    Mesh(#[from] MeshError),
    #[error(transparent)]
    /// The injected sampling transform failed
    Sampling(#[from] SamplingError),
}

impl GfError {
    pub(crate) fn shape(expected: &[usize], found: &[usize]) -> Self {
        GfError::Shape {
            expected: expected.to_vec(),
            found: found.to_vec(),
        }
    }

    /// Fails unless both domains carry the same inverse temperature and statistic
    ///
    /// A quantity missing on either side is not compared.
    pub(crate) fn check_domain(
        expected: (Option<f64>, Option<Statistic>),
        found: (Option<f64>, Option<Statistic>),
    ) -> Result<(), Self> {
        if let (Some(expected), Some(found)) = (expected.0, found.0) {
            if !approx::relative_eq!(expected, found) {
                return Err(GfError::DomainMismatch {
                    quantity: "beta",
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
        }
        if let (Some(expected), Some(found)) = (expected.1, found.1) {
            if expected != found {
                return Err(GfError::DomainMismatch {
                    quantity: "statistic",
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
        }
        Ok(())
    }
}
