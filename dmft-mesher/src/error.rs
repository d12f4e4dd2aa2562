// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

/// Errors raised while constructing a mesh
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("inverse temperature must be finite and positive, got {0}")]
    InvalidBeta(f64),
    #[error("a {0} requires an inverse temperature")]
    MissingBeta(&'static str),
    #[error("a {0} requires at least one point")]
    Empty(&'static str),
    #[error("invalid frequency window [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
    #[error("an imaginary-frequency mesh holds an even number of points, got {0}")]
    OddLength(usize),
    #[error("a {0} cannot be inferred from the data shape and must be supplied explicitly")]
    NotInferable(&'static str),
}
