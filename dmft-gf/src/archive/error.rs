// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::GfError;
use dmft_mesher::MeshError;
use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Failures while writing or reconstructing an archive tree
pub enum ArchiveError {
    /// A child that the reader requires is absent
    #[error("archive entry {0} is missing")]
    #[diagnostic(code(dmft_gf::archive::missing_key))]
    MissingKey(String),
    /// A child exists but holds a different kind of node or leaf
    #[error("archive entry {key} is not a {expected}")]
    #[diagnostic(code(dmft_gf::archive::wrong_kind))]
    WrongKind {
        /// The offending entry
        key: String,
        /// The kind the reader asked for
        expected: &'static str,
    },
    /// The `Format` attribute names no registered type
    #[error("no reader is registered for format {0}")]
    #[diagnostic(code(dmft_gf::archive::unknown_format))]
    UnknownFormat(String),
    /// The type is written but cannot be rebuilt from the archive alone
    #[error("{0} cannot be reconstructed from an archive")]
    #[diagnostic(code(dmft_gf::archive::not_reconstructible))]
    NotReconstructible(&'static str),
    /// A fixed-width string payload is malformed
    #[error("invalid fixed-width string data: {0}")]
    #[diagnostic(code(dmft_gf::archive::invalid_string))]
    InvalidString(String),
    #[error(transparent)]
    /// A mesh stored in the archive has invalid parameters
    Mesh(#[from] MeshError),
    #[error(transparent)]
    /// A container stored in the archive is inconsistent
    Gf(#[from] GfError),
}
