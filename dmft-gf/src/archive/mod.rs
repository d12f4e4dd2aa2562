// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Archive
//!
//! Containers, meshes and index sets serialise into an [`ArchiveGroup`] tree of groups, leaves and
//! string attributes, with the layout of a hierarchical data file. Each object writes its own group
//! and tags it with a `Format` attribute; [`read_archive`] looks that tag up in a fixed registry to
//! rebuild the object.
//!
//! A container group holds
//! - `data`, the complex tensor,
//! - `mesh` and `indices`, subgroups written by the mesh and the index set,
//! - `name`, `beta` (when known) and `statistic` as leaves.

mod error;
mod impls;
mod registry;
mod strings;
mod tree;

pub use error::ArchiveError;
pub use registry::{read_archive, registered_formats, ArchiveObject};
pub use strings::FixedWidthStrings;
pub use tree::{ArchiveGroup, ArchiveNode, ArchiveValue, FORMAT_ATTRIBUTE};

/// Types which can write themselves into an archive group
pub trait ArchiveWrite {
    /// The `Format` tag identifying the written group
    const FORMAT: &'static str;

    /// Write `self` as a new subgroup of `group` named `key`, replacing any previous entry
    fn write_archive(&self, group: &mut ArchiveGroup, key: &str) -> Result<(), ArchiveError>;
}

/// Types which can be rebuilt from the group they wrote
pub trait ArchiveRead: Sized {
    /// Rebuild from `group`, the subgroup stored under `key`
    fn reconstruct(key: &str, group: &ArchiveGroup) -> Result<Self, ArchiveError>;
}
