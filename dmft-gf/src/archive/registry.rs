// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::{ArchiveError, ArchiveGroup, ArchiveRead};
use crate::{
    greens_functions::{Gf, GfImFreq, GfImTime, GfLegendre, GfReFreq},
    indices::GfIndices,
};
use dmft_mesher::{MeshImFreq, MeshImTime, MeshLegendre, MeshReFreq};
use std::{collections::HashMap, sync::LazyLock};

/// Any object that can be rebuilt from an archive group
#[derive(Clone, Debug)]
pub enum ArchiveObject {
    /// A `GfIndices` group
    Indices(GfIndices),
    /// A `MeshImFreq` group
    MeshImFreq(MeshImFreq),
    /// A `MeshReFreq` group
    MeshReFreq(MeshReFreq),
    /// A `MeshImTime` group
    MeshImTime(MeshImTime),
    /// A `MeshLegendre` group
    MeshLegendre(MeshLegendre),
    /// A `Gf` group over a Matsubara mesh
    GfImFreq(GfImFreq),
    /// A `Gf` group over a real-frequency mesh
    GfReFreq(GfReFreq),
    /// A `Gf` group over an imaginary-time mesh
    GfImTime(GfImTime),
    /// A `Gf` group over Legendre coefficients
    GfLegendre(GfLegendre),
}

type Factory = fn(&str, &ArchiveGroup) -> Result<ArchiveObject, ArchiveError>;

/// Readers keyed by `Format` tag, fixed at compile time and built on first use
static REGISTRY: LazyLock<HashMap<&'static str, Factory>> = LazyLock::new(|| {
    let factories: [(&'static str, Factory); 6] = [
        ("GfIndices", |key, group| {
            GfIndices::reconstruct(key, group).map(ArchiveObject::Indices)
        }),
        ("MeshImFreq", |key, group| {
            MeshImFreq::reconstruct(key, group).map(ArchiveObject::MeshImFreq)
        }),
        ("MeshReFreq", |key, group| {
            MeshReFreq::reconstruct(key, group).map(ArchiveObject::MeshReFreq)
        }),
        ("MeshImTime", |key, group| {
            MeshImTime::reconstruct(key, group).map(ArchiveObject::MeshImTime)
        }),
        ("MeshLegendre", |key, group| {
            MeshLegendre::reconstruct(key, group).map(ArchiveObject::MeshLegendre)
        }),
        ("Gf", read_gf),
    ];
    factories.into_iter().collect()
});

/// Containers share one tag, the concrete type follows from the tag of their mesh
fn read_gf(key: &str, group: &ArchiveGroup) -> Result<ArchiveObject, ArchiveError> {
    match group.group("mesh")?.format()? {
        "MeshImFreq" => Gf::<MeshImFreq>::reconstruct(key, group).map(ArchiveObject::GfImFreq),
        "MeshReFreq" => Gf::<MeshReFreq>::reconstruct(key, group).map(ArchiveObject::GfReFreq),
        "MeshImTime" => Gf::<MeshImTime>::reconstruct(key, group).map(ArchiveObject::GfImTime),
        "MeshLegendre" => {
            Gf::<MeshLegendre>::reconstruct(key, group).map(ArchiveObject::GfLegendre)
        }
        "MeshIR" => Err(ArchiveError::NotReconstructible(
            "a Green's function on an injected basis",
        )),
        other => Err(ArchiveError::UnknownFormat(other.to_string())),
    }
}

/// The `Format` tags [`read_archive`] can dispatch on
pub fn registered_formats() -> impl Iterator<Item = &'static str> {
    REGISTRY.keys().copied()
}

/// Rebuild the object stored under `key` in `group` from its `Format` tag
pub fn read_archive(group: &ArchiveGroup, key: &str) -> Result<ArchiveObject, ArchiveError> {
    let child = group.group(key)?;
    let format = child.format()?;
    tracing::debug!("Reading {key} with format {format}");
    let factory = REGISTRY
        .get(format)
        .ok_or_else(|| ArchiveError::UnknownFormat(format.to_string()))?;
    factory(key, child)
}
