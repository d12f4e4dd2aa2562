// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::{ArchiveError, ArchiveGroup, ArchiveRead, ArchiveValue, ArchiveWrite, FixedWidthStrings, FORMAT_ATTRIBUTE};
use crate::{
    greens_functions::{Gf, GfBuilder},
    indices::GfIndices,
};
use dmft_mesher::{
    DefaultMesh, Mesh, MeshImFreq, MeshImTime, MeshIr, MeshLegendre, MeshReFreq, Statistic,
};

fn create_tagged<'a>(group: &'a mut ArchiveGroup, key: &str, format: &str) -> &'a mut ArchiveGroup {
    let child = group.create_group(key);
    child.set_attribute(FORMAT_ATTRIBUTE, format);
    child
}

fn check_format(key: &str, group: &ArchiveGroup, expected: &'static str) -> Result<(), ArchiveError> {
    if group.format()? != expected {
        return Err(ArchiveError::WrongKind {
            key: key.to_string(),
            expected,
        });
    }
    Ok(())
}

fn size(group: &ArchiveGroup) -> Result<usize, ArchiveError> {
    let size = group.integer("size")?;
    usize::try_from(size).map_err(|_| ArchiveError::WrongKind {
        key: "size".into(),
        expected: "non-negative integer",
    })
}

fn write_domain<M: Mesh>(group: &mut ArchiveGroup, mesh: &M) {
    let domain = group.create_group("domain");
    if let Some(beta) = mesh.beta() {
        domain.insert_leaf("beta", ArchiveValue::Real(beta));
    }
    if let Some(statistic) = mesh.statistic() {
        domain.insert_leaf("statistic", ArchiveValue::Text(statistic.as_tag().to_string()));
    }
}

fn statistic(group: &ArchiveGroup) -> Result<Statistic, ArchiveError> {
    let tag = group.text("statistic")?;
    Statistic::from_tag(&tag).ok_or(ArchiveError::WrongKind {
        key: "statistic".into(),
        expected: "statistic tag",
    })
}

fn read_domain(group: &ArchiveGroup) -> Result<(f64, Statistic), ArchiveError> {
    let domain = group.group("domain")?;
    Ok((domain.real("beta")?, statistic(domain)?))
}

impl ArchiveWrite for GfIndices {
    const FORMAT: &'static str = "GfIndices";

    fn write_archive(&self, group: &mut ArchiveGroup, key: &str) -> Result<(), ArchiveError> {
        let child = create_tagged(group, key, Self::FORMAT);
        child.insert_leaf("left", ArchiveValue::Strings(FixedWidthStrings::from_strings(self.left())));
        child.insert_leaf("right", ArchiveValue::Strings(FixedWidthStrings::from_strings(self.right())));
        Ok(())
    }
}

impl ArchiveRead for GfIndices {
    fn reconstruct(key: &str, group: &ArchiveGroup) -> Result<Self, ArchiveError> {
        check_format(key, group, Self::FORMAT)?;
        let left = group.strings("left")?.to_strings()?;
        let right = group.strings("right")?.to_strings()?;
        Ok(GfIndices::new(left, right))
    }
}

impl ArchiveWrite for MeshImFreq {
    const FORMAT: &'static str = <Self as Mesh>::FORMAT;

    fn write_archive(&self, group: &mut ArchiveGroup, key: &str) -> Result<(), ArchiveError> {
        let child = create_tagged(group, key, <Self as ArchiveWrite>::FORMAT);
        child.insert_leaf("positive_freq_only", ArchiveValue::Boolean(false));
        child.insert_leaf("size", ArchiveValue::Integer(self.size() as i64));
        write_domain(child, self);
        Ok(())
    }
}

impl ArchiveRead for MeshImFreq {
    fn reconstruct(key: &str, group: &ArchiveGroup) -> Result<Self, ArchiveError> {
        check_format(key, group, <Self as ArchiveWrite>::FORMAT)?;
        let size = size(group)?;
        let n_points = if group.boolean("positive_freq_only")? {
            size
        } else {
            size / 2
        };
        let (beta, statistic) = read_domain(group)?;
        Ok(MeshImFreq::new(beta, statistic, n_points)?)
    }
}

impl ArchiveWrite for MeshReFreq {
    const FORMAT: &'static str = <Self as Mesh>::FORMAT;

    fn write_archive(&self, group: &mut ArchiveGroup, key: &str) -> Result<(), ArchiveError> {
        let child = create_tagged(group, key, <Self as ArchiveWrite>::FORMAT);
        child.insert_leaf("size", ArchiveValue::Integer(self.size() as i64));
        child.insert_leaf("min", ArchiveValue::Real(self.omega_min()));
        child.insert_leaf("max", ArchiveValue::Real(self.omega_max()));
        Ok(())
    }
}

impl ArchiveRead for MeshReFreq {
    fn reconstruct(key: &str, group: &ArchiveGroup) -> Result<Self, ArchiveError> {
        check_format(key, group, <Self as ArchiveWrite>::FORMAT)?;
        Ok(MeshReFreq::new(group.real("min")?, group.real("max")?, size(group)?)?)
    }
}

impl ArchiveWrite for MeshImTime {
    const FORMAT: &'static str = <Self as Mesh>::FORMAT;

    fn write_archive(&self, group: &mut ArchiveGroup, key: &str) -> Result<(), ArchiveError> {
        let child = create_tagged(group, key, <Self as ArchiveWrite>::FORMAT);
        child.insert_leaf("size", ArchiveValue::Integer(self.size() as i64));
        write_domain(child, self);
        Ok(())
    }
}

impl ArchiveRead for MeshImTime {
    fn reconstruct(key: &str, group: &ArchiveGroup) -> Result<Self, ArchiveError> {
        check_format(key, group, <Self as ArchiveWrite>::FORMAT)?;
        let (beta, statistic) = read_domain(group)?;
        Ok(MeshImTime::new(beta, statistic, size(group)?)?)
    }
}

impl ArchiveWrite for MeshLegendre {
    const FORMAT: &'static str = <Self as Mesh>::FORMAT;

    fn write_archive(&self, group: &mut ArchiveGroup, key: &str) -> Result<(), ArchiveError> {
        let child = create_tagged(group, key, <Self as ArchiveWrite>::FORMAT);
        child.insert_leaf("size", ArchiveValue::Integer(self.size() as i64));
        Ok(())
    }
}

impl ArchiveRead for MeshLegendre {
    fn reconstruct(key: &str, group: &ArchiveGroup) -> Result<Self, ArchiveError> {
        check_format(key, group, <Self as ArchiveWrite>::FORMAT)?;
        Ok(MeshLegendre::new(size(group)?)?)
    }
}

/// The basis itself is not stored, so the group only records its dimensions
impl ArchiveWrite for MeshIr {
    const FORMAT: &'static str = <Self as Mesh>::FORMAT;

    fn write_archive(&self, group: &mut ArchiveGroup, key: &str) -> Result<(), ArchiveError> {
        let child = create_tagged(group, key, <Self as ArchiveWrite>::FORMAT);
        child.insert_leaf("size", ArchiveValue::Integer(self.size() as i64));
        write_domain(child, self);
        Ok(())
    }
}

impl<M: Mesh + ArchiveWrite> ArchiveWrite for Gf<M> {
    const FORMAT: &'static str = "Gf";

    #[tracing::instrument(name = "Archive write", level = "debug", skip(self, group), fields(name = %self.name()))]
    fn write_archive(&self, group: &mut ArchiveGroup, key: &str) -> Result<(), ArchiveError> {
        let child = create_tagged(group, key, Self::FORMAT);
        child.insert_leaf("data", ArchiveValue::ComplexTensor(self.data().clone()));
        self.mesh().write_archive(child, "mesh")?;
        self.indices().write_archive(child, "indices")?;
        child.insert_leaf("name", ArchiveValue::Text(self.name().to_string()));
        if let Some(beta) = self.beta() {
            child.insert_leaf("beta", ArchiveValue::Real(beta));
        }
        child.insert_leaf(
            "statistic",
            ArchiveValue::Text(self.statistic().as_tag().to_string()),
        );
        Ok(())
    }
}

impl<M: DefaultMesh + ArchiveWrite + ArchiveRead> ArchiveRead for Gf<M> {
    #[tracing::instrument(name = "Archive read", level = "debug", skip(group))]
    fn reconstruct(key: &str, group: &ArchiveGroup) -> Result<Self, ArchiveError> {
        check_format(key, group, Self::FORMAT)?;
        let mesh = M::reconstruct("mesh", group.group("mesh")?)?;
        let indices = GfIndices::reconstruct("indices", group.group("indices")?)?;

        let mut builder = GfBuilder::new()
            .with_data(group.tensor("data")?)
            .with_mesh(mesh)
            .with_indices(indices);
        if group.contains("name") {
            builder = builder.with_name(group.text("name")?);
        }
        if group.contains("statistic") {
            builder = builder.with_statistic(statistic(group)?);
        }
        if group.contains("beta") {
            builder = builder.with_beta(group.real("beta")?);
        }
        Ok(builder.build()?)
    }
}
