// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Block-diagonal Green's functions
//!
//! Symmetries split the target space into sectors, typically one per spin. A [`BlockGf`] holds one
//! container per sector, all on equal meshes, and can assemble them into a single dense tensor for
//! code that works in the full target space.

use crate::{
    greens_functions::{Gf, GfBuilder},
    indices::GfIndices,
    GfError,
};
use dmft_mesher::{DefaultMesh, Mesh, MeshImFreq, Statistic};
use ndarray::{s, Array3, ArrayView3, Axis};
use num_complex::Complex64;

/// Ordered, named blocks of Green's functions sharing one mesh
#[derive(Clone, Debug)]
pub struct BlockGf<M: Mesh> {
    names: Vec<String>,
    blocks: Vec<Gf<M>>,
}

impl<M: Mesh + PartialEq> BlockGf<M> {
    /// Collect existing containers into blocks, the meshes of all blocks must be equal
    pub fn from_blocks(blocks: Vec<(String, Gf<M>)>) -> Result<Self, GfError> {
        let (names, blocks): (Vec<_>, Vec<_>) = blocks.into_iter().unzip();
        if let Some(first) = blocks.first() {
            if let Some(position) = blocks.iter().position(|block| block.mesh() != first.mesh()) {
                return Err(GfError::Construction(format!(
                    "block {} does not share the mesh of block {}",
                    names[position], names[0]
                )));
            }
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(GfError::Construction(format!("block {name} appears twice")));
            }
        }
        Ok(Self { names, blocks })
    }
}

impl<M: DefaultMesh + PartialEq> BlockGf<M> {
    /// Zero-valued square blocks, one per `(name, labels)` entry of `structure`
    #[tracing::instrument(name = "Block structure", level = "debug", skip_all)]
    pub fn from_structure<S: ToString>(
        structure: &[(S, Vec<S>)],
        mesh: M,
        beta: Option<f64>,
        statistic: Statistic,
    ) -> Result<Self, GfError> {
        let blocks = structure
            .iter()
            .map(|(name, labels)| -> Result<(String, Gf<M>), GfError> {
                let name = name.to_string();
                tracing::trace!("Block {name} with {} orbitals", labels.len());
                let mut builder = GfBuilder::new()
                    .with_mesh(mesh.clone())
                    .with_indices(GfIndices::from_flat(labels.iter().map(ToString::to_string)))
                    .with_statistic(statistic)
                    .with_name(name.clone());
                if let Some(beta) = beta {
                    builder = builder.with_beta(beta);
                }
                Ok((name, builder.build()?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_blocks(blocks)
    }
}

impl<M: Mesh> BlockGf<M> {
    /// Block names in insertion order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The block called `name`
    pub fn get(&self, name: &str) -> Option<&Gf<M>> {
        self.position(name).map(|i| &self.blocks[i])
    }

    /// Mutable access to the block called `name`
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Gf<M>> {
        self.position(name).map(move |i| &mut self.blocks[i])
    }

    /// Like [`BlockGf::get`], but a missing block is an error
    pub fn block(&self, name: &str) -> Result<&Gf<M>, GfError> {
        self.get(name)
            .ok_or_else(|| GfError::UnknownBlock(name.to_string()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Iterate over `(name, block)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Gf<M>)> {
        self.names.iter().map(String::as_str).zip(self.blocks.iter())
    }

    /// Iterate mutably over `(name, block)` pairs
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Gf<M>)> {
        self.names.iter().map(String::as_str).zip(self.blocks.iter_mut())
    }

    /// Total number of rows over all blocks
    pub fn dimension(&self) -> usize {
        self.blocks.iter().map(|block| block.target_shape()[0]).sum()
    }

    /// Assemble the blocks along the diagonal of one `(mesh, n, n)` tensor
    ///
    /// Blocks are placed in order. With a `permutation` `p` the result is reordered so that entry
    /// `(i, j)` is the block-diagonal entry `(p[i], p[j])`, which interleaves spin sectors when
    /// `p = [0, n/2, 1, n/2 + 1, ...]`.
    pub fn to_dense(&self, permutation: Option<&[usize]>) -> Result<Array3<Complex64>, GfError> {
        let n_mesh = self.blocks.first().map_or(0, |block| block.mesh().size());
        let dimension = self.dimension();
        let mut dense = Array3::zeros((n_mesh, dimension, dimension));

        let mut offset = 0;
        for block in self.blocks.iter() {
            let [rows, columns] = block.target_shape();
            if rows != columns {
                return Err(GfError::shape(&[rows, rows], &[rows, columns]));
            }
            dense
                .slice_mut(s![.., offset..offset + rows, offset..offset + rows])
                .assign(block.data());
            offset += rows;
        }

        match permutation {
            None => Ok(dense),
            Some(permutation) => {
                let mut seen = vec![false; dimension];
                let is_permutation = permutation.len() == dimension
                    && permutation
                        .iter()
                        .all(|&p| p < dimension && !std::mem::replace(&mut seen[p], true));
                if !is_permutation {
                    return Err(GfError::InvalidPermutation(permutation.to_vec()));
                }
                Ok(dense
                    .select(Axis(1), permutation)
                    .select(Axis(2), permutation))
            }
        }
    }
}

impl BlockGf<MeshImFreq> {
    /// Fill the diagonals of the blocks from solver output on non-negative frequencies
    ///
    /// `data[block][orbital][n]` holds the value at the `n`-th non-negative Matsubara frequency.
    /// Negative frequencies are set from the conjugate symmetry `G(-i nu) = G(i nu)^*`.
    /// Off-diagonal entries are not touched.
    pub fn assign_diagonal_from_positive_frequencies(
        &mut self,
        data: ArrayView3<'_, Complex64>,
    ) -> Result<(), GfError> {
        let (n_blocks, n_orbitals, n_positive) = data.dim();
        if n_blocks != self.len() {
            return Err(GfError::shape(
                &[self.len(), n_orbitals, n_positive],
                data.shape(),
            ));
        }
        for block in self.blocks.iter() {
            let [n_mesh, rows, columns] = block.shape();
            if n_mesh != 2 * n_positive || rows < n_orbitals || columns < n_orbitals {
                return Err(GfError::shape(
                    &[n_blocks, rows.min(columns), n_mesh / 2],
                    data.shape(),
                ));
            }
        }

        for (block, block_data) in self.blocks.iter_mut().zip(data.outer_iter()) {
            let mut values = block.data_mut();
            for (orbital, series) in block_data.outer_iter().enumerate() {
                for (n, value) in series.iter().enumerate() {
                    values[[n_positive + n, orbital, orbital]] = *value;
                    values[[n_positive - 1 - n, orbital, orbital]] = value.conj();
                }
            }
        }
        Ok(())
    }
}
