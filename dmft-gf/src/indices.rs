// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Indices
//!
//! Labels for the two target-space axes of a container. An index set is immutable: a container
//! replaces its labels wholesale and never patches them in place.

use crate::GfError;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// The row (`left`) and column (`right`) labels of a container's target space
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GfIndices {
    left: Vec<String>,
    right: Vec<String>,
}

impl GfIndices {
    /// Build from explicit labels for each axis
    pub fn new<L, R>(left: impl IntoIterator<Item = L>, right: impl IntoIterator<Item = R>) -> Self
    where
        L: ToString,
        R: ToString,
    {
        Self {
            left: left.into_iter().map(|label| label.to_string()).collect(),
            right: right.into_iter().map(|label| label.to_string()).collect(),
        }
    }

    /// Apply a single list of labels to both axes
    pub fn from_flat<S: ToString>(labels: impl IntoIterator<Item = S>) -> Self {
        let left: Vec<String> = labels.into_iter().map(|label| label.to_string()).collect();
        Self {
            right: left.clone(),
            left,
        }
    }

    /// Build from a list holding exactly one label list per axis
    pub fn try_from_nested<S: ToString>(axes: Vec<Vec<S>>) -> Result<Self, GfError> {
        if axes.len() != 2 {
            return Err(GfError::Construction(format!(
                "indices need exactly two axis lists, found {}",
                axes.len()
            )));
        }
        let mut axes = axes.into_iter();
        match (axes.next(), axes.next()) {
            (Some(left), Some(right)) => Ok(Self::new(left, right)),
            _ => unreachable!("length checked above"),
        }
    }

    /// Stringified integer ranges `"0", "1", ...` on each axis
    pub fn with_default(rows: usize, columns: usize) -> Self {
        Self::new(0..rows, 0..columns)
    }

    /// Row labels
    pub fn left(&self) -> &[String] {
        &self.left
    }

    /// Column labels
    pub fn right(&self) -> &[String] {
        &self.right
    }

    /// The label list of axis 0 (`left`) or 1 (`right`)
    pub fn axis(&self, axis: usize) -> Option<&[String]> {
        match axis {
            0 => Some(&self.left),
            1 => Some(&self.right),
            _ => None,
        }
    }

    /// Number of row labels
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Target-space extent implied by the labels
    pub fn shape(&self) -> (usize, usize) {
        (self.left.len(), self.right.len())
    }
}

impl Index<usize> for GfIndices {
    type Output = [String];

    fn index(&self, axis: usize) -> &Self::Output {
        match self.axis(axis) {
            Some(labels) => labels,
            None => panic!("index sets have two axes, axis {axis} requested"),
        }
    }
}

impl<S: ToString> From<Vec<S>> for GfIndices {
    fn from(labels: Vec<S>) -> Self {
        Self::from_flat(labels)
    }
}

impl<S: ToString, const N: usize> From<[S; N]> for GfIndices {
    fn from(labels: [S; N]) -> Self {
        Self::from_flat(labels)
    }
}

#[cfg(test)]
mod test {
    use super::GfIndices;
    use crate::GfError;

    #[test]
    fn flat_labels_are_broadcast_to_both_axes() {
        let indices = GfIndices::from(["eg", "t2g"]);
        assert_eq!(indices.left(), indices.right());
        assert_eq!(&indices[0], &["eg".to_string(), "t2g".to_string()]);
        assert_eq!(indices.len(), 2);
    }

    #[test]
    fn integer_labels_are_stringified() {
        let indices = GfIndices::new(vec![0, 1, 2], vec![5]);
        assert_eq!(indices.left(), &["0", "1", "2"]);
        assert_eq!(indices.right(), &["5"]);
        assert_eq!(indices.shape(), (3, 1));
        assert_eq!(indices, GfIndices::new(0..3, 5..6));
    }

    #[test]
    fn nested_labels_need_exactly_two_axes() {
        let indices = GfIndices::try_from_nested(vec![vec!["a", "b"], vec!["c"]]).unwrap();
        assert_eq!(&indices[1], &["c".to_string()]);
        for axes in [vec![vec!["a"]], vec![vec!["a"], vec!["b"], vec!["c"]]] {
            assert!(matches!(
                GfIndices::try_from_nested(axes),
                Err(GfError::Construction(_))
            ));
        }
    }

    #[test]
    fn default_labels_count_from_zero() {
        let indices = GfIndices::with_default(2, 3);
        assert_eq!(indices.left(), &["0", "1"]);
        assert_eq!(indices.right(), &["0", "1", "2"]);
        assert!(indices.axis(2).is_none());
    }

    #[test]
    #[should_panic]
    fn indexing_past_the_second_axis_panics() {
        let indices = GfIndices::with_default(1, 1);
        let _ = &indices[2];
    }
}
