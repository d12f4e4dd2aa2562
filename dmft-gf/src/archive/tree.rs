// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::{ArchiveError, FixedWidthStrings};
use ndarray::Array3;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// The attribute naming the type stored in a group
pub const FORMAT_ATTRIBUTE: &str = "Format";

/// A terminal value in the archive tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ArchiveValue {
    /// Container data
    ComplexTensor(Array3<Complex64>),
    /// A real scalar
    Real(f64),
    /// An integer scalar
    Integer(i64),
    /// A flag
    Boolean(bool),
    /// A single string
    Text(String),
    /// Labels encoded at a uniform width
    Strings(FixedWidthStrings),
}

/// A child of a group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ArchiveNode {
    /// A nested group
    Group(ArchiveGroup),
    /// A value
    Leaf(ArchiveValue),
}

/// A group of named children carrying string attributes
///
/// This mirrors the layout of a hierarchical data file, which the persistence layer creates by
/// walking the tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchiveGroup {
    attributes: BTreeMap<String, String>,
    children: BTreeMap<String, ArchiveNode>,
}

macro_rules! leaf_getter {
    ($name: ident, $variant: ident, $output: ty, $expected: literal) => {
        #[doc = concat!("The ", $expected, " leaf stored under `key`")]
        pub fn $name(&self, key: &str) -> Result<$output, ArchiveError> {
            match self.leaf(key)? {
                ArchiveValue::$variant(value) => Ok(value.clone()),
                _ => Err(ArchiveError::WrongKind {
                    key: key.to_string(),
                    expected: $expected,
                }),
            }
        }
    };
}

impl ArchiveGroup {
    /// An empty group without attributes
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite a string attribute
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// The attribute stored under `key`
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attributes in key order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// The type tag written by [`super::ArchiveWrite`]
    pub fn format(&self) -> Result<&str, ArchiveError> {
        self.attribute(FORMAT_ATTRIBUTE)
            .ok_or_else(|| ArchiveError::MissingKey(FORMAT_ATTRIBUTE.to_string()))
    }

    /// Create an empty subgroup under `key`, replacing any previous child
    pub fn create_group(&mut self, key: impl Into<String>) -> &mut ArchiveGroup {
        let key = key.into();
        self.children
            .insert(key.clone(), ArchiveNode::Group(ArchiveGroup::new()));
        match self.children.get_mut(&key) {
            Some(ArchiveNode::Group(group)) => group,
            _ => unreachable!("the group was inserted above"),
        }
    }

    /// Store `value` under `key`, replacing any existing child
    pub fn insert_leaf(&mut self, key: impl Into<String>, value: ArchiveValue) {
        self.children.insert(key.into(), ArchiveNode::Leaf(value));
    }

    /// Whether a child named `key` exists
    pub fn contains(&self, key: &str) -> bool {
        self.children.contains_key(key)
    }

    /// Children in key order
    pub fn children(&self) -> impl Iterator<Item = (&str, &ArchiveNode)> {
        self.children.iter().map(|(key, node)| (key.as_str(), node))
    }

    fn child(&self, key: &str) -> Result<&ArchiveNode, ArchiveError> {
        self.children
            .get(key)
            .ok_or_else(|| ArchiveError::MissingKey(key.to_string()))
    }

    /// The sub-group stored under `key`
    pub fn group(&self, key: &str) -> Result<&ArchiveGroup, ArchiveError> {
        match self.child(key)? {
            ArchiveNode::Group(group) => Ok(group),
            ArchiveNode::Leaf(_) => Err(ArchiveError::WrongKind {
                key: key.to_string(),
                expected: "group",
            }),
        }
    }

    /// The leaf value stored under `key`
    pub fn leaf(&self, key: &str) -> Result<&ArchiveValue, ArchiveError> {
        match self.child(key)? {
            ArchiveNode::Leaf(value) => Ok(value),
            ArchiveNode::Group(_) => Err(ArchiveError::WrongKind {
                key: key.to_string(),
                expected: "leaf",
            }),
        }
    }

    leaf_getter!(real, Real, f64, "real");
    leaf_getter!(integer, Integer, i64, "integer");
    leaf_getter!(boolean, Boolean, bool, "boolean");
    leaf_getter!(text, Text, String, "text");
    leaf_getter!(strings, Strings, FixedWidthStrings, "string list");
    leaf_getter!(tensor, ComplexTensor, Array3<Complex64>, "complex tensor");

    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        for (key, value) in self.attributes.iter() {
            writeln!(f, "{indent}@{key} = {value}")?;
        }
        for (key, node) in self.children.iter() {
            match node {
                ArchiveNode::Group(group) => {
                    writeln!(f, "{indent}{key}/")?;
                    group.render(f, depth + 1)?;
                }
                ArchiveNode::Leaf(ArchiveValue::ComplexTensor(tensor)) => {
                    writeln!(f, "{indent}{key}: complex tensor {:?}", tensor.shape())?
                }
                ArchiveNode::Leaf(ArchiveValue::Strings(strings)) => writeln!(
                    f,
                    "{indent}{key}: {} strings of width {}",
                    strings.len(),
                    strings.width()
                )?,
                ArchiveNode::Leaf(ArchiveValue::Real(value)) => writeln!(f, "{indent}{key}: {value}")?,
                ArchiveNode::Leaf(ArchiveValue::Integer(value)) => {
                    writeln!(f, "{indent}{key}: {value}")?
                }
                ArchiveNode::Leaf(ArchiveValue::Boolean(value)) => {
                    writeln!(f, "{indent}{key}: {value}")?
                }
                ArchiveNode::Leaf(ArchiveValue::Text(value)) => {
                    writeln!(f, "{indent}{key}: {value:?}")?
                }
            }
        }
        Ok(())
    }
}

/// An indented listing of the tree, one line per attribute, group and leaf
impl fmt::Display for ArchiveGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}
