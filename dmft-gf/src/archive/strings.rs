// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::ArchiveError;
use serde::{Deserialize, Serialize};

/// A list of UTF-8 strings stored in slots of equal byte width, padded with NUL
///
/// The width is the byte length of the longest string, and at least one so that a list of empty
/// strings still has a well defined number of slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedWidthStrings {
    width: usize,
    bytes: Vec<u8>,
}

impl FixedWidthStrings {
    /// Encode every string at the byte length of the longest one
    pub fn from_strings<S: AsRef<str>>(strings: &[S]) -> Self {
        let width = strings
            .iter()
            .map(|s| s.as_ref().len())
            .max()
            .unwrap_or(0)
            .max(1);
        let mut bytes = Vec::with_capacity(width * strings.len());
        for string in strings {
            let string = string.as_ref().as_bytes();
            bytes.extend_from_slice(string);
            bytes.resize(bytes.len() + width - string.len(), 0);
        }
        Self { width, bytes }
    }

    /// Wrap raw slots as read from storage
    pub fn from_raw(width: usize, bytes: Vec<u8>) -> Result<Self, ArchiveError> {
        if width == 0 || bytes.len() % width != 0 {
            return Err(ArchiveError::InvalidString(format!(
                "{} bytes cannot be split into slots of width {width}",
                bytes.len()
            )));
        }
        Ok(Self { width, bytes })
    }

    /// Bytes per string
    pub fn width(&self) -> usize {
        self.width
    }

    /// The padded bytes, `width` per string
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of encoded strings
    pub fn len(&self) -> usize {
        self.bytes.len() / self.width
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode every slot, dropping the NUL padding
    pub fn to_strings(&self) -> Result<Vec<String>, ArchiveError> {
        self.bytes
            .chunks(self.width)
            .map(|slot| {
                let end = slot.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
                String::from_utf8(slot[..end].to_vec())
                    .map_err(|e| ArchiveError::InvalidString(e.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::FixedWidthStrings;
    use crate::archive::ArchiveError;

    #[test]
    fn width_is_the_longest_label_in_bytes() {
        let strings = FixedWidthStrings::from_strings(&["up", "down", "ε"]);
        assert_eq!(strings.width(), 4);
        assert_eq!(strings.len(), 3);
        assert_eq!(&strings.bytes()[0..4], b"up\0\0");
        assert_eq!(&strings.bytes()[8..10], "ε".as_bytes());
        assert_eq!(strings.to_strings().unwrap(), vec!["up", "down", "ε"]);
    }

    #[test]
    fn empty_labels_keep_their_slots() {
        let strings = FixedWidthStrings::from_strings(&["", ""]);
        assert_eq!(strings.width(), 1);
        assert_eq!(strings.to_strings().unwrap(), vec!["", ""]);
        let none = FixedWidthStrings::from_strings::<&str>(&[]);
        assert!(none.is_empty());
        assert!(none.to_strings().unwrap().is_empty());
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        assert!(matches!(
            FixedWidthStrings::from_raw(3, vec![b'a'; 4]),
            Err(ArchiveError::InvalidString(_))
        ));
        assert!(FixedWidthStrings::from_raw(0, vec![]).is_err());
        let truncated = FixedWidthStrings::from_raw(2, vec![0xce, 0]).unwrap();
        assert!(matches!(truncated.to_strings(), Err(ArchiveError::InvalidString(_))));
    }
}
