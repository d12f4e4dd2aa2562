// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum statistic of the particles described by a Green's function
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    #[default]
    Fermion,
    Boson,
}

impl Statistic {
    /// The offset in the Matsubara index `2k + zeta`: odd integers for fermions, even for bosons
    pub fn zeta(self) -> i64 {
        match self {
            Statistic::Fermion => 1,
            Statistic::Boson => 0,
        }
    }

    /// Single letter tag used by the archive format
    pub fn as_tag(self) -> &'static str {
        match self {
            Statistic::Fermion => "F",
            Statistic::Boson => "B",
        }
    }

    /// Parse either the single letter tag or the full name
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "F" | "Fermion" => Some(Statistic::Fermion),
            "B" | "Boson" => Some(Statistic::Boson),
            _ => None,
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Fermion => write!(f, "Fermion"),
            Statistic::Boson => write!(f, "Boson"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Statistic;

    #[test]
    fn fermions_are_odd_and_bosons_are_even() {
        assert_eq!(Statistic::Fermion.zeta(), 1);
        assert_eq!(Statistic::Boson.zeta(), 0);
    }

    #[test]
    fn tags_parse_back_to_the_same_statistic() {
        for statistic in [Statistic::Fermion, Statistic::Boson] {
            assert_eq!(Statistic::from_tag(statistic.as_tag()), Some(statistic));
            assert_eq!(
                Statistic::from_tag(&statistic.to_string()),
                Some(statistic)
            );
        }
        assert_eq!(Statistic::from_tag("X"), None);
    }
}
