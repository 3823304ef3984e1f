// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater target identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// One of the controller's mirror heaters.
///
/// Each heater has a short wire identifier used in request paths and a
/// separate human-readable label used in messages.
///
/// # Examples
///
/// ```
/// use heater_control::types::HeaterTarget;
///
/// let target = HeaterTarget::M2;
/// assert_eq!(target.wire_id(), "m2");
/// assert_eq!(target.label(), "Secondary Mirror Heater");
///
/// let parsed: HeaterTarget = "M3".parse().unwrap();
/// assert_eq!(parsed, HeaterTarget::M3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaterTarget {
    /// Primary mirror heater.
    #[default]
    M1,
    /// Secondary mirror heater.
    M2,
    /// Tertiary mirror heater.
    M3,
}

/// Wire identifier and display label, indexed by [`HeaterTarget::index`].
const TARGETS: [(HeaterTarget, &str, &str); 3] = [
    (HeaterTarget::M1, "m1", "Primary Mirror Heater"),
    (HeaterTarget::M2, "m2", "Secondary Mirror Heater"),
    (HeaterTarget::M3, "m3", "Tertiary Mirror Heater"),
];

impl HeaterTarget {
    /// All heaters, in index order.
    pub const ALL: [Self; 3] = [Self::M1, Self::M2, Self::M3];

    /// Returns the zero-based index of this heater.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::M1 => 0,
            Self::M2 => 1,
            Self::M3 => 2,
        }
    }

    /// Returns the identifier sent to the controller.
    #[must_use]
    pub const fn wire_id(self) -> &'static str {
        TARGETS[self.index() as usize].1
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        TARGETS[self.index() as usize].2
    }

    /// Looks up a heater by its wire identifier, ignoring case.
    #[must_use]
    pub fn from_wire_id(id: &str) -> Option<Self> {
        TARGETS
            .iter()
            .find(|(_, wire, _)| wire.eq_ignore_ascii_case(id))
            .map(|(target, _, _)| *target)
    }
}

impl fmt::Display for HeaterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HeaterTarget {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire_id(s.trim()).ok_or_else(|| ValueError::UnknownTarget(s.to_string()))
    }
}

impl TryFrom<u8> for HeaterTarget {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| ValueError::UnknownTarget(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_ids_and_labels() {
        assert_eq!(HeaterTarget::M1.wire_id(), "m1");
        assert_eq!(HeaterTarget::M2.wire_id(), "m2");
        assert_eq!(HeaterTarget::M3.wire_id(), "m3");
        assert_eq!(HeaterTarget::M1.label(), "Primary Mirror Heater");
        assert_eq!(HeaterTarget::M3.label(), "Tertiary Mirror Heater");
    }

    #[test]
    fn index_matches_all_order() {
        for (i, target) in HeaterTarget::ALL.iter().enumerate() {
            assert_eq!(usize::from(target.index()), i);
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("m1".parse::<HeaterTarget>().unwrap(), HeaterTarget::M1);
        assert_eq!(" M2 ".parse::<HeaterTarget>().unwrap(), HeaterTarget::M2);
    }

    #[test]
    fn from_str_unknown() {
        let err = "m4".parse::<HeaterTarget>().unwrap_err();
        assert_eq!(err, ValueError::UnknownTarget("m4".to_string()));
    }

    #[test]
    fn try_from_index() {
        assert_eq!(HeaterTarget::try_from(2).unwrap(), HeaterTarget::M3);
        assert!(HeaterTarget::try_from(3).is_err());
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(HeaterTarget::M2.to_string(), "Secondary Mirror Heater");
    }

    #[test]
    fn serde_uses_wire_id() {
        let json = serde_json::to_string(&HeaterTarget::M3).unwrap();
        assert_eq!(json, "\"m3\"");
        let back: HeaterTarget = serde_json::from_str("\"m1\"").unwrap();
        assert_eq!(back, HeaterTarget::M1);
    }
}
