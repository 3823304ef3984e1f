// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Duty cycle type for heater power control.
//!
//! This module provides a type-safe representation of heater power,
//! ensuring values are always within the valid range of 0-100%.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Heater power as a percentage of full power (0-100).
///
/// Out-of-range requests are normally clamped rather than rejected; use
/// [`DutyCycle::new`] when strict checking is wanted.
///
/// # Examples
///
/// ```
/// use heater_control::types::DutyCycle;
///
/// assert_eq!(DutyCycle::clamped(75).value(), 75);
/// assert_eq!(DutyCycle::clamped(-20).value(), 0);
/// assert_eq!(DutyCycle::clamped(250).value(), 100);
///
/// assert!(DutyCycle::new(101).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "i64", into = "u8")]
pub struct DutyCycle(u8);

impl DutyCycle {
    /// Heater off (0%).
    pub const MIN: Self = Self(0);

    /// Full power (100%).
    pub const MAX: Self = Self(100);

    /// Creates a duty cycle, rejecting values outside 0-100.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is negative or exceeds 100.
    pub fn new(value: i64) -> Result<Self, ValueError> {
        if !(0..=100).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: value,
            });
        }
        Ok(Self::clamped(value))
    }

    /// Creates a duty cycle, clamping to the nearest bound.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn clamped(value: i64) -> Self {
        if value < 0 {
            Self::MIN
        } else if value > 100 {
            Self::MAX
        } else {
            // In range, so the cast is lossless.
            Self(value as u8)
        }
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for DutyCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<i64> for DutyCycle {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<DutyCycle> for u8 {
    fn from(value: DutyCycle) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_matches_min_max() {
        for n in [-1_000, -1, 0, 1, 50, 99, 100, 101, 1_000, i64::MIN, i64::MAX] {
            let expected = n.clamp(0, 100);
            assert_eq!(i64::from(DutyCycle::clamped(n).value()), expected, "n = {n}");
        }
    }

    #[test]
    fn new_accepts_full_range() {
        for v in 0..=100 {
            assert_eq!(i64::from(DutyCycle::new(v).unwrap().value()), v);
        }
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert_eq!(
            DutyCycle::new(-1).unwrap_err(),
            ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: -1
            }
        );
        assert!(DutyCycle::new(101).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(DutyCycle::clamped(75).to_string(), "75%");
    }

    #[test]
    fn deserialize_clamps() {
        let duty: DutyCycle = serde_json::from_str("140").unwrap();
        assert_eq!(duty, DutyCycle::MAX);
        let duty: DutyCycle = serde_json::from_str("-3").unwrap();
        assert_eq!(duty, DutyCycle::MIN);
        assert_eq!(serde_json::to_string(&DutyCycle::clamped(42)).unwrap(), "42");
    }
}
