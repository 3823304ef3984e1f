// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater power command.

use crate::command::Command;
use crate::types::{DutyCycle, HeaterTarget};

/// Sets the power of one heater: `GET /heaters/set?role=<id>&power=<0-100>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaterCommand {
    target: HeaterTarget,
    duty: DutyCycle,
}

impl HeaterCommand {
    /// Creates a command setting `target` to `duty`.
    #[must_use]
    pub const fn new(target: HeaterTarget, duty: DutyCycle) -> Self {
        Self { target, duty }
    }

    /// Returns the addressed heater.
    #[must_use]
    pub const fn target(&self) -> HeaterTarget {
        self.target
    }

    /// Returns the requested duty cycle.
    #[must_use]
    pub const fn duty(&self) -> DutyCycle {
        self.duty
    }
}

impl Command for HeaterCommand {
    fn resource(&self) -> &'static str {
        "/heaters/set"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("role", self.target.wire_id().to_string()),
            ("power", self.duty.value().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_for_each_heater() {
        let duty = DutyCycle::clamped(40);
        assert_eq!(
            HeaterCommand::new(HeaterTarget::M1, duty).to_path(),
            "/heaters/set?role=m1&power=40"
        );
        assert_eq!(
            HeaterCommand::new(HeaterTarget::M2, duty).to_path(),
            "/heaters/set?role=m2&power=40"
        );
        assert_eq!(
            HeaterCommand::new(HeaterTarget::M3, duty).to_path(),
            "/heaters/set?role=m3&power=40"
        );
    }

    #[test]
    fn path_at_bounds() {
        assert_eq!(
            HeaterCommand::new(HeaterTarget::M1, DutyCycle::MIN).to_path(),
            "/heaters/set?role=m1&power=0"
        );
        assert_eq!(
            HeaterCommand::new(HeaterTarget::M1, DutyCycle::MAX).to_path(),
            "/heaters/set?role=m1&power=100"
        );
    }
}
