// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller command definitions.
//!
//! Commands are plain GET requests: a resource path plus query parameters,
//! with no request body.
//!
//! # Examples
//!
//! ```
//! use heater_control::command::{Command, HeaterCommand};
//! use heater_control::types::{DutyCycle, HeaterTarget};
//!
//! let cmd = HeaterCommand::new(HeaterTarget::M1, DutyCycle::clamped(75));
//! assert_eq!(cmd.to_path(), "/heaters/set?role=m1&power=75");
//! ```

mod heater;

pub use heater::HeaterCommand;

/// A command that can be sent to the controller.
pub trait Command {
    /// Returns the resource path, e.g. `"/heaters/set"`.
    fn resource(&self) -> &'static str;

    /// Returns the query parameters in order.
    fn query(&self) -> Vec<(&'static str, String)>;

    /// Returns the full request path with encoded query string.
    fn to_path(&self) -> String {
        let query = self
            .query()
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() {
            self.resource().to_string()
        } else {
            format!("{}?{query}", self.resource())
        }
    }
}
