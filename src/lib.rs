// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater Control - validated heater power commands for telescope controllers.
//!
//! A telescope controller exposes an HTTP control service with a `/status`
//! resource and a `/heaters/set` command. This library sets the power of one
//! of the controller's mirror heaters in two phases:
//!
//! 1. **Validate**: query `/status` and check that the controller is
//!    connected to the mount ([`PreconditionValidator`]).
//! 2. **Execute**: send `GET /heaters/set?role=<m1|m2|m3>&power=<0-100>` and
//!    interpret the answer ([`CommandDispatcher`]).
//!
//! [`SetHeaterPower`] ties both phases to a [`ParameterStore`] holding the
//! selected heater and duty cycle, and to an [`EndpointProvider`] holding
//! the controller address.
//!
//! # Quick Start
//!
//! ```no_run
//! use heater_control::{Endpoint, EndpointProvider, HttpClient, SetHeaterPower};
//! use heater_control::types::HeaterTarget;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> heater_control::Result<()> {
//!     let endpoints = EndpointProvider::new(Endpoint::new("192.168.1.50", 80));
//!     let mut action = SetHeaterPower::new(endpoints, HttpClient::new()?);
//!
//!     action.params_mut().set_target(HeaterTarget::M1);
//!     action.params_mut().set_duty_cycle(75);
//!
//!     let issues = action.validate().await;
//!     if !issues.is_empty() {
//!         for issue in issues {
//!             eprintln!("{issue}");
//!         }
//!         return Ok(());
//!     }
//!
//!     let progress = |status: &str| println!("{status}");
//!     action.execute(&progress, &CancellationToken::new()).await?;
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod params;
pub mod protocol;
pub mod response;
pub mod types;
pub mod validation;

pub use action::{NoProgress, ProgressSink, SetHeaterPower};
pub use command::{Command, HeaterCommand};
pub use config::{Endpoint, EndpointProvider};
pub use dispatch::CommandDispatcher;
pub use error::{DispatchError, Error, ParseError, ProtocolError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::{CommandResponse, RemoteDeviceClient};
pub use params::{ParameterChange, ParameterStore};
pub use response::{StatusLookup, StatusSnapshot};
pub use types::{DutyCycle, HeaterTarget};
pub use validation::{Issues, PreconditionValidator};
