// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the controller's HTTP control service.
//!
//! [`RemoteDeviceClient`] is the seam between the command logic and the
//! network. [`HttpClient`] implements it with `reqwest`; tests can provide
//! their own implementation.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use crate::config::Endpoint;
use crate::error::{Error, ProtocolError};
use crate::response::StatusSnapshot;

/// Path of the controller status resource.
pub const STATUS_PATH: &str = "/status";

/// Raw response from the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    status: u16,
    body: String,
}

impl CommandResponse {
    /// Creates a response with the given status code and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns `true` if the controller accepted the request (HTTP 200).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Client able to send GET requests to a controller endpoint.
///
/// Cancellation is handled by the caller dropping the returned future.
#[allow(async_fn_in_trait)]
pub trait RemoteDeviceClient {
    /// Sends `GET <path>` to the endpoint.
    ///
    /// A non-success status is not an error at this level; it is returned in
    /// the [`CommandResponse`].
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request could not be completed.
    async fn send(&self, endpoint: &Endpoint, path: &str)
    -> Result<CommandResponse, ProtocolError>;

    /// Fetches and parses the controller status.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request fails or the controller
    /// answers with a non-success status, and `Error::Parse` if the body is
    /// not a JSON object.
    async fn status(&self, endpoint: &Endpoint) -> Result<StatusSnapshot, Error> {
        let response = self.send(endpoint, STATUS_PATH).await?;

        if !response.is_success() {
            return Err(ProtocolError::Status {
                code: response.status(),
                body: response.body().trim().to_string(),
            }
            .into());
        }

        Ok(StatusSnapshot::from_json(response.body())?)
    }
}
