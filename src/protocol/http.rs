// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of [`RemoteDeviceClient`].

use std::time::Duration;

use reqwest::Client;

use crate::config::Endpoint;
use crate::error::ProtocolError;
use crate::protocol::{CommandResponse, RemoteDeviceClient};

/// Configuration for the controller HTTP client.
///
/// The endpoint is not part of this configuration: it is passed to every
/// request so that address changes take effect immediately.
///
/// # Examples
///
/// ```
/// use heater_control::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let client = HttpConfig::new()
///     .with_timeout(Duration::from_secs(5))
///     .with_credentials("observer", "secret")
///     .into_client()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl HttpConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            credentials: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets HTTP basic authentication credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the credentials if set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.credentials
            .as_ref()
            .map(|(u, p)| (u.as_str(), p.as_str()))
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            client,
            credentials: self.credentials,
            timeout: self.timeout,
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the controller control service.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, ProtocolError> {
        HttpConfig::new().into_client()
    }

    /// Maps a reqwest failure onto the protocol error taxonomy.
    ///
    /// Timeouts, refused connections and connections dropped before or while
    /// answering are transport failures; anything else stays `Http`.
    fn classify(&self, err: reqwest::Error) -> ProtocolError {
        if err.is_timeout() {
            let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            ProtocolError::Timeout(millis)
        } else if err.is_connect() || err.is_body() || (err.is_request() && err.status().is_none())
        {
            ProtocolError::ConnectionFailed(err.to_string())
        } else {
            ProtocolError::Http(err)
        }
    }
}

impl RemoteDeviceClient for HttpClient {
    async fn send(
        &self,
        endpoint: &Endpoint,
        path: &str,
    ) -> Result<CommandResponse, ProtocolError> {
        let url = endpoint.url(path);

        tracing::debug!(url = %url, "Sending HTTP request");

        let mut request = self.client.get(&url);
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await.map_err(|err| self.classify(err))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| self.classify(err))?;

        tracing::debug!(status, body = %body, "Received HTTP response");

        Ok(CommandResponse::new(status, body))
    }
}
