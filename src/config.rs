// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller endpoint configuration.
//!
//! The controller address is owned by the host application and may change at
//! any time. [`EndpointProvider`] holds the current value behind a watch
//! channel; every operation reads it afresh instead of caching it.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Address of the controller's HTTP control service.
///
/// # Examples
///
/// ```
/// use heater_control::config::Endpoint;
///
/// let endpoint = Endpoint::new("192.168.1.50", 8080);
/// assert_eq!(endpoint.base_url(), "http://192.168.1.50:8080");
/// assert_eq!(endpoint.to_string(), "192.168.1.50:8080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Default controller host.
    pub const DEFAULT_HOST: &'static str = "localhost";
    /// Default controller port.
    pub const DEFAULT_PORT: u16 = 80;

    /// Creates an endpoint for the given host and port.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Builds the base URL, bracketing IPv6 literals.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("http://[{}]:{}", self.host, self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }

    /// Builds the full URL for a request path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HOST, Self::DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Shared source of the current controller endpoint.
///
/// Clones share the same underlying value, so an update made through any
/// clone is visible to all of them. Subscribers are only notified when the
/// endpoint actually changes.
///
/// # Examples
///
/// ```
/// use heater_control::config::{Endpoint, EndpointProvider};
///
/// let provider = EndpointProvider::new(Endpoint::new("scope.local", 80));
/// let rx = provider.subscribe();
///
/// assert!(provider.set_port(8080));
/// assert!(rx.has_changed().unwrap());
/// assert_eq!(provider.current().port(), 8080);
///
/// // Same value: no notification
/// assert!(!provider.set_port(8080));
/// ```
#[derive(Debug, Clone)]
pub struct EndpointProvider {
    sender: Arc<watch::Sender<Endpoint>>,
}

impl EndpointProvider {
    /// Creates a provider holding the given endpoint.
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        let (sender, _) = watch::channel(endpoint);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Returns a snapshot of the current endpoint.
    #[must_use]
    pub fn current(&self) -> Endpoint {
        self.sender.borrow().clone()
    }

    /// Replaces the endpoint. Returns `true` if it changed.
    pub fn set_endpoint(&self, endpoint: Endpoint) -> bool {
        self.update(|current| {
            if *current == endpoint {
                return false;
            }
            *current = endpoint;
            true
        })
    }

    /// Changes the host. Returns `true` if it changed.
    pub fn set_host(&self, host: impl Into<String>) -> bool {
        let host = host.into();
        self.update(|current| {
            if current.host == host {
                return false;
            }
            current.host = host;
            true
        })
    }

    /// Changes the port. Returns `true` if it changed.
    pub fn set_port(&self, port: u16) -> bool {
        self.update(|current| {
            if current.port == port {
                return false;
            }
            current.port = port;
            true
        })
    }

    /// Subscribes to endpoint changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Endpoint> {
        self.sender.subscribe()
    }

    fn update(&self, modify: impl FnOnce(&mut Endpoint) -> bool) -> bool {
        let changed = self.sender.send_if_modified(modify);
        if changed {
            tracing::debug!(endpoint = %self.current(), "Controller endpoint changed");
        }
        changed
    }
}

impl Default for EndpointProvider {
    fn default() -> Self {
        Self::new(Endpoint::default())
    }
}
