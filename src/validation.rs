// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pre-execution checks against the controller status.
//!
//! Heater commands are only meaningful while the controller is connected to
//! the mount. [`PreconditionValidator`] queries `/status` and turns the
//! result into a list of human-readable issues; an empty list means the
//! command may be scheduled. Checks stop at the first issue found.

use tokio::sync::watch;

use crate::config::Endpoint;
use crate::error::Error;
use crate::protocol::RemoteDeviceClient;
use crate::response::{MOUNT_CONNECTED_KEY, StatusLookup};

/// Ordered list of validation issues. Empty means valid.
pub type Issues = Vec<String>;

/// Issue reported when the mount connection key is absent.
pub const MOUNT_STATUS_UNKNOWN: &str = "Unable to determine the mount connection status";

/// Issue reported when the controller is not connected to the mount.
pub const MOUNT_NOT_CONNECTED: &str = "The telescope controller is not connected to the mount";

/// Checks that the controller is ready to accept heater commands.
///
/// The latest result is also published on a watch channel. Observers are
/// notified only when a validation run produces a list that differs from
/// the previous one.
#[derive(Debug)]
pub struct PreconditionValidator<C> {
    client: C,
    issues: watch::Sender<Issues>,
}

impl<C: RemoteDeviceClient> PreconditionValidator<C> {
    /// Creates a validator using the given client.
    #[must_use]
    pub fn new(client: C) -> Self {
        let (issues, _) = watch::channel(Issues::new());
        Self { client, issues }
    }

    /// Queries the controller status and returns the issues found.
    pub async fn validate(&self, endpoint: &Endpoint) -> Issues {
        let issues = self.check(endpoint).await;

        for issue in &issues {
            tracing::warn!(%endpoint, issue = %issue, "Heater command precondition failed");
        }

        self.issues.send_if_modified(|current| {
            if *current == issues {
                return false;
            }
            current.clone_from(&issues);
            true
        });

        issues
    }

    /// Returns the issues found by the most recent validation.
    #[must_use]
    pub fn issues(&self) -> Issues {
        self.issues.borrow().clone()
    }

    /// Subscribes to changes of the issue list.
    #[must_use]
    pub fn watch_issues(&self) -> watch::Receiver<Issues> {
        self.issues.subscribe()
    }

    async fn check(&self, endpoint: &Endpoint) -> Issues {
        let snapshot = match self.client.status(endpoint).await {
            Ok(snapshot) => snapshot,
            Err(Error::Protocol(err)) if err.is_transport() => {
                tracing::debug!(error = %err, "Status query failed");
                return vec![format!(
                    "Unable to communicate with the telescope controller at {endpoint}"
                )];
            }
            Err(err) => return vec![err.to_string()],
        };

        match snapshot.lookup_bool(MOUNT_CONNECTED_KEY) {
            StatusLookup::Missing => vec![MOUNT_STATUS_UNKNOWN.to_string()],
            StatusLookup::Invalid { raw } => {
                vec![format!("Unable to parse mount connection status '{raw}'")]
            }
            StatusLookup::Value(false) => vec![MOUNT_NOT_CONNECTED.to_string()],
            StatusLookup::Value(true) => Issues::new(),
        }
    }
}

impl<C: Clone> Clone for PreconditionValidator<C> {
    fn clone(&self) -> Self {
        let (issues, _) = watch::channel(self.issues.borrow().clone());
        Self {
            client: self.client.clone(),
            issues,
        }
    }
}
