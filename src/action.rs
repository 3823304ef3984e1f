// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The "set heater power" action used by sequencing hosts.
//!
//! [`SetHeaterPower`] bundles the parameters of one command with the
//! validator and dispatcher, and reads the controller endpoint from an
//! [`EndpointProvider`] on every call.

use std::fmt;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::EndpointProvider;
use crate::dispatch::CommandDispatcher;
use crate::error::DispatchError;
use crate::params::ParameterStore;
use crate::protocol::RemoteDeviceClient;
use crate::validation::{Issues, PreconditionValidator};

/// Receives human-readable progress messages during execution.
pub trait ProgressSink {
    /// Reports the current status.
    fn report(&self, status: &str);
}

impl<F: Fn(&str)> ProgressSink for F {
    fn report(&self, status: &str) {
        self(status);
    }
}

/// Progress sink that discards all messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _status: &str) {}
}

/// Sets the power of one heater on the telescope controller.
///
/// Cloning yields an independent, identically configured action: parameter
/// edits on the clone do not affect the original. Both keep reading the
/// same endpoint provider.
///
/// # Examples
///
/// ```no_run
/// use heater_control::{EndpointProvider, Endpoint, HttpClient, NoProgress, SetHeaterPower};
/// use heater_control::types::HeaterTarget;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> heater_control::Result<()> {
/// let endpoints = EndpointProvider::new(Endpoint::new("scope.local", 80));
/// let mut action = SetHeaterPower::new(endpoints, HttpClient::new()?);
/// action.params_mut().set_target(HeaterTarget::M2);
/// action.params_mut().set_duty_cycle(60);
///
/// if action.validate().await.is_empty() {
///     action.execute(&NoProgress, &CancellationToken::new()).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SetHeaterPower<C> {
    params: ParameterStore,
    endpoints: EndpointProvider,
    validator: PreconditionValidator<C>,
    dispatcher: CommandDispatcher<C>,
}

impl<C: RemoteDeviceClient + Clone> SetHeaterPower<C> {
    /// Creates an action with default parameters.
    #[must_use]
    pub fn new(endpoints: EndpointProvider, client: C) -> Self {
        Self::with_params(endpoints, client, ParameterStore::default())
    }

    /// Creates an action with the given parameters.
    #[must_use]
    pub fn with_params(endpoints: EndpointProvider, client: C, params: ParameterStore) -> Self {
        Self {
            params,
            endpoints,
            validator: PreconditionValidator::new(client.clone()),
            dispatcher: CommandDispatcher::new(client),
        }
    }

    /// Returns the command parameters.
    #[must_use]
    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    /// Returns the command parameters for editing.
    pub fn params_mut(&mut self) -> &mut ParameterStore {
        &mut self.params
    }

    /// Returns the endpoint provider.
    #[must_use]
    pub fn endpoints(&self) -> &EndpointProvider {
        &self.endpoints
    }

    /// Returns the issues found by the most recent validation.
    #[must_use]
    pub fn issues(&self) -> Issues {
        self.validator.issues()
    }

    /// Subscribes to changes of the issue list.
    #[must_use]
    pub fn watch_issues(&self) -> watch::Receiver<Issues> {
        self.validator.watch_issues()
    }

    /// Checks that the controller at the current endpoint is ready.
    pub async fn validate(&self) -> Issues {
        let endpoint = self.endpoints.current();
        self.validator.validate(&endpoint).await
    }

    /// Runs [`validate`](Self::validate) to completion on `handle`, blocking
    /// the calling thread for one status round trip.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context.
    pub fn validate_blocking(&self, handle: &Handle) -> Issues {
        handle.block_on(self.validate())
    }

    /// Sends the configured command to the controller at the current
    /// endpoint.
    ///
    /// The action does not validate on its own; hosts are expected to call
    /// [`validate`](Self::validate) first and honour its result.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError` if the command was cancelled, the controller
    /// could not be reached or it rejected the command.
    pub async fn execute(
        &self,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<(), DispatchError> {
        let target = self.params.target();
        let duty = self.params.duty_cycle();
        let endpoint = self.endpoints.current();

        progress.report(&format!("Setting {} to {duty}", target.label()));

        let result = self
            .dispatcher
            .execute(&endpoint, target, duty, cancel)
            .await;

        if let Err(err) = &result {
            tracing::warn!(error = %err, "Set heater power failed");
        }
        result
    }
}

impl<C: Clone> Clone for SetHeaterPower<C> {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
            endpoints: self.endpoints.clone(),
            validator: self.validator.clone(),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<C> fmt::Display for SetHeaterPower<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.params.label())
    }
}
