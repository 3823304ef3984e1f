// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sending heater commands and interpreting the controller's answer.

use tokio_util::sync::CancellationToken;

use crate::command::{Command, HeaterCommand};
use crate::config::Endpoint;
use crate::error::DispatchError;
use crate::protocol::RemoteDeviceClient;
use crate::types::{DutyCycle, HeaterTarget};

/// Sends heater power commands to the controller.
///
/// Each call performs exactly one request and never retries. Dispatch is
/// fire-and-confirm: success means the controller accepted the command, not
/// that the heater reached the requested power.
#[derive(Debug, Clone)]
pub struct CommandDispatcher<C> {
    client: C,
}

impl<C: RemoteDeviceClient> CommandDispatcher<C> {
    /// Creates a dispatcher using the given client.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Sets `target` to `duty` on the controller at `endpoint`.
    ///
    /// The request races against `cancel`. A token cancelled before the call
    /// sends nothing; one cancelled while waiting aborts the request unless
    /// the controller's answer is already available.
    ///
    /// # Errors
    ///
    /// - `DispatchError::Cancelled` if `cancel` fired first
    /// - `DispatchError::Transport` if the controller could not be reached
    /// - `DispatchError::Rejected` if the controller answered with a
    ///   non-success status; the trimmed body is the detail
    pub async fn execute(
        &self,
        endpoint: &Endpoint,
        target: HeaterTarget,
        duty: DutyCycle,
        cancel: &CancellationToken,
    ) -> Result<(), DispatchError> {
        let label = target.label();
        let duty_value = duty.value();
        let path = HeaterCommand::new(target, duty).to_path();

        tracing::debug!(%endpoint, path = %path, "Dispatching heater command");

        if cancel.is_cancelled() {
            tracing::debug!(heater = label, "Heater command cancelled before sending");
            return Err(DispatchError::Cancelled {
                label,
                duty: duty_value,
            });
        }

        // A response that is ready wins over a cancellation observed in the
        // same poll: the controller has already applied the command.
        let response = tokio::select! {
            biased;

            result = self.client.send(endpoint, &path) => {
                result.map_err(|source| DispatchError::Transport {
                    label,
                    duty: duty_value,
                    source,
                })?
            }
            () = cancel.cancelled() => {
                tracing::debug!(heater = label, "Heater command cancelled");
                return Err(DispatchError::Cancelled {
                    label,
                    duty: duty_value,
                });
            }
        };

        if !response.is_success() {
            let detail = response.body().trim().to_string();
            tracing::warn!(
                heater = label,
                duty = duty_value,
                status = response.status(),
                detail = %detail,
                "Controller rejected heater command"
            );
            return Err(DispatchError::Rejected {
                label,
                duty: duty_value,
                status: response.status(),
                detail,
            });
        }

        tracing::info!(heater = label, duty = duty_value, "Heater power set");
        Ok(())
    }

    /// Like [`execute`](Self::execute), but takes host-supplied raw values.
    ///
    /// `target_code` is the heater index (see [`HeaterTarget::index`]) and
    /// `duty` is clamped to 0-100.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::UnknownTarget` without sending anything if
    /// `target_code` names no heater; otherwise as for `execute`.
    pub async fn execute_raw(
        &self,
        endpoint: &Endpoint,
        target_code: u8,
        duty: i64,
        cancel: &CancellationToken,
    ) -> Result<(), DispatchError> {
        let target = HeaterTarget::try_from(target_code)
            .map_err(|_| DispatchError::UnknownTarget(target_code.to_string()))?;
        self.execute(endpoint, target, DutyCycle::clamped(duty), cancel)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::ProtocolError;
    use crate::protocol::CommandResponse;

    /// Records requested paths and answers with a fixed response.
    #[derive(Clone, Default)]
    struct RecordingClient {
        paths: Arc<Mutex<Vec<String>>>,
        response: Option<(u16, &'static str)>,
        hang: bool,
        cancel_on_send: Option<CancellationToken>,
    }

    impl RecordingClient {
        fn answering(status: u16, body: &'static str) -> Self {
            Self {
                response: Some((status, body)),
                ..Self::default()
            }
        }

        fn hanging() -> Self {
            Self {
                hang: true,
                ..Self::default()
            }
        }

        fn paths(&self) -> Vec<String> {
            self.paths.lock().unwrap().clone()
        }
    }

    impl RemoteDeviceClient for RecordingClient {
        async fn send(
            &self,
            _endpoint: &Endpoint,
            path: &str,
        ) -> Result<CommandResponse, ProtocolError> {
            self.paths.lock().unwrap().push(path.to_string());
            if let Some(cancel) = &self.cancel_on_send {
                cancel.cancel();
            }
            if self.hang {
                std::future::pending::<()>().await;
            }
            match self.response {
                Some((status, body)) => Ok(CommandResponse::new(status, body)),
                None => Err(ProtocolError::ConnectionFailed("refused".to_string())),
            }
        }
    }

    fn endpoint() -> Endpoint {
        Endpoint::new("scope.local", 80)
    }

    #[tokio::test]
    async fn sends_expected_path_and_succeeds_on_200() {
        let client = RecordingClient::answering(200, "");
        let dispatcher = CommandDispatcher::new(client.clone());

        dispatcher
            .execute(
                &endpoint(),
                HeaterTarget::M1,
                DutyCycle::clamped(75),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(client.paths(), vec!["/heaters/set?role=m1&power=75"]);
    }

    #[tokio::test]
    async fn rejection_embeds_label_duty_and_body() {
        let dispatcher = CommandDispatcher::new(RecordingClient::answering(500, " overheat\n"));

        let err = dispatcher
            .execute(
                &endpoint(),
                HeaterTarget::M1,
                DutyCycle::clamped(75),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Primary Mirror Heater"), "{message}");
        assert!(message.contains("75"), "{message}");
        assert!(message.contains("overheat"), "{message}");
        assert!(matches!(
            err,
            DispatchError::Rejected { status: 500, ref detail, .. } if detail == "overheat"
        ));
    }

    #[tokio::test]
    async fn empty_body_still_fails() {
        let dispatcher = CommandDispatcher::new(RecordingClient::answering(404, "  "));
        let err = dispatcher
            .execute(
                &endpoint(),
                HeaterTarget::M2,
                DutyCycle::MAX,
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Rejected { ref detail, .. } if detail.is_empty()));
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        let dispatcher = CommandDispatcher::new(RecordingClient::default());
        let err = dispatcher
            .execute(
                &endpoint(),
                HeaterTarget::M3,
                DutyCycle::clamped(20),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Transport { label: "Tertiary Mirror Heater", duty: 20, .. }
        ));
    }

    #[tokio::test]
    async fn unknown_target_fails_without_request() {
        let client = RecordingClient::answering(200, "");
        let dispatcher = CommandDispatcher::new(client.clone());

        let err = dispatcher
            .execute_raw(&endpoint(), 7, 50, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::UnknownTarget(ref code) if code == "7"));
        assert!(client.paths().is_empty());
    }

    #[tokio::test]
    async fn raw_duty_is_clamped() {
        let client = RecordingClient::answering(200, "");
        let dispatcher = CommandDispatcher::new(client.clone());

        dispatcher
            .execute_raw(&endpoint(), 1, 180, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(client.paths(), vec!["/heaters/set?role=m2&power=100"]);
    }

    #[tokio::test]
    async fn cancelled_before_call_sends_nothing() {
        let client = RecordingClient::answering(200, "");
        let dispatcher = CommandDispatcher::new(client.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = dispatcher
            .execute(&endpoint(), HeaterTarget::M1, DutyCycle::clamped(10), &cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert!(client.paths().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_during_call() {
        let dispatcher = CommandDispatcher::new(RecordingClient::hanging());
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let err = dispatcher
            .execute(&endpoint(), HeaterTarget::M1, DutyCycle::clamped(10), &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::Cancelled { duty: 10, .. }));
    }

    #[tokio::test]
    async fn answer_wins_over_simultaneous_cancellation() {
        let cancel = CancellationToken::new();
        let client = RecordingClient {
            cancel_on_send: Some(cancel.clone()),
            ..RecordingClient::answering(200, "")
        };
        let dispatcher = CommandDispatcher::new(client.clone());

        dispatcher
            .execute(&endpoint(), HeaterTarget::M3, DutyCycle::clamped(40), &cancel)
            .await
            .unwrap();

        assert!(cancel.is_cancelled());
        assert_eq!(client.paths(), vec!["/heaters/set?role=m3&power=40"]);
    }
}
