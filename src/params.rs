// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater command parameters.
//!
//! [`ParameterStore`] holds the selected heater and duty cycle of one
//! command instance and broadcasts a [`ParameterChange`] whenever a setter
//! actually changes a value.
//!
//! # Examples
//!
//! ```
//! use heater_control::params::{ParameterChange, ParameterStore};
//! use heater_control::types::HeaterTarget;
//!
//! let mut params = ParameterStore::default();
//! let mut rx = params.subscribe();
//!
//! // Out-of-range values are clamped
//! assert!(params.set_duty_cycle(140));
//! assert_eq!(params.duty_cycle().value(), 100);
//!
//! // Setting the same value again changes nothing
//! assert!(!params.set_duty_cycle(100));
//!
//! assert!(matches!(rx.try_recv(), Ok(ParameterChange::DutyCycle { .. })));
//! assert!(rx.try_recv().is_err());
//! ```

use tokio::sync::broadcast;

use crate::types::{DutyCycle, HeaterTarget};

/// Default channel capacity for parameter change notifications.
const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// A change applied to a [`ParameterStore`].
///
/// Every change carries the recomputed display label so that observers do
/// not need access to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterChange {
    /// The selected heater changed.
    Target {
        /// The new heater.
        target: HeaterTarget,
        /// The recomputed display label.
        label: String,
    },
    /// The duty cycle changed.
    DutyCycle {
        /// The new (clamped) duty cycle.
        duty: DutyCycle,
        /// The recomputed display label.
        label: String,
    },
}

/// Selected heater and duty cycle for one command instance.
///
/// Cloning produces an independent store with the same values and its own
/// notification channel.
#[derive(Debug)]
pub struct ParameterStore {
    target: HeaterTarget,
    duty_cycle: DutyCycle,
    changes: broadcast::Sender<ParameterChange>,
}

impl ParameterStore {
    /// Creates a store with the given values.
    #[must_use]
    pub fn new(target: HeaterTarget, duty_cycle: DutyCycle) -> Self {
        let (changes, _) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);
        Self {
            target,
            duty_cycle,
            changes,
        }
    }

    /// Returns the selected heater.
    #[must_use]
    pub fn target(&self) -> HeaterTarget {
        self.target
    }

    /// Returns the stored duty cycle.
    #[must_use]
    pub fn duty_cycle(&self) -> DutyCycle {
        self.duty_cycle
    }

    /// Returns the display label, e.g. `"Primary Mirror Heater @ 75%"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} @ {}", self.target.label(), self.duty_cycle)
    }

    /// Selects a heater. Returns `true` if the selection changed.
    pub fn set_target(&mut self, target: HeaterTarget) -> bool {
        let previous = std::mem::replace(&mut self.target, target);
        if previous == target {
            return false;
        }
        self.publish(ParameterChange::Target {
            target,
            label: self.label(),
        });
        true
    }

    /// Sets the duty cycle, clamping to 0-100. Returns `true` if the stored
    /// value changed.
    pub fn set_duty_cycle(&mut self, requested: i64) -> bool {
        let duty = DutyCycle::clamped(requested);
        if duty == self.duty_cycle {
            return false;
        }
        self.duty_cycle = duty;
        self.publish(ParameterChange::DutyCycle {
            duty,
            label: self.label(),
        });
        true
    }

    /// Subscribes to parameter changes made after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ParameterChange> {
        self.changes.subscribe()
    }

    fn publish(&self, change: ParameterChange) {
        tracing::trace!(?change, "Heater parameters changed");
        // No subscribers is fine
        let _ = self.changes.send(change);
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(HeaterTarget::default(), DutyCycle::default())
    }
}

impl Clone for ParameterStore {
    fn clone(&self) -> Self {
        Self::new(self.target, self.duty_cycle)
    }
}
