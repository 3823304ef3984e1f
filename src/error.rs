// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the heater control library.
//!
//! The hierarchy mirrors the stages a heater command goes through: value
//! conversion, transport, response parsing and finally the dispatch itself.
//! Precondition failures (mount disconnected, unknown status) are not errors;
//! they are reported as validation issues.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value conversion.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the controller.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a controller response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A heater command could not be dispatched.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Errors related to value validation and conversion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// A heater identifier does not name any known heater.
    #[error("unknown heater target '{0}'")]
    UnknownTarget(String),
}

/// Errors related to HTTP communication with the controller.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the controller failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The controller answered with a non-success status.
    #[error("HTTP {code}: {body}")]
    Status {
        /// The HTTP status code.
        code: u16,
        /// The trimmed response body.
        body: String,
    },
}

impl ProtocolError {
    /// Returns `true` if the controller could not be reached at all.
    ///
    /// Unreachable hosts, refused or dropped connections and timeouts are
    /// transport failures. A response with an unexpected status is not.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            Self::Http(err) => err.is_connect() || err.is_timeout(),
            Self::ConnectionFailed(_) | Self::Timeout(_) => true,
            Self::Status { .. } => false,
        }
    }
}

/// Errors related to parsing controller responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Errors returned when dispatching a heater command.
///
/// Messages name the heater by its display label and include the requested
/// duty cycle so they can be shown to an operator as-is.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The heater identifier has no wire mapping. No request was sent.
    #[error("unknown heater target '{0}'")]
    UnknownTarget(String),

    /// The controller could not be reached.
    #[error("failed to set {label} to {duty}%: {source}")]
    Transport {
        /// Display label of the heater.
        label: &'static str,
        /// Requested duty cycle.
        duty: u8,
        /// The underlying protocol failure.
        source: ProtocolError,
    },

    /// The controller answered with a non-success status.
    #[error("failed to set {label} to {duty}% (HTTP {status}): {detail}")]
    Rejected {
        /// Display label of the heater.
        label: &'static str,
        /// Requested duty cycle.
        duty: u8,
        /// The HTTP status code.
        status: u16,
        /// Trimmed response body, possibly empty.
        detail: String,
    },

    /// The command was cancelled before the controller answered.
    #[error("setting {label} to {duty}% was cancelled")]
    Cancelled {
        /// Display label of the heater.
        label: &'static str,
        /// Requested duty cycle.
        duty: u8,
    },
}

impl DispatchError {
    /// Returns `true` if the command was cancelled by the caller.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
