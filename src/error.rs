// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `smartwindow_lib` library.
//!
//! This module provides the error hierarchy used across the library: value
//! validation, protocol communication, response parsing and topology mapping.
//!
//! Device entities never surface protocol or parse errors to their callers.
//! These types exist so the lower layers ([`Transport`](crate::protocol::Transport),
//! [`response`](crate::response)) can report precise failures, which the
//! entities then log and degrade to "no state change".

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred while reading the device topology.
    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),
}

/// Errors related to value validation and constraints.
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

    /// A color index that is not part of the device palette.
    #[error("color index {0} is not in the palette [1, 8]")]
    InvalidColorIndex(i64),

    /// A hex color string could not be parsed.
    #[error("invalid hex color: {0}")]
    InvalidHexColor(String),

    /// A command name that is not in the catalog.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

/// Errors related to protocol communication with a device or the cloud.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request to the cloud API failed.
    #[cfg(feature = "cloud")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the device failed or was refused.
    #[error("connection to {address} failed: {source}")]
    ConnectionFailed {
        /// The `ip:port` that was dialed.
        address: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No complete exchange within the configured budget.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Reading from or writing to an established connection failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The device closed the connection without sending anything.
    #[error("device closed the connection without a response")]
    EmptyResponse,

    /// The request could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The cloud API rejected the token.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The cloud API answered with an unexpected status.
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),
}

/// Errors related to parsing device responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The response did not contain anything that looks like a JSON object.
    #[error("no JSON object in response: {0:?}")]
    NoJsonObject(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// A field was present but held an unusable value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to the cloud-supplied topology tree.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// The topology document is not valid JSON or has the wrong shape.
    #[error("malformed topology: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The topology did not contain any building.
    #[error("topology contains no buildings")]
    Empty,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
