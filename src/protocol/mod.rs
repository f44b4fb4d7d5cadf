// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport for the device command protocol.
//!
//! Every operation is one independent connection cycle: connect, write one
//! JSON request, read one response, close. There is no pooling and no retry;
//! a failed attempt is reported to the caller, which decides whether to keep
//! stale state.
//!
//! - [`Request`] / [`Framing`]: the signed wire request
//! - [`Endpoint`]: address and token of one device
//! - [`Transport`]: the request/response seam entities are generic over
//! - [`TcpTransport`]: the real TCP implementation

mod request;
mod tcp;

use std::future::Future;

pub use request::{Endpoint, Framing, Request};
pub use tcp::{TcpConfig, TcpTransport};

use crate::error::{ParseError, ProtocolError};
use crate::response::{self, Reading};

/// Raw bytes returned by a device for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    bytes: Vec<u8>,
}

impl RawResponse {
    /// Wraps raw response bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Returns the raw bytes as received.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the response with null bytes stripped, lossily decoded.
    #[must_use]
    pub fn text(&self) -> String {
        response::scrub(&self.bytes)
    }

    /// Decodes the `value` field of the embedded JSON object.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if no object can be extracted or it has no
    /// usable `value`.
    pub fn reading(&self) -> Result<Reading, ParseError> {
        response::parse_reading(&self.bytes)
    }
}

/// Request/response exchange with a device.
///
/// Implementations must open a fresh connection per call and release it on
/// every exit path, including timeouts.
pub trait Transport: Send + Sync {
    /// Sends `request` to `endpoint` and returns the single response read.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the device cannot be reached, the exchange
    /// exceeds the timeout budget, or the connection fails mid-exchange.
    fn send(
        &self,
        endpoint: &Endpoint,
        request: &Request,
        framing: Framing,
    ) -> impl Future<Output = Result<RawResponse, ProtocolError>> + Send;
}
