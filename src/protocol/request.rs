// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire request model and device endpoints.

use std::fmt;
use std::net::Ipv6Addr;

use serde::Serialize;

use crate::error::ProtocolError;

/// How a serialized request is terminated on the wire.
///
/// Covers, lights and windows take the bare JSON object. The sensor firmware
/// expects a trailing newline after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// The JSON object alone.
    #[default]
    Bare,
    /// The JSON object followed by `\n`.
    Newline,
}

/// A signed device request.
///
/// Serializes to `{"bearer": <token>, "type": "plain", "op": <int>, "args"?: <int>}`.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::protocol::{Framing, Request};
///
/// let request = Request::new("secret", 63).with_args(60);
/// let bytes = request.encode(Framing::Bare).unwrap();
/// assert_eq!(
///     String::from_utf8(bytes).unwrap(),
///     r#"{"bearer":"secret","type":"plain","op":63,"args":60}"#
/// );
/// ```
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Request {
    bearer: String,
    #[serde(rename = "type")]
    kind: &'static str,
    op: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    args: Option<u16>,
}

impl Request {
    /// Creates a request for `op` signed with `bearer`.
    #[must_use]
    pub fn new(bearer: impl Into<String>, op: u16) -> Self {
        Self {
            bearer: bearer.into(),
            kind: "plain",
            op,
            args: None,
        }
    }

    /// Attaches the integer argument.
    #[must_use]
    pub fn with_args(mut self, args: u16) -> Self {
        self.args = Some(args);
        self
    }

    /// Returns the opcode.
    #[must_use]
    pub fn op(&self) -> u16 {
        self.op
    }

    /// Returns the argument, if any.
    #[must_use]
    pub fn args(&self) -> Option<u16> {
        self.args
    }

    /// Serializes the request with the given framing.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    pub fn encode(&self, framing: Framing) -> Result<Vec<u8>, ProtocolError> {
        let mut bytes = serde_json::to_vec(self).map_err(ProtocolError::Encode)?;
        if framing == Framing::Newline {
            bytes.push(b'\n');
        }
        Ok(bytes)
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("bearer", &"<redacted>")
            .field("op", &self.op)
            .field("args", &self.args)
            .finish()
    }
}

/// Where and how to reach one physical device.
///
/// Immutable once built: the IP and token come from the one-shot topology
/// fetch and do not change during a session.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    ip: String,
    port: u16,
    bearer: String,
}

impl Endpoint {
    /// Port the device firmware listens on.
    pub const DEFAULT_PORT: u16 = 443;

    /// Creates an endpoint on the default port.
    #[must_use]
    pub fn new(ip: impl Into<String>, bearer: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            port: Self::DEFAULT_PORT,
            bearer: bearer.into(),
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Returns the device IP address.
    #[must_use]
    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// Returns the device port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the bearer token.
    #[must_use]
    pub fn bearer(&self) -> &str {
        &self.bearer
    }

    /// Returns `ip:port`, ready to dial. IPv6 literals are bracketed.
    #[must_use]
    pub fn address(&self) -> String {
        self.to_string()
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("ip", &self.ip)
            .field("port", &self.port)
            .field("bearer", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ip.parse::<Ipv6Addr>().is_ok() {
            write!(f, "[{}]:{}", self.ip, self.port)
        } else {
            write!(f, "{}:{}", self.ip, self.port)
        }
    }
}
