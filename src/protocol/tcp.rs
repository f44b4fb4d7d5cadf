// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TCP transport for smart-window devices.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::ProtocolError;
use crate::protocol::{Endpoint, Framing, RawResponse, Request, Transport};

// ============================================================================
// TcpConfig
// ============================================================================

/// Configuration for the TCP transport.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::protocol::TcpConfig;
/// use std::time::Duration;
///
/// let config = TcpConfig::new()
///     .with_timeout(Duration::from_secs(5))
///     .with_read_buffer(2048);
/// assert_eq!(config.read_buffer(), 2048);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpConfig {
    timeout: Duration,
    read_buffer: usize,
}

impl TcpConfig {
    /// Default budget for connect, write and read combined.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default size of the single response read.
    ///
    /// The firmware answers with one small JSON object, so responses are
    /// read once and never drained past this size.
    pub const DEFAULT_READ_BUFFER: usize = 1024;

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            read_buffer: Self::DEFAULT_READ_BUFFER,
        }
    }

    /// Sets the exchange timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the response read size. Zero is bumped to one byte.
    #[must_use]
    pub fn with_read_buffer(mut self, size: usize) -> Self {
        self.read_buffer = size.max(1);
        self
    }

    /// Returns the exchange timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the response read size.
    #[must_use]
    pub fn read_buffer(&self) -> usize {
        self.read_buffer
    }

    /// Creates a `TcpTransport` from this configuration.
    #[must_use]
    pub fn into_transport(self) -> TcpTransport {
        TcpTransport { config: self }
    }
}

impl Default for TcpConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TcpTransport
// ============================================================================

/// Opens one TCP connection per request.
///
/// The stream lives only inside [`Transport::send`]; it is dropped, and thus
/// closed, on success, on error and when the timeout cancels the exchange.
///
/// # Examples
///
/// ```no_run
/// use smartwindow_lib::protocol::{Endpoint, Framing, Request, TcpTransport, Transport};
///
/// # async fn example() -> smartwindow_lib::Result<()> {
/// let transport = TcpTransport::new();
/// let endpoint = Endpoint::new("192.168.1.40", "token");
/// let response = transport
///     .send(&endpoint, &Request::new(endpoint.bearer(), 6), Framing::Bare)
///     .await?;
/// println!("{:?}", response.reading());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Creates a transport with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &TcpConfig {
        &self.config
    }

    async fn exchange(&self, address: &str, payload: &[u8]) -> Result<RawResponse, ProtocolError> {
        let mut stream =
            TcpStream::connect(address)
                .await
                .map_err(|source| ProtocolError::ConnectionFailed {
                    address: address.to_string(),
                    source,
                })?;

        stream.write_all(payload).await?;
        stream.flush().await?;

        let mut buf = vec![0u8; self.config.read_buffer];
        let read = stream.read(&mut buf).await?;
        buf.truncate(read);

        if let Err(e) = stream.shutdown().await {
            tracing::debug!(address, error = %e, "Shutdown after exchange failed");
        }

        if read == 0 {
            return Err(ProtocolError::EmptyResponse);
        }
        Ok(RawResponse::new(buf))
    }
}

impl Transport for TcpTransport {
    async fn send(
        &self,
        endpoint: &Endpoint,
        request: &Request,
        framing: Framing,
    ) -> Result<RawResponse, ProtocolError> {
        let payload = request.encode(framing)?;
        let address = endpoint.address();

        tracing::debug!(
            address = %address,
            op = request.op(),
            args = ?request.args(),
            bytes = payload.len(),
            "Sending device request"
        );

        let budget = self.config.timeout;
        let response = tokio::time::timeout(budget, self.exchange(&address, &payload))
            .await
            .map_err(|_| {
                ProtocolError::Timeout(u64::try_from(budget.as_millis()).unwrap_or(u64::MAX))
            })??;

        tracing::debug!(
            address = %address,
            op = request.op(),
            body = %response.text(),
            "Received device response"
        );

        Ok(response)
    }
}
