// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scripted in-memory transport for entity tests.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::ProtocolError;
use crate::protocol::{Endpoint, Framing, RawResponse, Request, Transport};

/// One recorded exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub address: String,
    pub op: u16,
    pub args: Option<u16>,
    pub framing: Framing,
}

enum Reply {
    Bytes(Vec<u8>),
    Timeout,
    Refused,
}

/// Replays scripted replies in order and records every request.
///
/// Once the script is exhausted every call times out.
#[derive(Default)]
pub(crate) struct MockTransport {
    script: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Call>>,
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes every exchange take `latency` before replying.
    pub(crate) fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub(crate) fn respond(&self, bytes: &[u8]) {
        self.script.lock().push_back(Reply::Bytes(bytes.to_vec()));
    }

    pub(crate) fn fail_timeout(&self) {
        self.script.lock().push_back(Reply::Timeout);
    }

    pub(crate) fn fail_refused(&self) {
        self.script.lock().push_back(Reply::Refused);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub(crate) fn opcodes(&self) -> Vec<u16> {
        self.calls.lock().iter().map(|c| c.op).collect()
    }

    /// Highest number of exchanges that were ever in progress at once.
    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Transport for MockTransport {
    async fn send(
        &self,
        endpoint: &Endpoint,
        request: &Request,
        framing: Framing,
    ) -> Result<RawResponse, ProtocolError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        self.calls.lock().push(Call {
            address: endpoint.address(),
            op: request.op(),
            args: request.args(),
            framing,
        });

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let reply = self.script.lock().pop_front();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match reply {
            Some(Reply::Bytes(bytes)) => Ok(RawResponse::new(bytes)),
            Some(Reply::Refused) => Err(ProtocolError::ConnectionFailed {
                address: endpoint.address(),
                source: io::Error::from(io::ErrorKind::ConnectionRefused),
            }),
            Some(Reply::Timeout) | None => Err(ProtocolError::Timeout(10_000)),
        }
    }
}
