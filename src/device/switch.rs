// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Window actuator entity.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::command::{Command, WindowCommand};
use crate::error::{Error, ParseError};
use crate::event::{EntityId, EventBus};
use crate::protocol::{Endpoint, TcpTransport, Transport};
use crate::state::{EntityState, StateChange, SwitchState};

use super::link::DeviceLink;
use super::EntityInfo;

/// A motorized window exposed as an on (open) / off (closed) switch.
///
/// State is set optimistically before the command is sent and corrected by
/// the next poll.
#[derive(Debug)]
pub struct Switch<T: Transport = TcpTransport> {
    link: DeviceLink<T>,
    state: RwLock<SwitchState>,
}

impl<T: Transport> Switch<T> {
    /// Creates a switch assumed closed.
    #[must_use]
    pub fn new(transport: Arc<T>, endpoint: Endpoint, info: EntityInfo) -> Self {
        Self {
            link: DeviceLink::new(transport, endpoint, info),
            state: RwLock::new(SwitchState::default()),
        }
    }

    /// Publishes state changes on `bus`.
    #[must_use]
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.link.set_event_bus(bus);
        self
    }

    /// Shares an exchange lock with other entities of the same device.
    #[must_use]
    pub fn with_exchange_lock(mut self, lock: Arc<Mutex<()>>) -> Self {
        self.link.set_exchange_lock(lock);
        self
    }

    /// Returns the entity id.
    #[must_use]
    pub fn id(&self) -> &EntityId {
        &self.link.info().id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.link.info().name
    }

    /// Returns the device endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        self.link.endpoint()
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SwitchState {
        *self.state.read()
    }

    /// Opens the window.
    pub async fn turn_on(&self) {
        let _guard = self.link.lock().await;
        tracing::info!(entity = %self.id(), name = %self.name(), "Opening window");
        self.apply(StateChange::Open(true));
        self.issue(WindowCommand::Open).await;
    }

    /// Closes the window.
    pub async fn turn_off(&self) {
        let _guard = self.link.lock().await;
        tracing::info!(entity = %self.id(), name = %self.name(), "Closing window");
        self.apply(StateChange::Batch(vec![
            StateChange::Open(false),
            StateChange::MicroOpen(false),
        ]));
        self.issue(WindowCommand::Close).await;
    }

    /// Opens the window to the micro-ventilation position.
    pub async fn micro_open(&self) {
        let _guard = self.link.lock().await;
        tracing::info!(entity = %self.id(), name = %self.name(), "Micro-opening window");
        self.apply(StateChange::Batch(vec![
            StateChange::Open(true),
            StateChange::MicroOpen(true),
        ]));
        self.issue(WindowCommand::MicroOpen).await;
    }

    /// Polls whether the window is open. A closed window is also no longer
    /// micro-ventilated.
    pub async fn refresh(&self) {
        let _guard = self.link.lock().await;
        self.poll_open().await;
    }

    /// Polls whether the window is in micro-ventilation position.
    pub async fn refresh_micro(&self) {
        let _guard = self.link.lock().await;
        self.poll_micro().await;
    }

    /// Polls the open flag, then the micro-ventilation flag, as one
    /// operation. The second query is skipped when the window reads closed.
    pub async fn refresh_all(&self) {
        let _guard = self.link.lock().await;
        if self.poll_open().await != Some(false) {
            self.poll_micro().await;
        }
    }

    async fn poll_open(&self) -> Option<bool> {
        let open = self.query_flag(WindowCommand::State).await?;
        let change = if open {
            StateChange::Open(true)
        } else {
            StateChange::Batch(vec![StateChange::Open(false), StateChange::MicroOpen(false)])
        };
        self.apply(change);
        Some(open)
    }

    async fn poll_micro(&self) {
        if let Some(micro) = self.query_flag(WindowCommand::MicroState).await {
            self.apply(StateChange::MicroOpen(micro));
        }
    }

    async fn issue(&self, command: WindowCommand) {
        if let Err(e) = self.link.send(&command).await {
            self.link.report_failure(&command.name(), &e.into());
        }
    }

    async fn query_flag(&self, command: WindowCommand) -> Option<bool> {
        let result = self.link.query(&command).await.and_then(|reading| {
            reading.as_bool().ok_or_else(|| {
                Error::Parse(ParseError::InvalidValue {
                    field: "value".to_string(),
                    message: format!("expected open/closed flag, got {reading}"),
                })
            })
        });

        match result {
            Ok(flag) => Some(flag),
            Err(e) => {
                self.link.report_failure(&command.name(), &e);
                None
            }
        }
    }

    fn apply(&self, change: StateChange) -> bool {
        let snapshot = {
            let mut state = self.state.write();
            if !state.apply(&change) {
                return false;
            }
            *state
        };
        self.link.publish_change(change, EntityState::Switch(snapshot));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::MockTransport;

    fn switch(mock: &Arc<MockTransport>) -> Switch<MockTransport> {
        Switch::new(
            Arc::clone(mock),
            Endpoint::new("10.0.0.5", "tok"),
            EntityInfo::new(EntityId::switch("w1"), "Room - Window"),
        )
    }

    #[tokio::test]
    async fn turn_on_is_optimistic_even_on_failure() {
        let mock = Arc::new(MockTransport::new());
        mock.fail_refused();
        let switch = switch(&mock);

        switch.turn_on().await;

        assert_eq!(mock.opcodes(), vec![54]);
        assert!(switch.state().is_on());
    }

    #[tokio::test]
    async fn refresh_corrects_divergent_state() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"{}");
        mock.respond(b"{\"value\": false}");
        let switch = switch(&mock);

        switch.turn_on().await;
        assert!(switch.state().is_on());

        switch.refresh().await;
        assert_eq!(mock.opcodes(), vec![54, 55]);
        assert!(!switch.state().is_on());
    }

    #[tokio::test]
    async fn integer_flags_are_accepted() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"{\"value\": 1}");
        let switch = switch(&mock);

        switch.refresh().await;

        assert!(switch.state().is_on());
    }

    #[tokio::test]
    async fn unparseable_refresh_keeps_state() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"{}");
        mock.respond(b"{\"value\": \"half\"}");
        mock.respond(b"{\"other\": 1}");
        let switch = switch(&mock);

        switch.turn_on().await;
        switch.refresh().await;
        switch.refresh().await;

        assert!(switch.state().is_on());
    }

    #[tokio::test]
    async fn micro_open_and_close() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"{}");
        mock.respond(b"{\"value\": true}");
        mock.respond(b"{}");
        let switch = switch(&mock);

        switch.micro_open().await;
        assert!(switch.state().micro_open());
        assert!(switch.state().is_on());

        switch.refresh_micro().await;
        switch.turn_off().await;

        assert_eq!(mock.opcodes(), vec![73, 74, 53]);
        assert!(!switch.state().micro_open());
        assert!(!switch.state().is_on());
    }

    #[tokio::test]
    async fn closed_reading_clears_micro_ventilation() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"{}");
        mock.respond(b"{\"value\": false}");
        let switch = switch(&mock);

        switch.micro_open().await;
        assert!(switch.state().micro_open());

        switch.refresh().await;

        assert_eq!(mock.opcodes(), vec![73, 55]);
        assert!(!switch.state().is_on());
        assert!(!switch.state().micro_open());
    }

    #[tokio::test]
    async fn refresh_all_queries_micro_when_open() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"{\"value\": true}");
        mock.respond(b"{\"value\": true}");
        let switch = switch(&mock);

        switch.refresh_all().await;

        assert_eq!(mock.opcodes(), vec![55, 74]);
        assert!(switch.state().is_on());
        assert!(switch.state().micro_open());
    }

    #[tokio::test]
    async fn refresh_all_skips_micro_when_closed() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"{}");
        mock.respond(b"{\"value\": 0}");
        let switch = switch(&mock);

        switch.micro_open().await;
        switch.refresh_all().await;

        assert_eq!(mock.opcodes(), vec![73, 55]);
        assert!(!switch.state().micro_open());
    }

    #[tokio::test]
    async fn refresh_all_still_queries_micro_after_failed_open_query() {
        let mock = Arc::new(MockTransport::new());
        mock.fail_timeout();
        mock.respond(b"{\"value\": false}");
        let switch = switch(&mock);

        switch.refresh_all().await;

        assert_eq!(mock.opcodes(), vec![55, 74]);
        assert!(!switch.state().micro_open());
    }
}
