// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Motorized blind entity.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::command::{Command, CoverCommand};
use crate::error::{Error, ParseError, ValueError};
use crate::event::{EntityId, EventBus};
use crate::protocol::{Endpoint, TcpTransport, Transport};
use crate::state::{CoverState, EntityState, StateChange};
use crate::types::{Position, RawPosition};

use super::link::DeviceLink;
use super::EntityInfo;

/// A motorized blind.
///
/// Movement commands set optimistic opening/closing flags and are always
/// followed by an immediate position poll. Network and parse failures are
/// logged and leave the last known state in place.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use smartwindow_lib::device::{Cover, EntityInfo};
/// use smartwindow_lib::event::EntityId;
/// use smartwindow_lib::protocol::{Endpoint, TcpTransport};
///
/// # async fn example() {
/// let cover = Cover::new(
///     Arc::new(TcpTransport::new()),
///     Endpoint::new("192.168.1.40", "secret"),
///     EntityInfo::new(EntityId::cover("w1"), "Kitchen - North"),
/// );
///
/// cover.set_position(75).await.unwrap();
/// println!("now at {:?}", cover.state().percent());
/// # }
/// ```
#[derive(Debug)]
pub struct Cover<T: Transport = TcpTransport> {
    link: DeviceLink<T>,
    state: RwLock<CoverState>,
}

impl<T: Transport> Cover<T> {
    /// Creates a cover with unknown position.
    #[must_use]
    pub fn new(transport: Arc<T>, endpoint: Endpoint, info: EntityInfo) -> Self {
        Self {
            link: DeviceLink::new(transport, endpoint, info),
            state: RwLock::new(CoverState::default()),
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
    pub fn state(&self) -> CoverState {
        *self.state.read()
    }

    /// Raises the blind.
    pub async fn open(&self) {
        let _guard = self.link.lock().await;
        tracing::info!(entity = %self.id(), name = %self.name(), "Opening cover");
        self.issue(CoverCommand::Up).await;
        self.apply(StateChange::opening());
        self.poll().await;
    }

    /// Lowers the blind.
    pub async fn close(&self) {
        let _guard = self.link.lock().await;
        tracing::info!(entity = %self.id(), name = %self.name(), "Closing cover");
        self.issue(CoverCommand::Down).await;
        self.apply(StateChange::closing());
        self.poll().await;
    }

    /// Stops any movement.
    pub async fn stop(&self) {
        let _guard = self.link.lock().await;
        tracing::info!(entity = %self.id(), name = %self.name(), "Stopping cover");
        self.issue(CoverCommand::Stop).await;
        self.apply(StateChange::stopped());
        self.poll().await;
    }

    /// Moves the blind to `percent` (0 = closed, 100 = open).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `percent` is outside 0-100; no
    /// request is sent in that case. Network failures are not errors.
    pub async fn set_position(&self, percent: i64) -> Result<(), ValueError> {
        let target = Position::new(percent).inspect_err(|e| {
            tracing::error!(entity = %self.id(), name = %self.name(), error = %e, "Rejecting cover position");
        })?;
        let raw = target.to_raw();

        let _guard = self.link.lock().await;
        tracing::info!(
            entity = %self.id(),
            name = %self.name(),
            percent = target.value(),
            raw = raw.value(),
            "Setting cover position"
        );
        self.issue(CoverCommand::SetPosition(raw)).await;
        self.apply(StateChange::Position(raw));
        self.poll().await;
        Ok(())
    }

    /// Polls the device for the current position.
    pub async fn refresh(&self) {
        let _guard = self.link.lock().await;
        self.poll().await;
    }

    async fn issue(&self, command: CoverCommand) {
        if let Err(e) = self.link.send(&command).await {
            self.link.report_failure(&command.name(), &e.into());
        }
    }

    async fn poll(&self) {
        let command = CoverCommand::State;
        let raw = self
            .link
            .query(&command)
            .await
            .and_then(|reading| {
                reading.as_integer().ok_or_else(|| {
                    Error::Parse(ParseError::InvalidValue {
                        field: "value".to_string(),
                        message: format!("expected integer position, got {reading}"),
                    })
                })
            })
            .and_then(|value| RawPosition::new(value).map_err(Error::from));

        match raw {
            Ok(raw) => {
                let change = StateChange::Batch(vec![
                    StateChange::Position(raw),
                    StateChange::stopped(),
                ]);
                if !self.apply(change) {
                    tracing::debug!(entity = %self.id(), raw = raw.value(), "Cover state unchanged");
                }
            }
            Err(e) => self.link.report_failure(&command.name(), &e),
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
        self.link.publish_change(change, EntityState::Cover(snapshot));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::MockTransport;

    fn cover(mock: &Arc<MockTransport>) -> Cover<MockTransport> {
        Cover::new(
            Arc::clone(mock),
            Endpoint::new("10.0.0.5", "tok"),
            EntityInfo::new(EntityId::cover("w1"), "Room - Window"),
        )
    }

    #[tokio::test]
    async fn refresh_reads_raw_position() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"\x00{\"value\": 60}\x00");
        let cover = cover(&mock);

        cover.refresh().await;

        let state = cover.state();
        assert_eq!(state.position(), Some(RawPosition::new(60).unwrap()));
        assert_eq!(state.percent().unwrap().value(), 50);
        assert_eq!(state.is_closed(), Some(false));
        assert_eq!(mock.opcodes(), vec![6]);
    }

    #[tokio::test]
    async fn fully_lowered_is_closed() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"{\"value\": 120}");
        let cover = cover(&mock);

        cover.refresh().await;

        assert_eq!(cover.state().is_closed(), Some(true));
        assert_eq!(cover.state().percent().unwrap().value(), 0);
    }

    #[tokio::test]
    async fn out_of_range_position_is_discarded() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"{\"value\": 60}");
        mock.respond(b"{\"value\": 500}");
        let cover = cover(&mock);

        cover.refresh().await;
        cover.refresh().await;

        assert_eq!(cover.state().position(), Some(RawPosition::new(60).unwrap()));
    }

    #[tokio::test]
    async fn garbage_and_failures_leave_state() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"{\"value\": 30}");
        mock.respond(b"no json here");
        mock.fail_timeout();
        mock.respond(b"{\"value\": \"abc\"}");
        let cover = cover(&mock);

        for _ in 0..4 {
            cover.refresh().await;
        }

        assert_eq!(cover.state().position(), Some(RawPosition::new(30).unwrap()));
    }

    #[tokio::test]
    async fn open_sets_flag_then_refreshes() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"{}");
        mock.fail_timeout();
        let cover = cover(&mock);

        cover.open().await;

        assert_eq!(mock.opcodes(), vec![7, 6]);
        assert!(cover.state().is_opening());
        assert!(!cover.state().is_closing());
    }

    #[tokio::test]
    async fn successful_poll_clears_motion_flags() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"{}");
        mock.respond(b"{\"value\": 120}");
        let cover = cover(&mock);

        cover.close().await;

        assert_eq!(mock.opcodes(), vec![8, 6]);
        assert!(!cover.state().is_closing());
        assert_eq!(cover.state().is_closed(), Some(true));
    }

    #[tokio::test]
    async fn command_failure_keeps_optimistic_flag() {
        let mock = Arc::new(MockTransport::new());
        mock.fail_refused();
        mock.fail_refused();
        let cover = cover(&mock);

        cover.close().await;

        assert!(cover.state().is_closing());
        assert_eq!(cover.state().position(), None);
    }

    #[tokio::test]
    async fn stop_clears_flags() {
        let mock = Arc::new(MockTransport::new());
        mock.fail_timeout();
        mock.fail_timeout();
        mock.fail_timeout();
        mock.fail_timeout();
        let cover = cover(&mock);

        cover.open().await;
        cover.stop().await;

        assert_eq!(mock.opcodes(), vec![7, 6, 9, 6]);
        assert!(!cover.state().is_opening());
        assert!(!cover.state().is_closing());
    }

    #[tokio::test]
    async fn set_position_sends_raw_units() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"{}");
        mock.fail_timeout();
        let cover = cover(&mock);

        cover.set_position(25).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls[0].op, 63);
        assert_eq!(calls[0].args, Some(90));
        assert_eq!(cover.state().position(), Some(RawPosition::new(90).unwrap()));
        assert_eq!(cover.state().percent().unwrap().value(), 25);
    }

    #[tokio::test]
    async fn set_position_out_of_range_sends_nothing() {
        let mock = Arc::new(MockTransport::new());
        let cover = cover(&mock);

        let err = cover.set_position(150).await.unwrap_err();

        assert_eq!(
            err,
            ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: 150
            }
        );
        assert!(mock.calls().is_empty());
        assert_eq!(cover.state(), CoverState::default());
    }

    #[tokio::test]
    async fn publishes_changes_only() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(b"{\"value\": 0}");
        mock.respond(b"{\"value\": 0}");
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let cover = cover(&mock).with_event_bus(bus);

        cover.refresh().await;
        cover.refresh().await;

        let event = rx.try_recv().unwrap();
        assert!(event.is_state_change());
        assert!(rx.try_recv().is_err());
    }
}
