// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only environmental sensor entity.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::command::{Command, SensorCommand};
use crate::event::{EntityId, EventBus};
use crate::protocol::{Endpoint, TcpTransport, Transport};
use crate::response::Reading;
use crate::state::{EntityState, SensorState, StateChange};
use crate::types::SensorKind;

use super::link::DeviceLink;
use super::EntityInfo;

/// One sensor on a window device, read with the opcode the device declares
/// for it.
///
/// A failed read keeps the last known value.
#[derive(Debug)]
pub struct Sensor<T: Transport = TcpTransport> {
    link: DeviceLink<T>,
    command: SensorCommand,
    state: RwLock<SensorState>,
}

impl<T: Transport> Sensor<T> {
    /// Creates a sensor with no known value.
    #[must_use]
    pub fn new(transport: Arc<T>, endpoint: Endpoint, info: EntityInfo, op: u16) -> Self {
        Self {
            link: DeviceLink::new(transport, endpoint, info),
            command: SensorCommand::new(op),
            state: RwLock::new(SensorState::default()),
        }
    }

    /// Seeds the last known value, typically from the topology.
    #[must_use]
    pub fn with_initial_value(mut self, value: Option<Reading>) -> Self {
        *self.state.get_mut() = SensorState::seeded(value);
        self
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

    /// Returns the sensor opcode.
    #[must_use]
    pub fn op(&self) -> u16 {
        self.command.opcode()
    }

    /// Returns what this sensor measures.
    #[must_use]
    pub fn kind(&self) -> SensorKind {
        SensorKind::from_opcode(self.op())
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SensorState {
        self.state.read().clone()
    }

    /// Reads the sensor, updating the last known value on success.
    pub async fn refresh(&self) {
        let _guard = self.link.lock().await;
        match self.link.query(&self.command).await {
            Ok(value) => {
                tracing::debug!(entity = %self.id(), kind = %self.kind(), value = %value, "Sensor read");
                let change = StateChange::reading_now(value);
                let snapshot = {
                    let mut state = self.state.write();
                    if !state.apply(&change) {
                        return;
                    }
                    state.clone()
                };
                self.link.publish_change(change, EntityState::Sensor(snapshot));
            }
            Err(e) => self.link.report_failure(&self.command.name(), &e),
        }
    }
}
