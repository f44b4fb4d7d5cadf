// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plumbing shared by every entity: transport, endpoint, exchange lock and
//! event publication.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::command::Command;
use crate::error::{Error, ProtocolError};
use crate::event::{EntityEvent, EventBus};
use crate::protocol::{Endpoint, RawResponse, Transport};
use crate::response::Reading;
use crate::state::{EntityState, StateChange};

use super::EntityInfo;

#[derive(Debug)]
pub(crate) struct DeviceLink<T> {
    transport: Arc<T>,
    endpoint: Endpoint,
    info: EntityInfo,
    exchange_lock: Arc<Mutex<()>>,
    events: Option<EventBus>,
}

impl<T: Transport> DeviceLink<T> {
    pub(crate) fn new(transport: Arc<T>, endpoint: Endpoint, info: EntityInfo) -> Self {
        Self {
            transport,
            endpoint,
            info,
            exchange_lock: Arc::new(Mutex::new(())),
            events: None,
        }
    }

    pub(crate) fn set_event_bus(&mut self, bus: EventBus) {
        self.events = Some(bus);
    }

    pub(crate) fn set_exchange_lock(&mut self, lock: Arc<Mutex<()>>) {
        self.exchange_lock = lock;
    }

    pub(crate) fn info(&self) -> &EntityInfo {
        &self.info
    }

    pub(crate) fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Serializes whole operations against the device. Held across the
    /// command and its follow-up refresh.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, ()> {
        self.exchange_lock.lock().await
    }

    pub(crate) async fn send<C: Command + Sync>(
        &self,
        command: &C,
    ) -> Result<RawResponse, ProtocolError> {
        let request = command.to_request(self.endpoint.bearer());
        self.transport
            .send(&self.endpoint, &request, command.framing())
            .await
    }

    pub(crate) async fn query<C: Command + Sync>(&self, command: &C) -> Result<Reading, Error> {
        let response = self.send(command).await?;
        Ok(response.reading()?)
    }

    pub(crate) fn publish_change(&self, change: StateChange, new_state: EntityState) {
        if let Some(bus) = &self.events {
            bus.publish(EntityEvent::state_changed(
                self.info.id.clone(),
                change,
                new_state,
            ));
        }
    }

    /// Logs a failed exchange and publishes it. State is never touched here.
    pub(crate) fn report_failure(&self, action: &str, error: &Error) {
        if matches!(error, Error::Parse(_)) {
            tracing::warn!(
                entity = %self.info.id,
                name = %self.info.name,
                ip = %self.endpoint.ip(),
                action,
                error = %error,
                "Discarding unusable device response"
            );
        } else {
            tracing::error!(
                entity = %self.info.id,
                name = %self.info.name,
                ip = %self.endpoint.ip(),
                action,
                error = %error,
                "Device exchange failed"
            );
        }

        if let Some(bus) = &self.events {
            bus.publish(EntityEvent::unavailable(
                self.info.id.clone(),
                error.to_string(),
            ));
        }
    }
}
