// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic polling of entities.
//!
//! Each entity gets its own tokio task, so a slow or unreachable device only
//! delays its own polls. A hung exchange fails after the transport timeout
//! and the entity is tried again on the next tick; missed ticks are skipped
//! rather than replayed.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::device::{Cover, Light, Sensor, Switch};
use crate::event::EntityId;
use crate::protocol::Transport;

/// An entity that can refresh its state from the device.
pub trait Poll: Send + Sync + 'static {
    /// Returns the entity id.
    fn entity_id(&self) -> &EntityId;

    /// Refreshes state once. Never fails; errors are logged by the entity.
    fn poll(&self) -> impl Future<Output = ()> + Send;
}

impl<T: Transport + 'static> Poll for Cover<T> {
    fn entity_id(&self) -> &EntityId {
        self.id()
    }

    async fn poll(&self) {
        self.refresh().await;
    }
}

impl<T: Transport + 'static> Poll for Light<T> {
    fn entity_id(&self) -> &EntityId {
        self.id()
    }

    async fn poll(&self) {
        self.refresh().await;
    }
}

impl<T: Transport + 'static> Poll for Switch<T> {
    fn entity_id(&self) -> &EntityId {
        self.id()
    }

    async fn poll(&self) {
        self.refresh_all().await;
    }
}

impl<T: Transport + 'static> Poll for Sensor<T> {
    fn entity_id(&self) -> &EntityId {
        self.id()
    }

    async fn poll(&self) {
        self.refresh().await;
    }
}

/// Handle to a polling task. Dropping it stops polling.
#[derive(Debug)]
pub struct PollHandle {
    entity_id: EntityId,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Returns the polled entity.
    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Returns `true` once the task has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops polling.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Polls `entity` every `interval`, starting immediately.
///
/// Must be called from within a tokio runtime.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use smartwindow_lib::device::{EntityInfo, Sensor};
/// use smartwindow_lib::event::EntityId;
/// use smartwindow_lib::protocol::{Endpoint, TcpTransport};
/// use smartwindow_lib::scheduler::spawn_polling;
///
/// # async fn example() {
/// let sensor = Arc::new(Sensor::new(
///     Arc::new(TcpTransport::new()),
///     Endpoint::new("192.168.1.40", "secret"),
///     EntityInfo::new(EntityId::sensor("192.168.1.40", 4), "Hall - East - Sensor 4"),
///     4,
/// ));
///
/// let handle = spawn_polling(sensor, Duration::from_secs(15));
/// // ...
/// handle.stop();
/// # }
/// ```
#[must_use = "polling stops when the handle is dropped"]
pub fn spawn_polling<E: Poll>(entity: Arc<E>, interval: Duration) -> PollHandle {
    let entity_id = entity.entity_id().clone();
    // interval() panics on a zero period
    let period = interval.max(Duration::from_millis(1));

    tracing::debug!(entity = %entity_id, period = ?period, "Starting polling");

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            entity.poll().await;
        }
    });

    PollHandle { entity_id, task }
}
