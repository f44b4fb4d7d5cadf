// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan-out of entity events to hosts.

use tokio::sync::broadcast;

use super::EntityEvent;

const DEFAULT_CAPACITY: usize = 256;

/// Broadcast channel shared by every entity of a setup.
///
/// Entities publish, hosts subscribe. Publishing never waits: a subscriber
/// that falls more than `capacity` events behind gets `RecvError::Lagged`
/// and resumes at the oldest retained event. Clones share one channel.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::event::{EntityEvent, EntityId, EventBus};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let bus = EventBus::new();
/// let mut events = bus.subscribe();
///
/// bus.publish(EntityEvent::unavailable(EntityId::cover("w1"), "refused"));
///
/// let event = events.recv().await.unwrap();
/// assert!(!event.is_state_change());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EntityEvent>,
}

impl EventBus {
    /// Creates a bus retaining up to 256 undelivered events.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a bus retaining up to `capacity` undelivered events (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Returns a receiver for events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EntityEvent> {
        self.sender.subscribe()
    }

    /// Number of live receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Sends `event` to every current subscriber.
    pub fn publish(&self, event: EntityEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("No subscribers for entity event");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
