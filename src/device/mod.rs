// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device entities.
//!
//! Each physical window device can expose up to four kinds of entity:
//!
//! | Entity | Commands | Poll |
//! |--------|----------|------|
//! | [`Cover`] | open, close, stop, set position | raw blind position |
//! | [`Light`] | turn on (with color), turn off | power, then palette color |
//! | [`Switch`] | open, close, micro-open | open flag, then micro-ventilation flag |
//! | [`Sensor`] | none | one reading |
//!
//! Every entity owns its normalized state and mutates it only from its own
//! methods. Operations against one entity are serialized by an exchange lock
//! held for the whole operation (a command and its follow-up poll form one
//! unit). Entities built for the same device by the
//! [`topology`](crate::topology) mapper share one lock, so the device never
//! sees two connections at once. Different devices run fully in parallel.
//!
//! Failures never propagate out of an entity: they are logged, published as
//! [`EntityEvent::Unavailable`](crate::event::EntityEvent::Unavailable), and
//! the last known state is kept.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use smartwindow_lib::device::{Cover, EntityInfo};
//! use smartwindow_lib::event::{EntityId, EventBus};
//! use smartwindow_lib::protocol::{Endpoint, TcpConfig};
//!
//! # async fn example() {
//! let transport = Arc::new(TcpConfig::new().into_transport());
//! let bus = EventBus::new();
//! let mut events = bus.subscribe();
//!
//! let cover = Cover::new(
//!     transport,
//!     Endpoint::new("192.168.1.40", "secret"),
//!     EntityInfo::new(EntityId::cover("w1"), "Office - East"),
//! )
//! .with_event_bus(bus);
//!
//! cover.open().await;
//! while let Ok(event) = events.try_recv() {
//!     println!("{event:?}");
//! }
//! # }
//! ```

mod cover;
mod light;
mod link;
mod sensor;
mod switch;

#[cfg(test)]
pub(crate) mod testing;

pub use cover::Cover;
pub use light::{DEFAULT_SETTLE_DELAY, Light};
pub use sensor::Sensor;
pub use switch::Switch;

use crate::event::EntityId;
use crate::topology::RegistryHandle;

/// Identity and display name of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityInfo {
    /// Stable unique id.
    pub id: EntityId,
    /// Human-readable name, e.g. `"Kitchen - North"`.
    pub name: String,
    /// Registry entry of the physical device, if registered.
    pub device: Option<RegistryHandle>,
}

impl EntityInfo {
    /// Creates entity info.
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            device: None,
        }
    }

    /// Links the entity to a registered device.
    #[must_use]
    pub fn with_device(mut self, handle: RegistryHandle) -> Self {
        self.device = Some(handle);
        self
    }
}
