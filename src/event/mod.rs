// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for entity state changes.
//!
//! Entities publish an [`EntityEvent`] on an [`EventBus`] whenever a command
//! or poll changes their normalized state, or when an exchange fails. Hosts
//! subscribe to the bus instead of polling snapshots.
//!
//! # Examples
//!
//! ```
//! use smartwindow_lib::event::{EntityEvent, EntityId, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(EntityEvent::unavailable(EntityId::light("w1"), "refused"));
//! ```

mod entity_event;
mod entity_id;
mod event_bus;

pub use entity_event::EntityEvent;
pub use entity_id::{EntityId, EntityKind};
pub use event_bus::EventBus;
