// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity identifier type.

use std::fmt;

/// The kind of entity an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum EntityKind {
    /// Motorized blind.
    Cover,
    /// RGB LED strip.
    Light,
    /// Window actuator.
    Switch,
    /// Environmental sensor.
    Sensor,
}

impl EntityKind {
    /// Returns the lowercase suffix used in unique ids.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Light => "light",
            Self::Switch => "switch",
            Self::Sensor => "sensor",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable unique identifier of one entity.
///
/// Window entities are keyed by the cloud window id plus their kind; sensors
/// by device IP and sensor opcode, since one window may carry several.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::event::{EntityId, EntityKind};
///
/// let id = EntityId::cover("w-17");
/// assert_eq!(id.to_string(), "w-17-cover");
/// assert_eq!(id.kind(), EntityKind::Cover);
///
/// let id = EntityId::sensor("192.168.1.40", 4);
/// assert_eq!(id.to_string(), "192.168.1.40-4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct EntityId {
    kind: EntityKind,
    unique_id: String,
}

impl EntityId {
    /// Creates the id of a window's blind.
    #[must_use]
    pub fn cover(window_id: &str) -> Self {
        Self::for_window(window_id, EntityKind::Cover)
    }

    /// Creates the id of a window's LED strip.
    #[must_use]
    pub fn light(window_id: &str) -> Self {
        Self::for_window(window_id, EntityKind::Light)
    }

    /// Creates the id of a window's actuator.
    #[must_use]
    pub fn switch(window_id: &str) -> Self {
        Self::for_window(window_id, EntityKind::Switch)
    }

    /// Creates the id of a sensor on the device at `ip`.
    #[must_use]
    pub fn sensor(ip: &str, op: u16) -> Self {
        Self {
            kind: EntityKind::Sensor,
            unique_id: format!("{ip}-{op}"),
        }
    }

    fn for_window(window_id: &str, kind: EntityKind) -> Self {
        Self {
            kind,
            unique_id: format!("{window_id}-{kind}"),
        }
    }

    /// Returns the entity kind.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns the unique id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.unique_id
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unique_id)
    }
}
