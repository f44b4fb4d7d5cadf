// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host device registry collaborator.

use parking_lot::Mutex;

use crate::event::EntityKind;

/// Manufacturer reported for every window device.
pub const MANUFACTURER: &str = "MySmartWindow";

/// Firmware version reported for every window device.
pub const SW_VERSION: &str = "1.0";

/// Description of one physical window device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMetadata {
    /// Display name, `"<room> - <window>"`.
    pub name: String,
    /// Always [`MANUFACTURER`].
    pub manufacturer: String,
    /// Model string derived from the capabilities.
    pub model: String,
    /// Firmware version string.
    pub sw_version: String,
    /// Entity kinds created for this device.
    pub capabilities: Vec<EntityKind>,
}

impl DeviceMetadata {
    /// Creates metadata for a window exposing `capabilities`.
    #[must_use]
    pub fn new(name: impl Into<String>, capabilities: Vec<EntityKind>) -> Self {
        Self {
            name: name.into(),
            manufacturer: MANUFACTURER.to_string(),
            model: model_for(&capabilities).to_string(),
            sw_version: SW_VERSION.to_string(),
            capabilities,
        }
    }
}

fn model_for(capabilities: &[EntityKind]) -> &'static str {
    let has = |kind| capabilities.contains(&kind);
    match (has(EntityKind::Light), has(EntityKind::Switch)) {
        (true, true) => "Smart Window",
        (false, true) => "Smart Switch",
        (true, false) => "Smart Light",
        (false, false) => "Smart Cover",
    }
}

/// Opaque handle returned by a registry for a registered device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistryHandle(pub u64);

/// The host platform's device registry.
///
/// Registration is get-or-create: registering the same `device_id` twice
/// must return the same handle.
pub trait DeviceRegistry: Send + Sync {
    /// Registers (or looks up) a device.
    fn register(&self, device_id: &str, metadata: &DeviceMetadata) -> RegistryHandle;
}

/// In-memory registry for tests and simple hosts.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    devices: Mutex<Vec<(String, DeviceMetadata)>>,
}

impl MemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.lock().len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.lock().is_empty()
    }

    /// Returns the metadata registered under `device_id`.
    #[must_use]
    pub fn get(&self, device_id: &str) -> Option<DeviceMetadata> {
        self.devices
            .lock()
            .iter()
            .find(|(id, _)| id == device_id)
            .map(|(_, meta)| meta.clone())
    }
}

impl DeviceRegistry for MemoryRegistry {
    fn register(&self, device_id: &str, metadata: &DeviceMetadata) -> RegistryHandle {
        let mut devices = self.devices.lock();
        if let Some(index) = devices.iter().position(|(id, _)| id == device_id) {
            return RegistryHandle(index as u64);
        }
        devices.push((device_id.to_string(), metadata.clone()));
        RegistryHandle((devices.len() - 1) as u64)
    }
}
