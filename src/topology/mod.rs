// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Account topology: buildings, rooms and windows, and the entities they map
//! to.
//!
//! The tree is fetched once from the cloud API (see [`CloudClient`], behind
//! the `cloud` feature) or supplied by the host as JSON. [`EntityMapper`]
//! walks it once at setup and creates one entity per declared capability.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use smartwindow_lib::protocol::TcpTransport;
//! use smartwindow_lib::topology::{EntityMapper, MemoryRegistry, Topology};
//!
//! let json = r#"{"Remote_Data": {"Creator_Buildings": [
//!     {"Home": {"Bearer": "t", "Rooms": [{"Name": "Hall", "Windows": [
//!         {"Id_Window": 9, "Name": "West", "Ip": "10.0.0.8", "Services": ["S5"]}
//!     ]}]}}
//! ]}}"#;
//!
//! let topology = Topology::from_json(json).unwrap();
//! let entities = EntityMapper::new(Arc::new(TcpTransport::new()))
//!     .map(&topology, &MemoryRegistry::new());
//!
//! assert_eq!(entities.switches[0].name(), "Hall - West");
//! ```

#[cfg(feature = "cloud")]
mod cloud;
mod mapper;
mod model;
mod registry;

#[cfg(feature = "cloud")]
pub use cloud::{CloudClient, CloudConfig};
pub use mapper::{Entities, EntityMapper, SetupOptions};
pub use model::{Building, Home, Room, SERVICE_LIGHT, SERVICE_SWITCH, SensorDecl, Window};
pub use registry::{
    DeviceMetadata, DeviceRegistry, MANUFACTURER, MemoryRegistry, RegistryHandle, SW_VERSION,
};

use serde::Deserialize;

use crate::error::TopologyError;

/// The building tree of one account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    buildings: Vec<Building>,
}

/// The cloud response wrapper around the buildings array.
#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "Remote_Data")]
    remote: RemoteData,
}

#[derive(Deserialize)]
struct RemoteData {
    #[serde(rename = "Creator_Buildings", default)]
    buildings: Option<Vec<serde_json::Value>>,
}

impl Topology {
    /// Creates a topology from already decoded buildings.
    #[must_use]
    pub fn new(buildings: Vec<Building>) -> Self {
        Self { buildings }
    }

    /// Parses a topology document.
    ///
    /// Accepts either the buildings array itself or the cloud response
    /// envelope `{"Remote_Data": {"Creator_Buildings": [...]}}`.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::Malformed` if the document has neither shape,
    /// or `TopologyError::Empty` if it holds no decodable building. Rooms,
    /// windows and sensors that do not decode are skipped with a warning.
    pub fn from_json(json: &str) -> Result<Self, TopologyError> {
        // the first token picks the shape so serde reports the field that failed
        let entries = if json.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<serde_json::Value>>(json)?
        } else {
            serde_json::from_str::<Envelope>(json)?
                .remote
                .buildings
                .unwrap_or_default()
        };
        let buildings: Vec<Building> = model::decode_entries(entries);

        if buildings.is_empty() {
            return Err(TopologyError::Empty);
        }
        Ok(Self { buildings })
    }

    /// Returns the buildings.
    #[must_use]
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Iterates over every window together with its room name.
    pub fn windows(&self) -> impl Iterator<Item = (Option<&str>, &Window)> {
        self.buildings
            .iter()
            .flat_map(|b| &b.home.rooms)
            .flat_map(|room| room.windows.iter().map(move |w| (room.name.as_deref(), w)))
    }
}
