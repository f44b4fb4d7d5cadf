// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turns a topology tree into live entities.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::device::{Cover, DEFAULT_SETTLE_DELAY, EntityInfo, Light, Sensor, Switch};
use crate::event::{EntityId, EntityKind, EventBus};
use crate::protocol::{Endpoint, TcpTransport, Transport};
use crate::scheduler::{self, PollHandle};

use super::model::{SERVICE_LIGHT, SERVICE_SWITCH, Window};
use super::registry::{DeviceMetadata, DeviceRegistry};
use super::Topology;

const UNKNOWN_ROOM: &str = "Unknown room";
const UNKNOWN_WINDOW: &str = "Unknown window";

/// Options applied to every entity created from a topology.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use smartwindow_lib::topology::SetupOptions;
///
/// let options = SetupOptions::new()
///     .with_poll_interval(Duration::from_secs(30))
///     .with_port(8443);
///
/// assert_eq!(options.poll_interval(), Duration::from_secs(30));
/// assert_eq!(options.settle_delay(), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct SetupOptions {
    poll_interval: Duration,
    settle_delay: Duration,
    port: u16,
}

impl SetupOptions {
    /// Default interval between polls of one entity.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            settle_delay: DEFAULT_SETTLE_DELAY,
            port: Endpoint::DEFAULT_PORT,
        }
    }

    /// Sets the poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the light power-on settle delay.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Sets the device TCP port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Returns the poll interval.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the light settle delay.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Returns the device TCP port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Every entity created from one topology.
#[derive(Debug)]
pub struct Entities<T: Transport = TcpTransport> {
    /// One per window.
    pub covers: Vec<Arc<Cover<T>>>,
    /// One per window tagged `S9`.
    pub lights: Vec<Arc<Light<T>>>,
    /// One per window tagged `S5`.
    pub switches: Vec<Arc<Switch<T>>>,
    /// One per declared sensor.
    pub sensors: Vec<Arc<Sensor<T>>>,
}

impl<T: Transport> Default for Entities<T> {
    fn default() -> Self {
        Self {
            covers: Vec::new(),
            lights: Vec::new(),
            switches: Vec::new(),
            sensors: Vec::new(),
        }
    }
}

impl<T: Transport> Entities<T> {
    /// Returns the total number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.covers.len() + self.lights.len() + self.switches.len() + self.sensors.len()
    }

    /// Returns `true` if no entity was created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the ids of all entities.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.covers
            .iter()
            .map(|e| e.id().clone())
            .chain(self.lights.iter().map(|e| e.id().clone()))
            .chain(self.switches.iter().map(|e| e.id().clone()))
            .chain(self.sensors.iter().map(|e| e.id().clone()))
            .collect()
    }
}

impl<T: Transport + 'static> Entities<T> {
    /// Starts polling every entity every `interval`.
    ///
    /// Polling stops when the returned handles are dropped.
    #[must_use]
    pub fn spawn_polling(&self, interval: Duration) -> Vec<PollHandle> {
        let covers = self
            .covers
            .iter()
            .map(|e| scheduler::spawn_polling(Arc::clone(e), interval));
        let lights = self
            .lights
            .iter()
            .map(|e| scheduler::spawn_polling(Arc::clone(e), interval));
        let switches = self
            .switches
            .iter()
            .map(|e| scheduler::spawn_polling(Arc::clone(e), interval));
        let sensors = self
            .sensors
            .iter()
            .map(|e| scheduler::spawn_polling(Arc::clone(e), interval));
        covers.chain(lights).chain(switches).chain(sensors).collect()
    }
}

/// Creates entities from a [`Topology`].
///
/// Per window: a cover always, a light if tagged `S9`, a switch if tagged
/// `S5`, and one sensor per declared sensor. Windows without an IP address
/// are skipped. All entities of one window share an exchange lock.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use smartwindow_lib::protocol::TcpTransport;
/// use smartwindow_lib::topology::{EntityMapper, MemoryRegistry, Topology};
///
/// let topology = Topology::from_json(r#"[{"Home": {"Bearer": "t", "Rooms": [
///     {"Name": "Hall", "Windows": [{"Id_Window": 1, "Name": "East", "Ip": "10.0.0.2",
///       "Services": ["S9"], "Sensors": [{"Op": 4, "Value": 20}]}]}
/// ]}}]"#).unwrap();
///
/// let registry = MemoryRegistry::new();
/// let entities = EntityMapper::new(Arc::new(TcpTransport::new())).map(&topology, &registry);
///
/// assert_eq!(entities.covers.len(), 1);
/// assert_eq!(entities.lights.len(), 1);
/// assert_eq!(entities.sensors[0].name(), "Hall - East - Sensor 4");
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug)]
pub struct EntityMapper<T> {
    transport: Arc<T>,
    options: SetupOptions,
    events: Option<EventBus>,
}

impl<T: Transport> EntityMapper<T> {
    /// Creates a mapper building entities on `transport`.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            options: SetupOptions::default(),
            events: None,
        }
    }

    /// Sets the options.
    #[must_use]
    pub fn with_options(mut self, options: SetupOptions) -> Self {
        self.options = options;
        self
    }

    /// Wires every entity to `bus`.
    #[must_use]
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Walks `topology`, registers each window with `registry`, and returns
    /// the created entities.
    pub fn map(&self, topology: &Topology, registry: &dyn DeviceRegistry) -> Entities<T> {
        let mut entities = Entities::default();

        for building in topology.buildings() {
            let home = &building.home;
            let bearer = home.bearer.clone().unwrap_or_else(|| {
                tracing::warn!("Home has no bearer token, requests will be unauthenticated");
                String::new()
            });

            for room in &home.rooms {
                let room_name = room.name.as_deref().unwrap_or(UNKNOWN_ROOM);
                for window in &room.windows {
                    self.map_window(window, room_name, &bearer, registry, &mut entities);
                }
            }
        }

        if entities.is_empty() {
            tracing::warn!("Topology produced no entities");
        } else {
            tracing::info!(
                covers = entities.covers.len(),
                lights = entities.lights.len(),
                switches = entities.switches.len(),
                sensors = entities.sensors.len(),
                "Mapped topology"
            );
        }
        entities
    }

    fn map_window(
        &self,
        window: &Window,
        room_name: &str,
        bearer: &str,
        registry: &dyn DeviceRegistry,
        entities: &mut Entities<T>,
    ) {
        let window_name = window.name.as_deref().unwrap_or(UNKNOWN_WINDOW);
        let name = format!("{room_name} - {window_name}");

        let Some(ip) = window.address() else {
            tracing::warn!(window = %name, "Skipping window without IP address");
            return;
        };
        let window_id = window.id.as_deref().unwrap_or(ip);

        let mut capabilities = vec![EntityKind::Cover];
        let has_light = window.has_service(SERVICE_LIGHT);
        let has_switch = window.has_service(SERVICE_SWITCH);
        if has_light {
            capabilities.push(EntityKind::Light);
        }
        if has_switch {
            capabilities.push(EntityKind::Switch);
        }
        if !window.sensors.is_empty() {
            capabilities.push(EntityKind::Sensor);
        }
        let handle = registry.register(window_id, &DeviceMetadata::new(&name, capabilities));

        let endpoint = Endpoint::new(ip, bearer).with_port(self.options.port);
        let lock = Arc::new(Mutex::new(()));
        let info = |id: EntityId, name: String| EntityInfo::new(id, name).with_device(handle);

        let cover = Cover::new(
            Arc::clone(&self.transport),
            endpoint.clone(),
            info(EntityId::cover(window_id), name.clone()),
        )
        .with_exchange_lock(Arc::clone(&lock));
        entities.covers.push(Arc::new(self.wire(cover, Cover::with_event_bus)));

        if has_light {
            let light = Light::new(
                Arc::clone(&self.transport),
                endpoint.clone(),
                info(EntityId::light(window_id), name.clone()),
            )
            .with_settle_delay(self.options.settle_delay)
            .with_exchange_lock(Arc::clone(&lock));
            entities.lights.push(Arc::new(self.wire(light, Light::with_event_bus)));
        }

        if has_switch {
            let switch = Switch::new(
                Arc::clone(&self.transport),
                endpoint.clone(),
                info(EntityId::switch(window_id), name.clone()),
            )
            .with_exchange_lock(Arc::clone(&lock));
            entities.switches.push(Arc::new(self.wire(switch, Switch::with_event_bus)));
        }

        for decl in &window.sensors {
            let sensor = Sensor::new(
                Arc::clone(&self.transport),
                endpoint.clone(),
                info(
                    EntityId::sensor(ip, decl.op),
                    format!("{name} - Sensor {}", decl.op),
                ),
                decl.op,
            )
            .with_initial_value(decl.value.clone())
            .with_exchange_lock(Arc::clone(&lock));
            entities.sensors.push(Arc::new(self.wire(sensor, Sensor::with_event_bus)));
        }

        tracing::debug!(window = %name, ip, "Mapped window");
    }

    fn wire<E>(&self, entity: E, attach: impl FnOnce(E, EventBus) -> E) -> E {
        match &self.events {
            Some(bus) => attach(entity, bus.clone()),
            None => entity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::MockTransport;
    use crate::response::Reading;
    use crate::topology::MemoryRegistry;

    const TREE: &str = r#"[
        {"Home": {"Bearer": "secret", "Rooms": [
            {"Name": "Kitchen", "Windows": [
                {"Id_Window": 1, "Name": "North", "Ip": "10.0.0.2", "Services": ["S9", "S5"],
                 "Sensors": [{"Op": 4, "Value": 21}, {"Op": 58, "Value": null}]},
                {"Id_Window": 2, "Name": "South", "Ip": "10.0.0.3", "Services": []}
            ]},
            {"Windows": [
                {"Id_Window": 3, "Ip": "10.0.0.4", "Services": ["S5"]},
                {"Id_Window": 4, "Name": "Broken", "Services": ["S9"]}
            ]},
            {"Name": "Empty", "Windows": null}
        ]}},
        {"Home": {"Rooms": [
            {"Name": "Shed", "Windows": [{"Name": "Door", "Ip": "10.0.1.2"}]}
        ]}}
    ]"#;

    fn map() -> (Entities<MockTransport>, MemoryRegistry) {
        let topology = Topology::from_json(TREE).unwrap();
        let registry = MemoryRegistry::new();
        let entities =
            EntityMapper::new(Arc::new(MockTransport::new())).map(&topology, &registry);
        (entities, registry)
    }

    #[test]
    fn one_cover_per_addressable_window() {
        let (entities, _) = map();
        let ids: Vec<_> = entities.covers.iter().map(|c| c.id().to_string()).collect();
        assert_eq!(ids, vec!["1-cover", "2-cover", "3-cover", "10.0.1.2-cover"]);
    }

    #[test]
    fn service_tags_gate_lights_and_switches() {
        let (entities, _) = map();
        assert_eq!(entities.lights.len(), 1);
        assert_eq!(entities.lights[0].id().as_str(), "1-light");

        let switches: Vec<_> = entities.switches.iter().map(|s| s.id().to_string()).collect();
        assert_eq!(switches, vec!["1-switch", "3-switch"]);
    }

    #[test]
    fn sensors_are_seeded_and_named() {
        let (entities, _) = map();
        assert_eq!(entities.sensors.len(), 2);

        let temperature = &entities.sensors[0];
        assert_eq!(temperature.id().as_str(), "10.0.0.2-4");
        assert_eq!(temperature.name(), "Kitchen - North - Sensor 4");
        assert_eq!(temperature.state().display_value(), "21");

        assert_eq!(entities.sensors[1].state().display_value(), "unknown");
    }

    #[test]
    fn default_names_and_missing_bearer() {
        let (entities, _) = map();
        assert_eq!(entities.covers[2].name(), "Unknown room - Unknown window");
        assert_eq!(entities.covers[3].endpoint().bearer(), "");
        assert_eq!(entities.covers[0].endpoint().bearer(), "secret");
    }

    #[test]
    fn registers_each_window_once() {
        let (entities, registry) = map();
        assert_eq!(registry.len(), 4);

        let meta = registry.get("1").unwrap();
        assert_eq!(meta.name, "Kitchen - North");
        assert_eq!(meta.model, "Smart Window");

        let device = entities.covers[0].id();
        assert_eq!(device.as_str(), "1-cover");
    }

    #[test]
    fn port_comes_from_options() {
        let topology = Topology::from_json(TREE).unwrap();
        let entities = EntityMapper::new(Arc::new(MockTransport::new()))
            .with_options(SetupOptions::new().with_port(9000))
            .map(&topology, &MemoryRegistry::new());
        assert_eq!(entities.covers[0].endpoint().port(), 9000);
    }

    #[tokio::test]
    async fn entities_of_one_window_share_a_device() {
        let (entities, _) = map();
        assert_eq!(entities.len(), 4 + 1 + 2 + 2);
        assert_eq!(entities.ids().len(), entities.len());

        let mock = Arc::new(MockTransport::with_latency(Duration::from_millis(20)));
        let topology = Topology::from_json(TREE).unwrap();
        let entities = EntityMapper::new(Arc::clone(&mock)).map(&topology, &MemoryRegistry::new());

        tokio::join!(
            entities.covers[0].refresh(),
            entities.lights[0].refresh(),
            entities.switches[0].refresh(),
            entities.sensors[0].refresh(),
        );
        assert_eq!(mock.max_in_flight(), 1);
    }

    #[test]
    fn malformed_sensor_entries_do_not_drop_the_account() {
        let topology = Topology::from_json(
            r#"[{"Home": {"Bearer": "secret", "Rooms": [{"Name": "Hall", "Windows": [
                {"Id_Window": 1, "Name": "East", "Ip": "10.0.0.2", "Services": ["S9"]},
                {"Id_Window": 2, "Name": "West", "Ip": "10.0.0.3",
                 "Sensors": [{"Op": "4", "Value": 21}, {"Value": 7}]}
            ]}]}}]"#,
        )
        .unwrap();

        let entities =
            EntityMapper::new(Arc::new(MockTransport::new())).map(&topology, &MemoryRegistry::new());

        assert_eq!(entities.covers.len(), 2);
        assert_eq!(entities.lights[0].id().as_str(), "1-light");
        assert_eq!(entities.sensors.len(), 1);
        assert_eq!(entities.sensors[0].id().as_str(), "10.0.0.3-4");
        assert_eq!(entities.sensors[0].state().value(), Some(&Reading::Integer(21)));
    }
}
