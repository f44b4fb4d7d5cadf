// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `SmartWindow` Lib - A Rust library to control `MySmartWindow` devices.
//!
//! Window devices expose motorized blinds, an RGB LED strip, a window
//! actuator and environmental sensors over a small JSON-over-TCP protocol.
//! Every operation opens a fresh connection, sends one signed request and
//! reads one (possibly noisy) response.
//!
//! # Supported Features
//!
//! - **Covers**: open, close, stop, set position (0-100 %), position polling
//! - **Lights**: on/off, nearest-palette color selection, state polling
//! - **Switches**: window open/close, micro-ventilation, state polling
//! - **Sensors**: temperature, humidity, CO2, VOC, IAQ, pressure readings
//! - **Topology**: cloud building tree to entities, optional cloud fetch
//! - **Events**: broadcast of every normalized state change
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use smartwindow_lib::event::EventBus;
//! use smartwindow_lib::protocol::TcpConfig;
//! use smartwindow_lib::topology::{CloudConfig, EntityMapper, MemoryRegistry, SetupOptions};
//!
//! #[tokio::main]
//! async fn main() -> smartwindow_lib::Result<()> {
//!     let cloud = CloudConfig::new().into_client()?;
//!     let topology = cloud.fetch_topology("account-token").await?;
//!
//!     let bus = EventBus::new();
//!     let mut events = bus.subscribe();
//!     let options = SetupOptions::new();
//!
//!     let entities = EntityMapper::new(Arc::new(TcpConfig::new().into_transport()))
//!         .with_options(options.clone())
//!         .with_event_bus(bus)
//!         .map(&topology, &MemoryRegistry::new());
//!
//!     let _polling = entities.spawn_polling(options.poll_interval());
//!
//!     if let Some(cover) = entities.covers.first() {
//!         cover.set_position(50).await?;
//!     }
//!
//!     while let Ok(event) = events.recv().await {
//!         println!("{event:?}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Entity operations never fail because of the network: transport and parse
//! failures are logged with `tracing`, published as
//! [`EntityEvent::Unavailable`](event::EntityEvent::Unavailable), and the last
//! known state is kept. Only caller mistakes (such as a position outside
//! 0-100) are returned as errors.

pub mod command;
pub mod device;
pub mod error;
pub mod event;
pub mod protocol;
pub mod response;
pub mod scheduler;
pub mod state;
pub mod topology;
pub mod types;

pub use command::{Command, CommandName, CoverCommand, LightCommand, SensorCommand, WindowCommand};
pub use device::{Cover, EntityInfo, Light, Sensor, Switch};
pub use error::{Error, ParseError, ProtocolError, Result, TopologyError, ValueError};
pub use event::{EntityEvent, EntityId, EntityKind, EventBus};
pub use protocol::{Endpoint, Framing, RawResponse, Request, TcpConfig, TcpTransport, Transport};
pub use response::Reading;
pub use scheduler::{Poll, PollHandle, spawn_polling};
pub use state::{CoverState, EntityState, LightState, SensorState, StateChange, SwitchState};
pub use topology::{DeviceMetadata, DeviceRegistry, EntityMapper, MemoryRegistry, SetupOptions, Topology};
#[cfg(feature = "cloud")]
pub use topology::{CloudClient, CloudConfig};
pub use types::{PaletteColor, Position, RawPosition, RgbColor, SensorKind};
