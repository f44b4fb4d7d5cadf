// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB LED strip entity.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::command::{Command, LightCommand};
use crate::error::{Error, ParseError};
use crate::event::{EntityId, EventBus};
use crate::protocol::{Endpoint, TcpTransport, Transport};
use crate::response::Reading;
use crate::state::{EntityState, LightState, StateChange};
use crate::types::{PaletteColor, RgbColor};

use super::link::DeviceLink;
use super::EntityInfo;

/// Pause between powering the LED on and selecting a color.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// An RGB LED strip with a fixed eight-color palette.
///
/// Requested colors are snapped to the nearest palette entry. The device
/// ignores color selection while off, so turning on with a color from the
/// off state powers on first, waits for the settle delay, then selects.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use smartwindow_lib::device::{EntityInfo, Light};
/// use smartwindow_lib::event::EntityId;
/// use smartwindow_lib::protocol::{Endpoint, TcpTransport};
/// use smartwindow_lib::types::RgbColor;
///
/// # async fn example() {
/// let light = Light::new(
///     Arc::new(TcpTransport::new()),
///     Endpoint::new("192.168.1.40", "secret"),
///     EntityInfo::new(EntityId::light("w1"), "Kitchen - North"),
/// );
///
/// light.turn_on(Some(RgbColor::new(20, 30, 240))).await;
/// # }
/// ```
#[derive(Debug)]
pub struct Light<T: Transport = TcpTransport> {
    link: DeviceLink<T>,
    state: RwLock<LightState>,
    settle_delay: Duration,
}

impl<T: Transport> Light<T> {
    /// Creates a light assumed off and white.
    #[must_use]
    pub fn new(transport: Arc<T>, endpoint: Endpoint, info: EntityInfo) -> Self {
        Self {
            link: DeviceLink::new(transport, endpoint, info),
            state: RwLock::new(LightState::default()),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Sets the pause between power-on and color selection.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Publishes state changes on `bus`.
    #[must_use]
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.link.set_event_bus(bus);
        self
    }

    /// Shares an exchange lock with other entities of the same device.
    #[must_use]
    pub fn with_exchange_lock(mut self, lock: Arc<Mutex<()>>) -> Self {
        self.link.set_exchange_lock(lock);
        self
    }

    /// Returns the entity id.
    #[must_use]
    pub fn id(&self) -> &EntityId {
        &self.link.info().id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.link.info().name
    }

    /// Returns the device endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        self.link.endpoint()
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> LightState {
        *self.state.read()
    }

    /// Returns the settle delay.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Turns the LED on, optionally selecting the palette color nearest to
    /// `color`.
    ///
    /// If powering on fails, no color is selected.
    pub async fn turn_on(&self, color: Option<RgbColor>) {
        let _guard = self.link.lock().await;
        let target = color.map(PaletteColor::closest_to);
        tracing::info!(
            entity = %self.id(),
            name = %self.name(),
            requested = ?color.map(|c| c.to_hex()),
            palette = ?target.map(|c| c.name()),
            "Turning light on"
        );

        if !self.state.read().is_on() {
            let command = LightCommand::On;
            if let Err(e) = self.link.send(&command).await {
                self.link.report_failure(&command.name(), &e.into());
                return;
            }
            self.apply(StateChange::Power(true));

            if target.is_some() {
                tokio::time::sleep(self.settle_delay).await;
            }
        }

        if let Some(target) = target {
            let command = LightCommand::SelectColor(target);
            match self.link.send(&command).await {
                Ok(_) => {
                    self.apply(StateChange::Color(target));
                }
                Err(e) => self.link.report_failure(&command.name(), &e.into()),
            }
        }
    }

    /// Turns the LED off.
    pub async fn turn_off(&self) {
        let _guard = self.link.lock().await;
        tracing::info!(entity = %self.id(), name = %self.name(), "Turning light off");
        let command = LightCommand::Off;
        if let Err(e) = self.link.send(&command).await {
            self.link.report_failure(&command.name(), &e.into());
        }
        self.apply(StateChange::Power(false));
    }

    /// Polls power state, then the selected color if the LED is on.
    ///
    /// The two queries are independent: a failed color query keeps an
    /// already applied power update.
    pub async fn refresh(&self) {
        let _guard = self.link.lock().await;

        let command = LightCommand::State;
        match self.query_with(&command, Reading::as_bool, "on/off").await {
            Ok(on) => {
                self.apply(StateChange::Power(on));
            }
            Err(e) => self.link.report_failure(&command.name(), &e),
        }

        if !self.state.read().is_on() {
            return;
        }

        let command = LightCommand::ColorState;
        match self
            .query_with(&command, Reading::as_integer, "color index")
            .await
        {
            Ok(index) => {
                self.apply(StateChange::Color(PaletteColor::from_device_index(index)));
            }
            Err(e) => self.link.report_failure(&command.name(), &e),
        }
    }

    async fn query_with<V>(
        &self,
        command: &LightCommand,
        decode: impl FnOnce(&Reading) -> Option<V>,
        expected: &str,
    ) -> Result<V, Error> {
        let reading = self.link.query(command).await?;
        decode(&reading).ok_or_else(|| {
            Error::Parse(ParseError::InvalidValue {
                field: "value".to_string(),
                message: format!("expected {expected}, got {reading}"),
            })
        })
    }

    fn apply(&self, change: StateChange) -> bool {
        let snapshot = {
            let mut state = self.state.write();
            if !state.apply(&change) {
                return false;
            }
            *state
        };
        self.link.publish_change(change, EntityState::Light(snapshot));
        true
    }
}
