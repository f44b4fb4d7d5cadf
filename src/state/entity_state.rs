// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized state snapshots, one per entity kind.

use chrono::{DateTime, Utc};

use crate::response::Reading;
use crate::types::{PaletteColor, Position, RawPosition};

use super::StateChange;

/// Tracked state of a motorized blind.
///
/// `position` is `None` until the first successful poll or position command.
/// The opening/closing flags are optimistic: set when a movement command is
/// issued and cleared by the next successful poll.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::state::{CoverState, StateChange};
/// use smartwindow_lib::types::RawPosition;
///
/// let mut state = CoverState::default();
/// state.apply(&StateChange::Position(RawPosition::new(60).unwrap()));
/// assert_eq!(state.percent().unwrap().value(), 50);
/// assert_eq!(state.is_closed(), Some(false));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CoverState {
    position: Option<RawPosition>,
    is_opening: bool,
    is_closing: bool,
}

impl CoverState {
    /// Returns the raw position, if known.
    #[must_use]
    pub const fn position(&self) -> Option<RawPosition> {
        self.position
    }

    /// Returns the host-facing percentage (100 = open), if known.
    #[must_use]
    pub fn percent(&self) -> Option<Position> {
        self.position.map(|raw| raw.to_percent())
    }

    /// Returns whether the blind is fully closed, if known.
    #[must_use]
    pub fn is_closed(&self) -> Option<bool> {
        self.position.map(|raw| raw.is_closed())
    }

    /// Returns `true` while an "up" command is believed in progress.
    #[must_use]
    pub const fn is_opening(&self) -> bool {
        self.is_opening
    }

    /// Returns `true` while a "down" command is believed in progress.
    #[must_use]
    pub const fn is_closing(&self) -> bool {
        self.is_closing
    }

    /// Applies a change, returning `true` if anything changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Position(raw) => replace(&mut self.position, Some(*raw)),
            StateChange::Motion { opening, closing } => {
                let a = replace(&mut self.is_opening, *opening);
                let b = replace(&mut self.is_closing, *closing);
                a || b
            }
            StateChange::Batch(changes) => apply_all(changes, |c| self.apply(c)),
            _ => false,
        }
    }
}

/// Tracked state of the LED strip.
///
/// The color defaults to white until the device reports otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct LightState {
    is_on: bool,
    color: PaletteColor,
}

impl LightState {
    /// Returns `true` if the LED is on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.is_on
    }

    /// Returns the selected palette color.
    #[must_use]
    pub const fn color(&self) -> PaletteColor {
        self.color
    }

    /// Applies a change, returning `true` if anything changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Power(on) => replace(&mut self.is_on, *on),
            StateChange::Color(color) => replace(&mut self.color, *color),
            StateChange::Batch(changes) => apply_all(changes, |c| self.apply(c)),
            _ => false,
        }
    }
}

/// Tracked state of the window actuator. `is_on` means open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct SwitchState {
    is_on: bool,
    micro_open: bool,
}

impl SwitchState {
    /// Returns `true` if the window is open.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.is_on
    }

    /// Returns `true` if the window is in micro-ventilation position.
    #[must_use]
    pub const fn micro_open(&self) -> bool {
        self.micro_open
    }

    /// Applies a change, returning `true` if anything changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Open(open) => replace(&mut self.is_on, *open),
            StateChange::MicroOpen(open) => replace(&mut self.micro_open, *open),
            StateChange::Batch(changes) => apply_all(changes, |c| self.apply(c)),
            _ => false,
        }
    }
}

/// Tracked state of one sensor.
///
/// Holds the last known value. A failed read never clears it.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct SensorState {
    value: Option<Reading>,
    updated_at: Option<DateTime<Utc>>,
}

impl SensorState {
    /// Creates a state seeded with an initial value.
    #[must_use]
    pub fn seeded(value: Option<Reading>) -> Self {
        Self {
            value,
            updated_at: None,
        }
    }

    /// Returns the last known value.
    #[must_use]
    pub fn value(&self) -> Option<&Reading> {
        self.value.as_ref()
    }

    /// Returns the last known value as display text, `"unknown"` if none.
    #[must_use]
    pub fn display_value(&self) -> String {
        self.value
            .as_ref()
            .map_or_else(|| "unknown".to_string(), ToString::to_string)
    }

    /// Returns when the value was last read from the device.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Applies a change, returning `true` if the value changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Reading { value, at } => {
                self.updated_at = Some(*at);
                replace(&mut self.value, Some(value.clone()))
            }
            StateChange::Batch(changes) => apply_all(changes, |c| self.apply(c)),
            _ => false,
        }
    }
}

/// Snapshot of any entity, as published on the event bus.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum EntityState {
    /// Blind snapshot.
    Cover(CoverState),
    /// LED snapshot.
    Light(LightState),
    /// Window actuator snapshot.
    Switch(SwitchState),
    /// Sensor snapshot.
    Sensor(SensorState),
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

fn apply_all(changes: &[StateChange], mut apply: impl FnMut(&StateChange) -> bool) -> bool {
    changes.iter().fold(false, |changed, c| apply(c) || changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_starts_unknown() {
        let state = CoverState::default();
        assert_eq!(state.position(), None);
        assert_eq!(state.percent(), None);
        assert_eq!(state.is_closed(), None);
        assert!(!state.is_opening());
    }

    #[test]
    fn cover_motion_flags() {
        let mut state = CoverState::default();
        assert!(state.apply(&StateChange::opening()));
        assert!(state.is_opening());
        assert!(!state.is_closing());

        assert!(state.apply(&StateChange::closing()));
        assert!(!state.is_opening());
        assert!(state.is_closing());

        assert!(state.apply(&StateChange::stopped()));
        assert!(!state.apply(&StateChange::stopped()));
    }

    #[test]
    fn cover_ignores_unrelated_changes() {
        let mut state = CoverState::default();
        assert!(!state.apply(&StateChange::Power(true)));
        assert_eq!(state, CoverState::default());
    }

    #[test]
    fn light_defaults_to_white_off() {
        let state = LightState::default();
        assert!(!state.is_on());
        assert_eq!(state.color(), PaletteColor::White);
    }

    #[test]
    fn light_batch_reports_any_change() {
        let mut state = LightState::default();
        let batch = StateChange::Batch(vec![
            StateChange::Power(false),
            StateChange::Color(PaletteColor::Blue),
        ]);
        assert!(state.apply(&batch));
        assert_eq!(state.color(), PaletteColor::Blue);
        assert!(!state.apply(&batch));
    }

    #[test]
    fn switch_tracks_open_and_micro() {
        let mut state = SwitchState::default();
        assert!(state.apply(&StateChange::Open(true)));
        assert!(state.apply(&StateChange::MicroOpen(true)));
        assert!(state.is_on());
        assert!(state.micro_open());
        assert!(!state.apply(&StateChange::Open(true)));
    }

    #[test]
    fn sensor_display_unknown_until_read() {
        let mut state = SensorState::default();
        assert_eq!(state.display_value(), "unknown");

        state.apply(&StateChange::reading_now(Reading::Number(21.5)));
        assert_eq!(state.display_value(), "21.5");
        assert!(state.updated_at().is_some());
    }

    #[test]
    fn sensor_same_value_still_stamps_time() {
        let mut state = SensorState::seeded(Some(Reading::Integer(400)));
        assert!(state.updated_at().is_none());
        assert!(!state.apply(&StateChange::reading_now(Reading::Integer(400))));
        assert!(state.updated_at().is_some());
    }
}
