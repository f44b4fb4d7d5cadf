// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed catalog of named device operations and their opcodes.
//!
//! Names are the ones the device firmware documentation uses (including the
//! Spanish `HUMEDITY` and `BAROMETRO`), so they can be matched against
//! configuration or log output verbatim.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A named operation understood by the device firmware.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::command::CommandName;
///
/// assert_eq!(CommandName::BlindUp.opcode(), 7);
/// assert_eq!(CommandName::BlindUp.as_str(), "BLIND UP");
///
/// let parsed: CommandName = "LED COLOR SELECTION".parse().unwrap();
/// assert_eq!(parsed.opcode(), 65);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    /// Power the LED strip on.
    LedOn,
    /// Power the LED strip off.
    LedOff,
    /// Query LED power state.
    LedState,
    /// Select a palette color (argument: color index).
    LedColorSelection,
    /// Query the selected palette color.
    LedColorState,
    /// Open the window.
    WindowOpen,
    /// Close the window.
    WindowClose,
    /// Query window open/closed state.
    WindowState,
    /// Open the window in micro-ventilation position.
    WindowMicroOpen,
    /// Query micro-ventilation state.
    WindowMicroState,
    /// Raise the blind.
    BlindUp,
    /// Lower the blind.
    BlindDown,
    /// Stop blind movement.
    BlindStop,
    /// Query raw blind position.
    BlindState,
    /// Move blind to a raw position (argument: 0-120).
    BlindPositionUnit,
    /// Read temperature sensor.
    Temperature,
    /// Read humidity sensor.
    Humidity,
    /// Read CO2 sensor.
    Co2,
    /// Read volatile organic compounds sensor.
    Voc,
    /// Read indoor air quality index.
    Iaq,
    /// Read barometric pressure.
    Barometer,
    /// Read all sensors at once.
    OpSensors,
}

impl CommandName {
    /// Every catalog entry, in catalog order.
    pub const ALL: [Self; 22] = [
        Self::LedOn,
        Self::LedOff,
        Self::LedState,
        Self::LedColorSelection,
        Self::LedColorState,
        Self::WindowOpen,
        Self::WindowClose,
        Self::WindowState,
        Self::WindowMicroOpen,
        Self::WindowMicroState,
        Self::BlindUp,
        Self::BlindDown,
        Self::BlindStop,
        Self::BlindState,
        Self::BlindPositionUnit,
        Self::Temperature,
        Self::Humidity,
        Self::Co2,
        Self::Voc,
        Self::Iaq,
        Self::Barometer,
        Self::OpSensors,
    ];

    /// Returns the wire opcode for this operation.
    #[must_use]
    pub const fn opcode(&self) -> u16 {
        match self {
            Self::LedOn => 60,
            Self::LedOff => 61,
            Self::LedState => 66,
            Self::LedColorSelection => 65,
            Self::LedColorState => 68,
            Self::WindowOpen => 54,
            Self::WindowClose => 53,
            Self::WindowState => 55,
            Self::WindowMicroOpen => 73,
            Self::WindowMicroState => 74,
            Self::BlindUp => 7,
            Self::BlindDown => 8,
            Self::BlindStop => 9,
            Self::BlindState => 6,
            Self::BlindPositionUnit => 63,
            Self::Temperature => 4,
            Self::Humidity => 5,
            Self::Co2 => 58,
            Self::Voc => 59,
            Self::Iaq => 71,
            Self::Barometer => 72,
            Self::OpSensors => 62,
        }
    }

    /// Returns the catalog name of this operation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LedOn => "LED ON",
            Self::LedOff => "LED OFF",
            Self::LedState => "LED STATE",
            Self::LedColorSelection => "LED COLOR SELECTION",
            Self::LedColorState => "LED COLOR STATE",
            Self::WindowOpen => "WINDOW OPEN",
            Self::WindowClose => "WINDOW CLOSE",
            Self::WindowState => "WINDOW STATE",
            Self::WindowMicroOpen => "WINDOW MICRO OPEN",
            Self::WindowMicroState => "WINDOW MICRO STATE",
            Self::BlindUp => "BLIND UP",
            Self::BlindDown => "BLIND DOWN",
            Self::BlindStop => "BLIND STOP",
            Self::BlindState => "BLIND STATE",
            Self::BlindPositionUnit => "BLIND POSITION UNIT",
            Self::Temperature => "TEMPERATURE",
            Self::Humidity => "HUMEDITY",
            Self::Co2 => "Co2",
            Self::Voc => "VOC",
            Self::Iaq => "IAQ",
            Self::Barometer => "BAROMETRO",
            Self::OpSensors => "OP_SENSORS",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ValueError::UnknownCommand(s.to_string()))
    }
}

/// Looks up the opcode for a catalog name.
///
/// Returns `None` for names that are not in the catalog.
#[must_use]
pub fn lookup(name: &str) -> Option<u16> {
    name.parse::<CommandName>().ok().map(|c| c.opcode())
}

/// Iterates over all `(name, opcode)` catalog entries.
pub fn entries() -> impl Iterator<Item = (&'static str, u16)> {
    CommandName::ALL
        .into_iter()
        .map(|c| (c.as_str(), c.opcode()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = entries().map(|(name, _)| name).collect();
        assert_eq!(names.len(), CommandName::ALL.len());
    }

    #[test]
    fn opcodes_are_unique() {
        let ops: HashSet<_> = entries().map(|(_, op)| op).collect();
        assert_eq!(ops.len(), CommandName::ALL.len());
    }

    #[test]
    fn lookup_known_names() {
        assert_eq!(lookup("BLIND STATE"), Some(6));
        assert_eq!(lookup("BLIND POSITION UNIT"), Some(63));
        assert_eq!(lookup("HUMEDITY"), Some(5));
        assert_eq!(lookup("OP_SENSORS"), Some(62));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(lookup("blind up"), None);
        assert_eq!(lookup("CO2"), None);
        assert_eq!(lookup("Co2"), Some(58));
    }

    #[test]
    fn parse_unknown_name() {
        let err = "BLIND SIDEWAYS".parse::<CommandName>().unwrap_err();
        assert_eq!(err, ValueError::UnknownCommand("BLIND SIDEWAYS".to_string()));
    }

    #[test]
    fn display_matches_catalog_name() {
        for name in CommandName::ALL {
            assert_eq!(name.to_string(), name.as_str());
        }
    }
}
