// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor classification by opcode.

use std::fmt;

use crate::command::CommandName;

/// What a sensor measures, derived from its declared opcode.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::types::SensorKind;
///
/// let kind = SensorKind::from_opcode(4);
/// assert_eq!(kind, SensorKind::Temperature);
/// assert_eq!(kind.unit(), Some("°C"));
///
/// assert_eq!(SensorKind::from_opcode(99), SensorKind::Other(99));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum SensorKind {
    /// Air temperature.
    Temperature,
    /// Relative humidity.
    Humidity,
    /// Carbon dioxide concentration.
    Co2,
    /// Volatile organic compounds.
    Voc,
    /// Indoor air quality index.
    Iaq,
    /// Barometric pressure.
    Barometer,
    /// Any opcode not known to the catalog as a sensor.
    Other(u16),
}

impl SensorKind {
    /// Classifies a sensor opcode.
    #[must_use]
    pub fn from_opcode(op: u16) -> Self {
        const TEMPERATURE: u16 = CommandName::Temperature.opcode();
        const HUMIDITY: u16 = CommandName::Humidity.opcode();
        const CO2: u16 = CommandName::Co2.opcode();
        const VOC: u16 = CommandName::Voc.opcode();
        const IAQ: u16 = CommandName::Iaq.opcode();
        const BAROMETER: u16 = CommandName::Barometer.opcode();

        match op {
            TEMPERATURE => Self::Temperature,
            HUMIDITY => Self::Humidity,
            CO2 => Self::Co2,
            VOC => Self::Voc,
            IAQ => Self::Iaq,
            BAROMETER => Self::Barometer,
            other => Self::Other(other),
        }
    }

    /// Returns the unit readings are reported in, if known.
    #[must_use]
    pub const fn unit(&self) -> Option<&'static str> {
        match self {
            Self::Temperature => Some("°C"),
            Self::Humidity => Some("%"),
            Self::Co2 => Some("ppm"),
            Self::Voc => Some("ppb"),
            Self::Barometer => Some("hPa"),
            Self::Iaq | Self::Other(_) => None,
        }
    }

    /// Returns a short label.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Temperature => "temperature".to_string(),
            Self::Humidity => "humidity".to_string(),
            Self::Co2 => "co2".to_string(),
            Self::Voc => "voc".to_string(),
            Self::Iaq => "iaq".to_string(),
            Self::Barometer => "pressure".to_string(),
            Self::Other(op) => format!("sensor {op}"),
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
