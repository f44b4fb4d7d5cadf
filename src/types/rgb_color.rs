// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Requested light color.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A color as requested by the host, with 8-bit channels.
///
/// The LED strip cannot show arbitrary colors; lights snap the request to
/// the nearest [`PaletteColor`](super::PaletteColor).
///
/// # Examples
///
/// ```
/// use smartwindow_lib::types::{PaletteColor, RgbColor};
///
/// let requested: RgbColor = "#F01010".parse().unwrap();
/// assert_eq!(requested, RgbColor::new(240, 16, 16));
/// assert_eq!(PaletteColor::closest_to(requested), PaletteColor::Red);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses `RRGGBB` or `RGB`, with or without a leading `#`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` for any other input.
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let invalid = || ValueError::InvalidHexColor(hex.to_string());
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let packed = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        let [_, r, g, b] = packed.to_be_bytes();
        match digits.len() {
            6 => Ok(Self::new(r, g, b)),
            // each shorthand digit is repeated: F -> FF
            3 => {
                let nibble = |shift: u32| u8::try_from((packed >> shift) & 0xF).unwrap_or(0) * 17;
                Ok(Self::new(nibble(8), nibble(4), nibble(0)))
            }
            _ => Err(invalid()),
        }
    }

    /// Returns the red channel.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green channel.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue channel.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Uppercase `RRGGBB`, no prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Sum of absolute per-channel differences.
    #[must_use]
    pub fn l1_distance(&self, other: &Self) -> u16 {
        [
            self.red.abs_diff(other.red),
            self.green.abs_diff(other.green),
            self.blue.abs_diff(other.blue),
        ]
        .into_iter()
        .map(u16::from)
        .sum()
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for RgbColor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}
