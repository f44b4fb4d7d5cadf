// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The fixed LED palette.
//!
//! The LED controller only knows eight colors, selected by index 1-8.
//! Arbitrary RGB requests are snapped to the closest palette entry.

use std::fmt;

use crate::error::ValueError;

use super::RgbColor;

/// One of the eight colors the LED controller can display.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::types::{PaletteColor, RgbColor};
///
/// assert_eq!(PaletteColor::White.index(), 5);
/// assert_eq!(PaletteColor::from_index(6).unwrap(), PaletteColor::Blue);
///
/// // Requests snap to the nearest entry.
/// let nearest = PaletteColor::closest_to(RgbColor::new(250, 10, 5));
/// assert_eq!(nearest, PaletteColor::Red);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum PaletteColor {
    /// Index 1.
    Red,
    /// Index 2.
    Yellow,
    /// Index 3.
    Green,
    /// Index 4.
    Orange,
    /// Index 5, the fallback.
    #[default]
    White,
    /// Index 6.
    Blue,
    /// Index 7.
    Violet,
    /// Index 8.
    Pink,
}

impl PaletteColor {
    /// Palette entries in index order.
    pub const ALL: [Self; 8] = [
        Self::Red,
        Self::Yellow,
        Self::Green,
        Self::Orange,
        Self::White,
        Self::Blue,
        Self::Violet,
        Self::Pink,
    ];

    /// Looks up a palette entry by its device index.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidColorIndex` for indices outside 1-8.
    pub fn from_index(index: i64) -> Result<Self, ValueError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(ValueError::InvalidColorIndex(index))
    }

    /// Maps a device-reported index, falling back to white when unknown.
    #[must_use]
    pub fn from_device_index(index: i64) -> Self {
        Self::from_index(index).unwrap_or_else(|_| {
            tracing::warn!(index, "Unknown LED color index, falling back to white");
            Self::White
        })
    }

    /// Returns the device index (1-8).
    #[must_use]
    pub const fn index(&self) -> u8 {
        match self {
            Self::Red => 1,
            Self::Yellow => 2,
            Self::Green => 3,
            Self::Orange => 4,
            Self::White => 5,
            Self::Blue => 6,
            Self::Violet => 7,
            Self::Pink => 8,
        }
    }

    /// Returns the RGB value displayed for this entry.
    #[must_use]
    pub const fn rgb(&self) -> RgbColor {
        match self {
            Self::Red => RgbColor::new(255, 0, 0),
            Self::Yellow => RgbColor::new(255, 255, 0),
            Self::Green => RgbColor::new(0, 128, 0),
            Self::Orange => RgbColor::new(255, 165, 0),
            Self::White => RgbColor::new(255, 255, 255),
            Self::Blue => RgbColor::new(0, 0, 255),
            Self::Violet => RgbColor::new(128, 0, 128),
            Self::Pink => RgbColor::new(255, 192, 203),
        }
    }

    /// Returns a lowercase name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::White => "white",
            Self::Blue => "blue",
            Self::Violet => "violet",
            Self::Pink => "pink",
        }
    }

    /// Returns the entry with the smallest L1 distance to `requested`.
    ///
    /// Ties go to the lowest index.
    #[must_use]
    pub fn closest_to(requested: RgbColor) -> Self {
        let mut best = Self::ALL[0];
        let mut best_distance = best.rgb().l1_distance(&requested);
        for candidate in &Self::ALL[1..] {
            let distance = candidate.rgb().l1_distance(&requested);
            if distance < best_distance {
                best = *candidate;
                best_distance = distance;
            }
        }
        best
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
