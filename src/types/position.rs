// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cover position types.
//!
//! The blind motor reports its position on a native 0-120 scale where 0 is
//! fully open and 120 fully closed. Hosts work with a 0-100 percentage where
//! 100 is fully open. Both are range-checked at construction.

use std::fmt;

use crate::error::ValueError;

/// Cover position as a host-facing percentage (0 = closed, 100 = open).
///
/// # Examples
///
/// ```
/// use smartwindow_lib::types::Position;
///
/// let half = Position::new(50).unwrap();
/// assert_eq!(half.to_raw().value(), 60);
///
/// assert!(Position::new(150).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct Position(u8);

impl Position {
    /// Maximum percentage (fully open).
    pub const MAX: u8 = 100;

    /// Creates a position percentage.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `percent` is outside `[0, 100]`.
    pub fn new(percent: i64) -> Result<Self, ValueError> {
        u8::try_from(percent)
            .ok()
            .filter(|p| *p <= Self::MAX)
            .map(Self)
            .ok_or(ValueError::OutOfRange {
                min: 0,
                max: i64::from(Self::MAX),
                actual: percent,
            })
    }

    /// Fully open.
    #[must_use]
    pub const fn open() -> Self {
        Self(Self::MAX)
    }

    /// Fully closed.
    #[must_use]
    pub const fn closed() -> Self {
        Self(0)
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Converts to the motor scale: `round((100 - pct) * 1.2)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_raw(&self) -> RawPosition {
        let raw = (f64::from(Self::MAX - self.0) * 1.2).round() as u8;
        RawPosition(raw.min(RawPosition::MAX))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Cover position on the motor's native scale (0 = open, 120 = closed).
///
/// # Examples
///
/// ```
/// use smartwindow_lib::types::RawPosition;
///
/// let raw = RawPosition::new(120).unwrap();
/// assert!(raw.is_closed());
/// assert_eq!(raw.to_percent().value(), 0);
///
/// assert!(RawPosition::new(121).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct RawPosition(u8);

impl RawPosition {
    /// Maximum raw value (fully closed).
    pub const MAX: u8 = 120;

    /// Creates a raw position.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `raw` is outside `[0, 120]`.
    pub fn new(raw: i64) -> Result<Self, ValueError> {
        u8::try_from(raw)
            .ok()
            .filter(|r| *r <= Self::MAX)
            .map(Self)
            .ok_or(ValueError::OutOfRange {
                min: 0,
                max: i64::from(Self::MAX),
                actual: raw,
            })
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` when the cover is fully closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.0 == Self::MAX
    }

    /// Converts to a percentage: `round(100 - raw / 120 * 100)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_percent(&self) -> Position {
        let pct = (100.0 - f64::from(self.0) / f64::from(Self::MAX) * 100.0).round() as u8;
        Position(pct.min(Position::MAX))
    }
}

impl fmt::Display for RawPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_bounds() {
        assert!(Position::new(0).is_ok());
        assert!(Position::new(100).is_ok());
        assert_eq!(
            Position::new(150),
            Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: 150
            })
        );
        assert!(Position::new(-1).is_err());
    }

    #[test]
    fn raw_bounds() {
        assert!(RawPosition::new(0).is_ok());
        assert!(RawPosition::new(120).is_ok());
        assert!(RawPosition::new(121).is_err());
        assert!(RawPosition::new(-5).is_err());
    }

    #[test]
    fn every_raw_maps_into_percent_range() {
        for r in 0..=120 {
            let pct = RawPosition::new(r).unwrap().to_percent().value();
            assert!(pct <= 100, "raw {r} gave {pct}");
        }
    }

    #[test]
    fn percent_roundtrips_within_one() {
        for p in 0..=100 {
            let back = Position::new(p).unwrap().to_raw().to_percent().value();
            assert!(
                (i64::from(back) - p).abs() <= 1,
                "percent {p} came back as {back}"
            );
        }
    }

    #[test]
    fn known_conversions() {
        assert_eq!(Position::open().to_raw().value(), 0);
        assert_eq!(Position::closed().to_raw().value(), 120);
        assert_eq!(Position::new(1).unwrap().to_raw().value(), 119);
        assert_eq!(RawPosition::new(60).unwrap().to_percent().value(), 50);
        assert_eq!(RawPosition::new(0).unwrap().to_percent().value(), 100);
    }

    #[test]
    fn closed_only_at_max() {
        assert!(RawPosition::new(120).unwrap().is_closed());
        assert!(!RawPosition::new(119).unwrap().is_closed());
    }
}
