// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for smart-window device control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time, so state machines never hold out-of-range positions or colors.
//!
//! # Types
//!
//! - [`Position`] - Host-facing cover position (0-100%, 100 = open)
//! - [`RawPosition`] - Motor cover position (0-120, 120 = closed)
//! - [`PaletteColor`] - One of the eight LED colors (index 1-8)
//! - [`RgbColor`] - Arbitrary requested color
//! - [`SensorKind`] - What a sensor opcode measures

mod color;
mod position;
mod rgb_color;
mod sensor;

pub use color::PaletteColor;
pub use position::{Position, RawPosition};
pub use rgb_color::RgbColor;
pub use sensor::SensorKind;
