// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LED light commands.

use crate::command::{Command, CommandName};
use crate::types::PaletteColor;

/// Command to control the window's RGB LED strip.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::command::{Command, LightCommand};
/// use smartwindow_lib::types::PaletteColor;
///
/// assert_eq!(LightCommand::On.opcode(), 60);
///
/// let cmd = LightCommand::SelectColor(PaletteColor::Pink);
/// assert_eq!(cmd.opcode(), 65);
/// assert_eq!(cmd.args(), Some(8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightCommand {
    /// Power on.
    On,
    /// Power off.
    Off,
    /// Query power state.
    State,
    /// Select a palette color. The LED must already be on.
    SelectColor(PaletteColor),
    /// Query the selected palette color.
    ColorState,
}

impl LightCommand {
    const fn catalog_name(&self) -> CommandName {
        match self {
            Self::On => CommandName::LedOn,
            Self::Off => CommandName::LedOff,
            Self::State => CommandName::LedState,
            Self::SelectColor(_) => CommandName::LedColorSelection,
            Self::ColorState => CommandName::LedColorState,
        }
    }
}

impl Command for LightCommand {
    fn name(&self) -> String {
        self.catalog_name().as_str().to_string()
    }

    fn opcode(&self) -> u16 {
        self.catalog_name().opcode()
    }

    fn args(&self) -> Option<u16> {
        match self {
            Self::SelectColor(color) => Some(u16::from(color.index())),
            _ => None,
        }
    }
}
