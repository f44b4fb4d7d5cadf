// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blind (cover) commands.

use crate::command::{Command, CommandName};
use crate::types::RawPosition;

/// Command to move or query a motorized blind.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::command::{Command, CoverCommand};
/// use smartwindow_lib::types::RawPosition;
///
/// assert_eq!(CoverCommand::Down.opcode(), 8);
///
/// let cmd = CoverCommand::SetPosition(RawPosition::new(120).unwrap());
/// assert_eq!(cmd.name(), "BLIND POSITION UNIT");
/// assert_eq!(cmd.args(), Some(120));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverCommand {
    /// Raise the blind.
    Up,
    /// Lower the blind.
    Down,
    /// Stop movement.
    Stop,
    /// Query the raw position.
    State,
    /// Move to a raw position.
    SetPosition(RawPosition),
}

impl CoverCommand {
    const fn catalog_name(&self) -> CommandName {
        match self {
            Self::Up => CommandName::BlindUp,
            Self::Down => CommandName::BlindDown,
            Self::Stop => CommandName::BlindStop,
            Self::State => CommandName::BlindState,
            Self::SetPosition(_) => CommandName::BlindPositionUnit,
        }
    }
}

impl Command for CoverCommand {
    fn name(&self) -> String {
        self.catalog_name().as_str().to_string()
    }

    fn opcode(&self) -> u16 {
        self.catalog_name().opcode()
    }

    fn args(&self) -> Option<u16> {
        match self {
            Self::SetPosition(raw) => Some(u16::from(raw.value())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcodes() {
        assert_eq!(CoverCommand::Up.opcode(), 7);
        assert_eq!(CoverCommand::Down.opcode(), 8);
        assert_eq!(CoverCommand::Stop.opcode(), 9);
        assert_eq!(CoverCommand::State.opcode(), 6);
    }

    #[test]
    fn only_position_carries_args() {
        assert_eq!(CoverCommand::Up.args(), None);
        assert_eq!(CoverCommand::State.args(), None);
        let cmd = CoverCommand::SetPosition(RawPosition::new(0).unwrap());
        assert_eq!(cmd.args(), Some(0));
    }
}
