// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Window actuator commands.

use crate::command::{Command, CommandName};

/// Command to open, close or query a motorized window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    /// Open the window.
    Open,
    /// Close the window.
    Close,
    /// Query open/closed state.
    State,
    /// Open to the micro-ventilation position.
    MicroOpen,
    /// Query micro-ventilation state.
    MicroState,
}

impl WindowCommand {
    const fn catalog_name(&self) -> CommandName {
        match self {
            Self::Open => CommandName::WindowOpen,
            Self::Close => CommandName::WindowClose,
            Self::State => CommandName::WindowState,
            Self::MicroOpen => CommandName::WindowMicroOpen,
            Self::MicroState => CommandName::WindowMicroState,
        }
    }
}

impl Command for WindowCommand {
    fn name(&self) -> String {
        self.catalog_name().as_str().to_string()
    }

    fn opcode(&self) -> u16 {
        self.catalog_name().opcode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcodes() {
        assert_eq!(WindowCommand::Open.opcode(), 54);
        assert_eq!(WindowCommand::Close.opcode(), 53);
        assert_eq!(WindowCommand::State.opcode(), 55);
        assert_eq!(WindowCommand::MicroOpen.opcode(), 73);
        assert_eq!(WindowCommand::MicroState.opcode(), 74);
    }
}
