// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor read commands.

use crate::command::Command;
use crate::protocol::Framing;
use crate::types::SensorKind;

/// Command to read one sensor, identified by the opcode the device declares
/// for it.
///
/// Sensor requests are newline-terminated, unlike every other command.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::command::{Command, SensorCommand};
/// use smartwindow_lib::protocol::Framing;
///
/// let cmd = SensorCommand::new(58);
/// assert_eq!(cmd.name(), "SENSOR co2");
/// assert_eq!(cmd.framing(), Framing::Newline);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorCommand {
    op: u16,
}

impl SensorCommand {
    /// Creates a read command for the given sensor opcode.
    #[must_use]
    pub const fn new(op: u16) -> Self {
        Self { op }
    }
}

impl Command for SensorCommand {
    fn name(&self) -> String {
        format!("SENSOR {}", SensorKind::from_opcode(self.op))
    }

    fn opcode(&self) -> u16 {
        self.op
    }

    fn framing(&self) -> Framing {
        Framing::Newline
    }
}
