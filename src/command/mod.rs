// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device command definitions.
//!
//! The [`catalog`] maps human-readable operation names to wire opcodes.
//! Typed commands on top of it are what the device entities send:
//!
//! | Command Type | Purpose | Example |
//! |-------------|---------|---------|
//! | [`CoverCommand`] | Blind movement and position | Up, Position 60 |
//! | [`LightCommand`] | LED power and palette color | On, Select Blue |
//! | [`WindowCommand`] | Window open/close | Open, Micro open |
//! | [`SensorCommand`] | Read one sensor | Op 4 |
//!
//! # Examples
//!
//! ```
//! use smartwindow_lib::command::{Command, CoverCommand};
//! use smartwindow_lib::protocol::Framing;
//! use smartwindow_lib::types::Position;
//!
//! let cmd = CoverCommand::SetPosition(Position::new(50).unwrap().to_raw());
//! assert_eq!(cmd.opcode(), 63);
//! assert_eq!(cmd.args(), Some(60));
//! assert_eq!(cmd.framing(), Framing::Bare);
//! ```

pub mod catalog;
mod cover;
mod light;
mod sensor;
mod window;

pub use catalog::CommandName;
pub use cover::CoverCommand;
pub use light::LightCommand;
pub use sensor::SensorCommand;
pub use window::WindowCommand;

use crate::protocol::{Framing, Request};

/// A command that can be sent to a device.
pub trait Command {
    /// Returns a human-readable name for logs.
    fn name(&self) -> String;

    /// Returns the wire opcode.
    fn opcode(&self) -> u16;

    /// Returns the integer argument, if the operation takes one.
    fn args(&self) -> Option<u16> {
        None
    }

    /// Returns how the request is terminated on the wire.
    fn framing(&self) -> Framing {
        Framing::Bare
    }

    /// Builds the signed request for this command.
    fn to_request(&self, bearer: &str) -> Request {
        let request = Request::new(bearer, self.opcode());
        match self.args() {
            Some(args) => request.with_args(args),
            None => request,
        }
    }
}
