// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity state management types.
//!
//! Each entity kind keeps a small normalized snapshot ([`CoverState`],
//! [`LightState`], [`SwitchState`], [`SensorState`]) that is only ever mutated
//! by applying a [`StateChange`]. Applying returns whether anything actually
//! changed, which drives event publication.
//!
//! # Examples
//!
//! ```
//! use smartwindow_lib::state::{LightState, StateChange};
//! use smartwindow_lib::types::PaletteColor;
//!
//! let mut state = LightState::default();
//! state.apply(&StateChange::Power(true));
//! state.apply(&StateChange::Color(PaletteColor::Violet));
//!
//! assert!(state.is_on());
//! assert_eq!(state.color(), PaletteColor::Violet);
//! ```

mod entity_state;
mod state_change;

pub use entity_state::{CoverState, EntityState, LightState, SensorState, SwitchState};
pub use state_change::StateChange;
