// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! A [`StateChange`] is one discrete update derived from a command being
//! issued (optimistic) or from a successful poll (confirmed). Entity snapshots
//! apply the changes that concern them and ignore the rest.
//!
//! # Examples
//!
//! ```
//! use smartwindow_lib::state::{CoverState, StateChange};
//! use smartwindow_lib::types::RawPosition;
//!
//! let mut state = CoverState::default();
//!
//! let change = StateChange::Position(RawPosition::new(120).unwrap());
//! assert!(state.apply(&change));
//!
//! // Same position again: nothing changes
//! assert!(!state.apply(&change));
//! assert_eq!(state.is_closed(), Some(true));
//! ```

use chrono::{DateTime, Utc};

use crate::response::Reading;
use crate::types::{PaletteColor, RawPosition};

/// A change in entity state.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum StateChange {
    /// Blind position in device units.
    Position(RawPosition),

    /// Optimistic blind movement flags.
    Motion {
        /// Blind was told to go up.
        opening: bool,
        /// Blind was told to go down.
        closing: bool,
    },

    /// LED power.
    Power(bool),

    /// Selected LED palette color.
    Color(PaletteColor),

    /// Window open (`true`) or closed (`false`).
    Open(bool),

    /// Window micro-ventilation position.
    MicroOpen(bool),

    /// A fresh sensor reading.
    Reading {
        /// The decoded value.
        value: Reading,
        /// When it was read.
        at: DateTime<Utc>,
    },

    /// Multiple changes applied together.
    Batch(Vec<StateChange>),
}

impl StateChange {
    /// Creates a motion change for an issued "up".
    #[must_use]
    pub const fn opening() -> Self {
        Self::Motion {
            opening: true,
            closing: false,
        }
    }

    /// Creates a motion change for an issued "down".
    #[must_use]
    pub const fn closing() -> Self {
        Self::Motion {
            opening: false,
            closing: true,
        }
    }

    /// Creates a motion change clearing both flags.
    #[must_use]
    pub const fn stopped() -> Self {
        Self::Motion {
            opening: false,
            closing: false,
        }
    }

    /// Creates a reading change stamped with the current time.
    #[must_use]
    pub fn reading_now(value: Reading) -> Self {
        Self::Reading {
            value,
            at: Utc::now(),
        }
    }

    /// Returns `true` if this is a batch.
    #[must_use]
    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_constructors() {
        assert_eq!(
            StateChange::opening(),
            StateChange::Motion {
                opening: true,
                closing: false
            }
        );
        assert_eq!(
            StateChange::stopped(),
            StateChange::Motion {
                opening: false,
                closing: false
            }
        );
    }

    #[test]
    fn reading_now_stamps_time() {
        let before = Utc::now();
        let StateChange::Reading { value, at } = StateChange::reading_now(Reading::Integer(21))
        else {
            panic!("expected reading");
        };
        assert_eq!(value, Reading::Integer(21));
        assert!(at >= before);
    }

    #[test]
    fn batch_detection() {
        assert!(StateChange::Batch(vec![]).is_batch());
        assert!(!StateChange::Power(true).is_batch());
    }
}
