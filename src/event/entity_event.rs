// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity event types.

use crate::state::{EntityState, StateChange};

use super::EntityId;

/// Events emitted by entities.
///
/// This is the host-facing update surface: hosts subscribe to an
/// [`EventBus`](super::EventBus) and mirror the published snapshots.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::event::{EntityEvent, EntityId};
/// use smartwindow_lib::state::{EntityState, LightState, StateChange};
///
/// let event = EntityEvent::state_changed(
///     EntityId::light("w1"),
///     StateChange::Power(false),
///     EntityState::Light(LightState::default()),
/// );
/// assert!(event.is_state_change());
/// assert_eq!(event.entity_id().as_str(), "w1-light");
/// ```
#[derive(Debug, Clone, serde::Serialize)]
pub enum EntityEvent {
    /// Normalized state changed.
    ///
    /// Emitted when a command's optimistic update or a poll result actually
    /// changes the snapshot.
    StateChanged {
        /// The entity.
        entity_id: EntityId,
        /// The change that was applied.
        change: StateChange,
        /// The complete new snapshot.
        new_state: EntityState,
    },

    /// A poll or command failed; state was left unchanged.
    Unavailable {
        /// The entity.
        entity_id: EntityId,
        /// Why the exchange failed.
        error: String,
    },
}

impl EntityEvent {
    /// Returns the entity this event concerns.
    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        match self {
            Self::StateChanged { entity_id, .. } | Self::Unavailable { entity_id, .. } => {
                entity_id
            }
        }
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(entity_id: EntityId, change: StateChange, new_state: EntityState) -> Self {
        Self::StateChanged {
            entity_id,
            change,
            new_state,
        }
    }

    /// Creates an unavailable event.
    #[must_use]
    pub fn unavailable(entity_id: EntityId, error: impl Into<String>) -> Self {
        Self::Unavailable {
            entity_id,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CoverState;

    #[test]
    fn unavailable_event() {
        let event = EntityEvent::unavailable(EntityId::cover("w"), "timed out");
        assert!(!event.is_state_change());
        assert_eq!(event.entity_id(), &EntityId::cover("w"));
        let EntityEvent::Unavailable { error, .. } = event else {
            panic!("expected unavailable");
        };
        assert_eq!(error, "timed out");
    }

    #[test]
    fn state_changed_carries_snapshot() {
        let event = EntityEvent::state_changed(
            EntityId::cover("w"),
            StateChange::opening(),
            EntityState::Cover(CoverState::default()),
        );
        let EntityEvent::StateChanged { new_state, .. } = event else {
            panic!("expected state change");
        };
        assert!(matches!(new_state, EntityState::Cover(_)));
    }
}
