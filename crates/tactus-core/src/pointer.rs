//! Per-session pointer bookkeeping and the touch state machine.
//!
//! ```text
//! Idle --Down--> Down --Move--> Moved --Move--> Moved
//!                 |                               |
//!                 +-------------Up----------------+--> Idle
//! ```
//!
//! `cancel_all` returns every pointer to `Idle` from any state. A refused
//! admission never mutates the table.

use crate::error::TouchError;
use crate::event::{EventKind, GestureEvent, PointerId};
use crate::geometry::ScreenPoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// State of one pointer identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PointerState {
    /// Not touching the surface
    #[default]
    Idle,
    /// Touching, not yet moved
    Down,
    /// Touching, moved at least once
    Moved,
}

impl PointerState {
    /// Check if the pointer is touching the surface.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Down | Self::Moved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PointerEntry {
    state: PointerState,
    position: ScreenPoint,
}

/// Liveness and last known position of every active pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerStateTable {
    pointers: BTreeMap<PointerId, PointerEntry>,
}

impl PointerStateTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a pointer.
    #[must_use]
    pub fn state(&self, id: PointerId) -> PointerState {
        self.pointers
            .get(&id)
            .map_or(PointerState::Idle, |entry| entry.state)
    }

    /// Last recorded position of an active pointer.
    #[must_use]
    pub fn position(&self, id: PointerId) -> Option<ScreenPoint> {
        self.pointers.get(&id).map(|entry| entry.position)
    }

    /// Number of active pointers.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.pointers.len()
    }

    /// Check if no pointer is active.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Active pointer ids in ascending order.
    #[must_use]
    pub fn active_ids(&self) -> Vec<PointerId> {
        self.pointers.keys().copied().collect()
    }

    /// Start a contact.
    ///
    /// # Errors
    ///
    /// [`TouchError::PointerAlreadyActive`] unless `id` is idle.
    pub fn admit_down(&mut self, id: PointerId, point: ScreenPoint) -> Result<(), TouchError> {
        if self.pointers.contains_key(&id) {
            return Err(TouchError::PointerAlreadyActive { id });
        }
        self.pointers.insert(
            id,
            PointerEntry {
                state: PointerState::Down,
                position: point,
            },
        );
        Ok(())
    }

    /// Move a contact.
    ///
    /// # Errors
    ///
    /// [`TouchError::PointerNotActive`] unless `id` is down.
    pub fn admit_move(&mut self, id: PointerId, point: ScreenPoint) -> Result<(), TouchError> {
        let entry = self
            .pointers
            .get_mut(&id)
            .ok_or(TouchError::PointerNotActive { id })?;
        entry.state = PointerState::Moved;
        entry.position = point;
        Ok(())
    }

    /// End a contact.
    ///
    /// # Errors
    ///
    /// [`TouchError::PointerNotActive`] unless `id` is down.
    pub fn admit_up(&mut self, id: PointerId) -> Result<(), TouchError> {
        self.pointers
            .remove(&id)
            .map(|_| ())
            .ok_or(TouchError::PointerNotActive { id })
    }

    /// Admit one primitive event.
    ///
    /// # Errors
    ///
    /// Whatever the matching `admit_*` call refuses.
    pub fn admit(&mut self, event: &GestureEvent) -> Result<(), TouchError> {
        match event.kind {
            EventKind::Down => self.admit_down(event.pointer_id, event.point),
            EventKind::Move => self.admit_move(event.pointer_id, event.point),
            EventKind::Up => self.admit_up(event.pointer_id),
        }
    }

    /// Return every pointer to idle, producing the Up events that release
    /// them on the device.
    pub fn cancel_all(&mut self) -> Vec<GestureEvent> {
        std::mem::take(&mut self.pointers)
            .into_iter()
            .map(|(id, entry)| GestureEvent::up(id, entry.position))
            .collect()
    }
}
