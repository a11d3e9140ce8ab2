//! Primitive pointer events delivered to the device.

use crate::geometry::ScreenPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Pointer identifier, unique among the pointers active in one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct PointerId(pub u32);

impl PointerId {
    /// Implicit pointer used by single-touch calls.
    pub const PRIMARY: Self = Self(0);

    /// Create a new pointer ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the primary pointer.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        self.0 == Self::PRIMARY.0
    }
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a primitive pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Contact starts
    Down,
    /// Contact moves
    Move,
    /// Contact ends
    Up,
}

impl EventKind {
    /// Lower-case name as used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Move => "move",
            Self::Up => "up",
        }
    }
}

/// One primitive pointer event.
///
/// `offset` is measured from the start of the gesture the event belongs to,
/// so a sequence is non-decreasing in `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureEvent {
    /// Pointer the event applies to
    pub pointer_id: PointerId,
    /// Down, Move or Up
    pub kind: EventKind,
    /// Target position
    pub point: ScreenPoint,
    /// Time since the start of the gesture
    pub offset: Duration,
}

impl GestureEvent {
    /// Create a new event.
    #[must_use]
    pub const fn new(
        pointer_id: PointerId,
        kind: EventKind,
        point: ScreenPoint,
        offset: Duration,
    ) -> Self {
        Self {
            pointer_id,
            kind,
            point,
            offset,
        }
    }

    /// Down event with no offset.
    #[must_use]
    pub const fn down(pointer_id: PointerId, point: ScreenPoint) -> Self {
        Self::new(pointer_id, EventKind::Down, point, Duration::ZERO)
    }

    /// Move event with no offset.
    #[must_use]
    pub const fn moved(pointer_id: PointerId, point: ScreenPoint) -> Self {
        Self::new(pointer_id, EventKind::Move, point, Duration::ZERO)
    }

    /// Up event with no offset.
    #[must_use]
    pub const fn up(pointer_id: PointerId, point: ScreenPoint) -> Self {
        Self::new(pointer_id, EventKind::Up, point, Duration::ZERO)
    }

    /// Same event at a different offset.
    #[must_use]
    pub const fn at(mut self, offset: Duration) -> Self {
        self.offset = offset;
        self
    }

    /// Check if this is a down event.
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self.kind, EventKind::Down)
    }

    /// Check if this is a move event.
    #[must_use]
    pub const fn is_move(&self) -> bool {
        matches!(self.kind, EventKind::Move)
    }

    /// Check if this is an up event.
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self.kind, EventKind::Up)
    }
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @{}ms",
            self.kind.name(),
            self.pointer_id,
            self.point,
            self.offset.as_millis()
        )
    }
}
