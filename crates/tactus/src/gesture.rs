//! Gesture variants accepted by the scroll and flick operations.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tactus_core::{Coordinates, FlickDirection, Offset, ScreenPoint};

/// How a scroll is anchored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollGesture {
    /// Start on a target and drag by `offset`.
    Anchored {
        /// Where the drag starts
        from: Coordinates,
        /// Displacement
        offset: Offset,
    },
    /// Drag by `offset` from the primary pointer, or the viewport center
    /// when the primary pointer is idle.
    Relative {
        /// Displacement
        offset: Offset,
    },
}

/// How a flick is specified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlickGesture {
    /// Speeds in pixels/second, anchored like [`ScrollGesture::Relative`].
    Velocity {
        /// Horizontal speed
        x_speed: i32,
        /// Vertical speed
        y_speed: i32,
    },
    /// Start on a target and travel `offset` at `speed` pixels/second.
    Anchored {
        /// Where the flick starts
        from: Coordinates,
        /// Displacement
        offset: Offset,
        /// Speed in pixels/second
        speed: i32,
    },
    /// Travel `distance` pixels in a compass direction over `duration`.
    Directional {
        /// Where the flick starts
        origin: ScreenPoint,
        /// Direction of travel
        direction: FlickDirection,
        /// Distance in pixels
        distance: u32,
        /// Time the pointer stays down
        duration: Duration,
    },
}

impl FlickGesture {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Velocity { .. } => "flick_velocity",
            Self::Anchored { .. } => "flick_anchored",
            Self::Directional { .. } => "flick_directional",
        }
    }
}

impl ScrollGesture {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Anchored { .. } => "scroll_anchored",
            Self::Relative { .. } => "scroll_relative",
        }
    }

    /// The requested displacement.
    #[must_use]
    pub const fn offset(&self) -> Offset {
        match self {
            Self::Anchored { offset, .. } | Self::Relative { offset } => *offset,
        }
    }
}
