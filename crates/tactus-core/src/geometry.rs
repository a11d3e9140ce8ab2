//! Geometric primitives in viewport pixel space: `ScreenPoint`, `Offset`,
//! `Viewport`, `ElementBounds`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl ScreenPoint {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Point displaced by `offset`, or `None` if either axis overflows.
    #[must_use]
    pub const fn checked_add(&self, offset: Offset) -> Option<Self> {
        match (self.x.checked_add(offset.dx), self.y.checked_add(offset.dy)) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }

    /// Point reached by travelling `t` (0.0-1.0) of `offset` from here, rounded
    /// to the nearest pixel.
    #[must_use]
    pub fn lerp_offset(&self, offset: Offset, t: f32) -> Self {
        Self::new(
            self.x.saturating_add((offset.dx as f32 * t).round() as i32),
            self.y.saturating_add((offset.dy as f32 * t).round() as i32),
        )
    }
}

impl Default for ScreenPoint {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for ScreenPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Saturates at the `i32` range; use [`ScreenPoint::checked_add`] to detect
/// overflow.
impl Add<Offset> for ScreenPoint {
    type Output = Self;

    fn add(self, rhs: Offset) -> Self::Output {
        Self::new(self.x.saturating_add(rhs.dx), self.y.saturating_add(rhs.dy))
    }
}

impl Sub for ScreenPoint {
    type Output = Offset;

    fn sub(self, rhs: Self) -> Self::Output {
        Offset::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

/// A signed displacement in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal displacement
    pub dx: i32,
    /// Vertical displacement
    pub dy: i32,
}

impl Offset {
    /// No displacement.
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    /// Create a new offset.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Whether this offset moves at all.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(&self) -> f32 {
        let dx = self.dx as f32;
        let dy = self.dy as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Largest per-axis magnitude (Chebyshev length).
    #[must_use]
    pub fn max_axis(&self) -> u32 {
        self.dx.unsigned_abs().max(self.dy.unsigned_abs())
    }
}

/// Extents of the device surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Create a new viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if a point lies on the surface.
    #[must_use]
    pub const fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width
            && (point.y as u32) < self.height
    }

    /// Center of the surface.
    #[must_use]
    pub const fn center(&self) -> ScreenPoint {
        ScreenPoint::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Whether the viewport has any area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1080, 1920)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Visible bounds of a UI element as reported by the locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementBounds {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl ElementBounds {
    /// Create new bounds.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn top_left(&self) -> ScreenPoint {
        ScreenPoint::new(self.x, self.y)
    }

    /// Center, truncated to whole pixels.
    #[must_use]
    pub const fn center(&self) -> ScreenPoint {
        ScreenPoint::new(
            self.x.saturating_add((self.width / 2) as i32),
            self.y.saturating_add((self.height / 2) as i32),
        )
    }

    /// Whether the element has no visible area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
