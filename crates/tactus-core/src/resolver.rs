//! Resolution of gesture targets to screen points.

use crate::error::TouchError;
use crate::geometry::{ElementBounds, Offset, ScreenPoint, Viewport};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a UI element, issued by the element-lookup layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle(pub String);

impl ElementHandle {
    /// Create a new handle.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The handle's id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element '{}'", self.0)
    }
}

/// Where on an element's bounds a touch lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Anchor {
    /// Visible center
    #[default]
    Center,
    /// Top-left corner
    TopLeft,
}

impl Anchor {
    /// Map element bounds to a point.
    #[must_use]
    pub const fn apply(&self, bounds: &ElementBounds) -> ScreenPoint {
        match self {
            Self::Center => bounds.center(),
            Self::TopLeft => bounds.top_left(),
        }
    }
}

/// Target of a gesture: a literal point or an element resolved when the
/// gesture runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coordinates {
    /// Literal viewport point
    Point(ScreenPoint),
    /// Element located at dispatch time
    Element(ElementHandle),
}

impl Coordinates {
    /// Literal point target.
    #[must_use]
    pub const fn point(x: i32, y: i32) -> Self {
        Self::Point(ScreenPoint::new(x, y))
    }

    /// Element target.
    pub fn element(id: impl Into<String>) -> Self {
        Self::Element(ElementHandle::new(id))
    }

    /// Resolve against a locator, mapping bounds through `anchor`.
    ///
    /// # Errors
    ///
    /// [`TouchError::UnresolvableTarget`] when the element is gone or has no
    /// visible area.
    pub fn resolve_to_point(
        &self,
        locator: &dyn ElementLocator,
        anchor: Anchor,
    ) -> Result<ScreenPoint, TouchError> {
        match self {
            Self::Point(point) => Ok(*point),
            Self::Element(handle) => {
                let bounds =
                    locator
                        .locate(handle)
                        .ok_or_else(|| TouchError::UnresolvableTarget {
                            target: handle.to_string(),
                            reason: "element not found".to_string(),
                        })?;
                if bounds.is_empty() {
                    return Err(TouchError::UnresolvableTarget {
                        target: handle.to_string(),
                        reason: "no visible bounds".to_string(),
                    });
                }
                Ok(anchor.apply(&bounds))
            }
        }
    }
}

impl From<ScreenPoint> for Coordinates {
    fn from(point: ScreenPoint) -> Self {
        Self::Point(point)
    }
}

impl From<ElementHandle> for Coordinates {
    fn from(handle: ElementHandle) -> Self {
        Self::Element(handle)
    }
}

/// Element-location capability provided by the UI lookup layer.
///
/// Returns `None` once the element no longer exists.
pub trait ElementLocator {
    /// Current visible bounds of an element.
    fn locate(&self, handle: &ElementHandle) -> Option<ElementBounds>;
}

/// Locator for sessions that only ever use literal coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoElements;

impl ElementLocator for NoElements {
    fn locate(&self, _handle: &ElementHandle) -> Option<ElementBounds> {
        None
    }
}

/// Resolves [`Coordinates`] into viewport-checked points.
pub struct CoordinateResolver<L> {
    locator: L,
    viewport: Viewport,
    anchor: Anchor,
}

impl<L: ElementLocator> CoordinateResolver<L> {
    /// Create a resolver for a viewport.
    pub const fn new(locator: L, viewport: Viewport, anchor: Anchor) -> Self {
        Self {
            locator,
            viewport,
            anchor,
        }
    }

    /// The viewport points are checked against.
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resolve a target to a point on the surface.
    ///
    /// # Errors
    ///
    /// [`TouchError::UnresolvableTarget`] for vanished elements and
    /// [`TouchError::OutOfViewport`] for points off the surface.
    pub fn resolve(&self, target: &Coordinates) -> Result<ScreenPoint, TouchError> {
        let point = target.resolve_to_point(&self.locator, self.anchor)?;
        self.check(point)
    }

    /// Check a literal point against the viewport.
    ///
    /// # Errors
    ///
    /// [`TouchError::OutOfViewport`] for points off the surface.
    pub fn check(&self, point: ScreenPoint) -> Result<ScreenPoint, TouchError> {
        if self.viewport.contains(point) {
            Ok(point)
        } else {
            Err(TouchError::OutOfViewport {
                point,
                viewport: self.viewport,
            })
        }
    }

    /// Destination of a displacement from `from`, checked against the viewport.
    ///
    /// # Errors
    ///
    /// [`TouchError::OutOfViewport`] when the destination is off the surface
    /// or beyond the pixel range. The reported point is saturated.
    pub fn offset_target(&self, from: ScreenPoint, offset: Offset) -> Result<ScreenPoint, TouchError> {
        match from.checked_add(offset) {
            Some(to) => self.check(to),
            None => Err(TouchError::OutOfViewport {
                point: from + offset,
                viewport: self.viewport,
            }),
        }
    }
}

impl<L> fmt::Debug for CoordinateResolver<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinateResolver")
            .field("viewport", &self.viewport)
            .field("anchor", &self.anchor)
            .finish_non_exhaustive()
    }
}
