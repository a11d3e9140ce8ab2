//! Tactus: touch-gesture execution for mobile UI automation.
//!
//! A [`TouchScreen`] turns taps, drags, flicks, and multi-touch primitives
//! into paced Down/Move/Up events on a [`DeviceSink`], tracking each
//! pointer so the device never sees an impossible sequence.
//!
//! # Example
//!
//! ```ignore
//! use tactus::{Coordinates, TouchConfig, TouchScreen, Viewport};
//!
//! let screen = TouchScreen::new(sink, locator, TouchConfig::for_viewport(Viewport::new(1080, 1920)))?;
//! screen.single_tap(&Coordinates::element("login"))?;
//! screen.scroll_by(0, -600)?;
//! screen.flick_velocity(0, -2500)?;
//! ```

mod brightness;
mod gesture;
mod touchscreen;

pub use brightness::Brightness;
pub use gesture::{FlickGesture, ScrollGesture};
pub use touchscreen::TouchScreen;

pub use tactus_core::{
    kinematics, total_displacement, Anchor, ConfigError, CoordinateResolver, Coordinates,
    DeviceSink, ElementBounds, ElementHandle, ElementLocator, EventDispatcher, EventKind,
    FlickDirection, GestureEvent, GestureKinematics, NoElements, Offset, Pacer,
    ParseDirectionError, PointerId, PointerState, PointerStateTable, ScreenPoint, SinkError,
    ThreadPacer, TimingConfig, TouchConfig, TouchError, Viewport,
};
